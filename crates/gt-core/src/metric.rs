//! Classification of captured trial output.

use regex::Regex;

use crate::errors::TuneResult;

/// Failure marker emitted by the evaluated program when at least one
/// input file produced no result. Its presence invalidates a trial even
/// when the metric pattern also matches.
pub const NO_OUTPUT_SENTINEL: &str = "No output from app for file:";

/// Outcome of inspecting one trial's output text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extraction {
    /// The metric pattern matched and its capture group parsed as a float.
    Metric(f64),
    /// The domain-failure sentinel was present.
    Invalid,
    /// No match, or the capture did not parse as a number.
    NoMatch,
}

/// Scrapes a scalar metric from free-form output with a user-supplied
/// single-capture-group pattern.
#[derive(Debug, Clone)]
pub struct MetricExtractor {
    pattern: Regex,
}

impl MetricExtractor {
    pub fn new(pattern: &str) -> TuneResult<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Two-stage check, in fixed order: the sentinel always wins, then
    /// the first pattern match's capture group is parsed as `f64`.
    pub fn extract(&self, output: &str) -> Extraction {
        if output.contains(NO_OUTPUT_SENTINEL) {
            return Extraction::Invalid;
        }
        match self
            .pattern
            .captures(output)
            .and_then(|caps| caps.get(1))
            .and_then(|group| group.as_str().parse::<f64>().ok())
        {
            Some(metric) => Extraction::Metric(metric),
            None => Extraction::NoMatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> MetricExtractor {
        MetricExtractor::new(r"Global Average Error:\s*([0-9.]+)").unwrap()
    }

    #[test]
    fn extracts_metric_from_matching_output() {
        let result = extractor().extract("Global Average Error: 3.1400");
        assert_eq!(result, Extraction::Metric(3.14));
    }

    #[test]
    fn sentinel_wins_over_matching_pattern() {
        let output = "No output from app for file: x.json\nGlobal Average Error: 3.14";
        assert_eq!(extractor().extract(output), Extraction::Invalid);
    }

    #[test]
    fn absent_pattern_is_no_match() {
        assert_eq!(
            extractor().extract("triangulation finished in 52ms"),
            Extraction::NoMatch
        );
    }

    #[test]
    fn unparseable_capture_is_no_match() {
        // The capture group grabs "..." which is not a number.
        let ext = MetricExtractor::new(r"Error:\s*(\S+)").unwrap();
        assert_eq!(ext.extract("Error: ......"), Extraction::NoMatch);
    }

    #[test]
    fn invalid_pattern_is_rejected_at_construction() {
        assert!(MetricExtractor::new("([unclosed").is_err());
    }

    #[test]
    fn first_match_is_used() {
        let output = "Global Average Error: 2.5\nGlobal Average Error: 9.9";
        assert_eq!(extractor().extract(output), Extraction::Metric(2.5));
    }
}
