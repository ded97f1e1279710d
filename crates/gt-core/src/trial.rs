//! Trial records and the append-only result log.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::executor::TIMEOUT_EXIT_CODE;
use crate::space::{ParamValue, SearchSpace};

/// Outcome classification of one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialStatus {
    /// Created but not yet executed.
    Pending,
    /// A numeric metric was extracted.
    Ok,
    /// The evaluated program's domain-failure sentinel was present.
    Invalid,
    /// The child exceeded the wall-clock bound.
    Timeout,
    /// The metric pattern was absent or its capture unparseable.
    NoMatch,
}

/// One concrete parameter assignment plus its execution outcome.
///
/// `metric` is `Some` exactly when `status` is [`TrialStatus::Ok`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub number: usize,
    pub params: HashMap<String, ParamValue>,
    pub status: TrialStatus,
    pub metric: Option<f64>,
    pub exit_code: Option<i32>,
    pub error: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Trial {
    pub fn new(number: usize, params: HashMap<String, ParamValue>) -> Self {
        Self {
            number,
            params,
            status: TrialStatus::Pending,
            metric: None,
            exit_code: None,
            error: None,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn mark_started(&mut self) {
        self.started_at = Some(Utc::now());
    }

    pub fn complete_ok(&mut self, metric: f64, exit_code: Option<i32>) {
        self.status = TrialStatus::Ok;
        self.metric = Some(metric);
        self.exit_code = exit_code;
        self.finished_at = Some(Utc::now());
    }

    pub fn complete_invalid(&mut self, exit_code: Option<i32>) {
        self.status = TrialStatus::Invalid;
        self.exit_code = exit_code;
        self.finished_at = Some(Utc::now());
    }

    pub fn complete_timeout(&mut self) {
        self.status = TrialStatus::Timeout;
        self.exit_code = Some(TIMEOUT_EXIT_CODE);
        self.finished_at = Some(Utc::now());
    }

    pub fn complete_no_match(&mut self, exit_code: Option<i32>, error: Option<String>) {
        self.status = TrialStatus::NoMatch;
        self.exit_code = exit_code;
        self.error = error;
        self.finished_at = Some(Utc::now());
    }

    /// `name=value` pairs in the space's declared order.
    pub fn params_display(&self, space: &SearchSpace) -> String {
        space
            .params()
            .iter()
            .filter_map(|spec| {
                self.params
                    .get(&spec.name)
                    .map(|v| format!("{}={v}", spec.name))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Append-only sequence of trials in execution order, read by the
/// reporter after the search loop ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultLog {
    pub run_id: Uuid,
    pub trials: Vec<Trial>,
    pub interrupted: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            trials: Vec::new(),
            interrupted: false,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn push(&mut self, trial: Trial) {
        self.trials.push(trial);
    }

    pub fn mark_interrupted(&mut self) {
        self.interrupted = true;
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Trials that produced a metric, in execution order.
    pub fn valid(&self) -> impl Iterator<Item = &Trial> {
        self.trials
            .iter()
            .filter(|t| t.status == TrialStatus::Ok)
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }
}

impl Default for ResultLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::ParamSpec;

    fn sample_params() -> HashMap<String, ParamValue> {
        let mut params = HashMap::new();
        params.insert("coalition".to_string(), ParamValue::Float(3.0));
        params.insert("min_pts".to_string(), ParamValue::Int(7));
        params
    }

    #[test]
    fn trial_lifecycle_ok() {
        let mut trial = Trial::new(1, sample_params());
        assert_eq!(trial.status, TrialStatus::Pending);
        assert!(trial.metric.is_none());

        trial.mark_started();
        trial.complete_ok(3.14, Some(0));
        assert_eq!(trial.status, TrialStatus::Ok);
        assert_eq!(trial.metric, Some(3.14));
        assert!(trial.finished_at.is_some());
    }

    #[test]
    fn non_ok_completions_leave_metric_absent() {
        let mut timeout = Trial::new(1, sample_params());
        timeout.complete_timeout();
        assert_eq!(timeout.status, TrialStatus::Timeout);
        assert_eq!(timeout.exit_code, Some(TIMEOUT_EXIT_CODE));
        assert!(timeout.metric.is_none());

        let mut invalid = Trial::new(2, sample_params());
        invalid.complete_invalid(Some(0));
        assert_eq!(invalid.status, TrialStatus::Invalid);
        assert!(invalid.metric.is_none());

        let mut no_match = Trial::new(3, sample_params());
        no_match.complete_no_match(Some(1), Some("spawn failed".into()));
        assert_eq!(no_match.status, TrialStatus::NoMatch);
        assert_eq!(no_match.error.as_deref(), Some("spawn failed"));
    }

    #[test]
    fn params_display_follows_space_order() {
        let mut space = SearchSpace::new();
        space.insert(ParamSpec::from_list("coalition", vec![ParamValue::Float(3.0)]).unwrap());
        space.insert(ParamSpec::from_list("min_pts", vec![ParamValue::Int(7)]).unwrap());

        let trial = Trial::new(1, sample_params());
        assert_eq!(trial.params_display(&space), "coalition=3.0, min_pts=7");
    }

    #[test]
    fn log_filters_valid_trials_in_order() {
        let mut log = ResultLog::new();

        let mut a = Trial::new(1, sample_params());
        a.complete_ok(5.0, Some(0));
        let mut b = Trial::new(2, sample_params());
        b.complete_no_match(Some(0), None);
        let mut c = Trial::new(3, sample_params());
        c.complete_ok(2.0, Some(0));

        log.push(a);
        log.push(b);
        log.push(c);

        let numbers: Vec<usize> = log.valid().map(|t| t.number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(log.len(), 3);
    }
}
