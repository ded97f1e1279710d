//! Ranking and reporting of a finished (or interrupted) run.

use serde::{Deserialize, Serialize};

use crate::command::CommandTemplate;
use crate::space::SearchSpace;
use crate::trial::{ResultLog, Trial};

/// Whether a lower or higher metric wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Minimize,
    Maximize,
}

/// How many ranked trials the report lists.
const TOP_N: usize = 5;

/// Valid trials sorted best-first. The sort is stable, so equal metrics
/// keep their execution order.
pub fn rank<'a>(log: &'a ResultLog, direction: Direction) -> Vec<&'a Trial> {
    let mut ranked: Vec<&Trial> = log.valid().collect();
    ranked.sort_by(|a, b| {
        let (x, y) = (a.metric.unwrap_or(f64::NAN), b.metric.unwrap_or(f64::NAN));
        let ord = x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal);
        match direction {
            Direction::Minimize => ord,
            Direction::Maximize => ord.reverse(),
        }
    });
    ranked
}

/// Summary statistics over all valid metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

pub fn summary_stats(metrics: &[f64]) -> Option<SummaryStats> {
    if metrics.is_empty() {
        return None;
    }
    let mut sorted = metrics.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };
    Some(SummaryStats {
        count: n,
        min: sorted[0],
        max: sorted[n - 1],
        mean: sorted.iter().sum::<f64>() / n as f64,
        median,
    })
}

/// Print the final report: best trial as a ready-to-run command, the
/// top-ranked trials, and summary statistics. An all-invalid log gets an
/// explicit notice and is not an error.
pub fn print_report(
    log: &ResultLog,
    space: &SearchSpace,
    template: &CommandTemplate,
    direction: Direction,
) {
    println!("\n--- Search complete (run {}) ---", log.run_id);
    if log.interrupted {
        println!("Run was interrupted; results are partial.");
    }

    let ranked = rank(log, direction);
    if ranked.is_empty() {
        println!("No valid metrics were collected. Cannot determine the best setup.");
        return;
    }

    let best = ranked[0];
    let superlative = match direction {
        Direction::Minimize => "lowest",
        Direction::Maximize => "highest",
    };
    println!("\nBest setup ({superlative} metric):");
    println!("  Metric  = {}", best.metric.unwrap_or(f64::NAN));
    println!("  Params  = {{{}}}", best.params_display(space));
    println!("  Command = {}", template.render_line(space, &best.params));

    println!("\nTop {} of {} valid trials:", ranked.len().min(TOP_N), ranked.len());
    for (i, trial) in ranked.iter().take(TOP_N).enumerate() {
        println!(
            "  {}. metric={} [{}] (trial #{})",
            i + 1,
            trial.metric.unwrap_or(f64::NAN),
            trial.params_display(space),
            trial.number
        );
    }

    let metrics: Vec<f64> = ranked.iter().filter_map(|t| t.metric).collect();
    if let Some(stats) = summary_stats(&metrics) {
        println!(
            "\nMetric summary: min={} max={} mean={} median={}",
            stats.min, stats.max, stats.mean, stats.median
        );
    }
}
