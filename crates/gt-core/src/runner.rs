//! The sequential search loop: render, execute, classify, log.

use std::time::Duration;

use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::command::CommandTemplate;
use crate::executor::{execute, ExecOutcome};
use crate::metric::{Extraction, MetricExtractor};
use crate::space::SearchSpace;
use crate::strategy::SearchStrategy;
use crate::trial::{ResultLog, Trial};

/// Default wall-clock bound per trial, in seconds.
pub const DEFAULT_CMD_TIMEOUT_SECS: u64 = 300;

/// Everything the loop needs besides the space and the strategy.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub template: CommandTemplate,
    pub extractor: MetricExtractor,
    pub timeout: Duration,
    pub dry_run: bool,
}

/// Run trials one at a time until the strategy is exhausted or the token
/// is cancelled. One trial fully completes (or times out) before the
/// next begins; the token is consulted only at trial boundaries, so a
/// stuck child can only be abandoned via the caller's hard exit.
///
/// Per-trial failures are isolated: they are recorded on the trial and
/// never abort the loop.
pub async fn run_search(
    space: &SearchSpace,
    strategy: &mut dyn SearchStrategy,
    config: &RunConfig,
    cancel: &CancelToken,
) -> ResultLog {
    let planned = strategy.planned();
    println!(
        "Starting {} search. Total trials to run: {planned}",
        strategy.name()
    );

    let mut log = ResultLog::new();
    let mut number = 0;
    loop {
        if cancel.is_cancelled() {
            println!("\nSearch interrupted; reporting partial results.");
            log.mark_interrupted();
            break;
        }
        let Some(params) = strategy.suggest(1).into_iter().next() else {
            break;
        };
        number += 1;

        let mut trial = Trial::new(number, params);
        println!("\nTest #{number}/{planned}: [{}]", trial.params_display(space));

        if config.dry_run {
            println!(
                "  -> Would execute: {}",
                config.template.render_line(space, &trial.params)
            );
            continue;
        }

        let mut args = config.template.base_args().to_vec();
        args.extend(config.template.trial_args(space, &trial.params));
        debug!(program = config.template.program(), ?args, "executing trial");

        trial.mark_started();
        match execute(config.template.program(), &args, config.timeout).await {
            Ok(ExecOutcome::Completed { exit_code, output }) => {
                match exit_code {
                    Some(0) => {}
                    Some(code) => {
                        warn!(trial = number, code, "command exited with non-zero status");
                    }
                    None => warn!(trial = number, "command was killed by a signal"),
                }
                match config.extractor.extract(&output) {
                    Extraction::Metric(metric) => {
                        trial.complete_ok(metric, exit_code);
                        println!("  -> Metric: {metric}");
                    }
                    Extraction::Invalid => {
                        trial.complete_invalid(exit_code);
                        println!("  -> Metric: N/A (app reported a file with no output)");
                    }
                    Extraction::NoMatch => {
                        trial.complete_no_match(exit_code, None);
                        println!("  -> Metric: N/A (not found in output)");
                    }
                }
            }
            Ok(ExecOutcome::TimedOut) => {
                trial.complete_timeout();
                println!(
                    "  -> Metric: N/A (timed out after {}s)",
                    config.timeout.as_secs()
                );
            }
            Err(e) => {
                warn!(trial = number, error = %e, "failed to launch command");
                trial.complete_no_match(None, Some(e.to_string()));
                println!("  -> Metric: N/A (failed to launch: {e})");
            }
        }
        log.push(trial);
    }
    log.finish();
    log
}
