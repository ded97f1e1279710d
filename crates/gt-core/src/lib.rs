//! # gt-core
//!
//! Search-space execution engine for GeoTune hyperparameter sweeps.
//!
//! Provides parameter domain definitions (lists, linear ranges, log-spaced
//! ranges), enumeration strategies (grid, random), command rendering,
//! bounded child-process execution, metric extraction from free-form
//! output, cooperative cancellation, and result ranking/reporting. The
//! evaluated program stays a black box: only its merged text output and
//! exit code are observed.

mod builder;
mod cancel;
mod command;
mod errors;
mod executor;
mod metric;
mod report;
mod runner;
mod space;
mod spacefile;
mod strategy;
mod trial;

pub use builder::{parse_value_list, SearchSpaceBuilder};
pub use cancel::CancelToken;
pub use command::CommandTemplate;
pub use errors::{TuneError, TuneResult};
pub use executor::{execute, ExecOutcome, TIMEOUT_EXIT_CODE};
pub use metric::{Extraction, MetricExtractor, NO_OUTPUT_SENTINEL};
pub use report::{print_report, rank, summary_stats, Direction, SummaryStats};
pub use runner::{run_search, RunConfig, DEFAULT_CMD_TIMEOUT_SECS};
pub use space::{ParamKind, ParamSpec, ParamValue, SearchSpace};
pub use spacefile::load_space_file;
pub use strategy::{GridSearch, RandomSearch, SearchStrategy, DEFAULT_RANDOM_SAMPLES};
pub use trial::{ResultLog, Trial, TrialStatus};
