//! GeoTune CLI: sweep hyperparameters of an external evaluation command.
//!
//! ```text
//! geotune \
//!   --eval-cmd "./build/tests/triangulation_tests --run-single-file recordings/new_field.json --algorithm CTA2" \
//!   --metric-regex "Global Average Error:\s*([0-9.+-eE]+)" \
//!   --min-pts 5,7,9,11 \
//!   --ratio 0.2,0.35,0.5 \
//!   --coalition 2.0,3.0,4.0 \
//!   --max-tests 100
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gt_core::{
    print_report, run_search, CancelToken, CommandTemplate, Direction, GridSearch,
    MetricExtractor, RandomSearch, RunConfig, SearchSpaceBuilder, SearchStrategy,
    DEFAULT_CMD_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(name = "geotune", about = "Tune triangulation hyperparameters via command-line sweeps")]
struct Cli {
    /// Base command to run per trial (e.g. "./build/app --file a.json")
    #[arg(long)]
    eval_cmd: String,

    /// Regex with one capture group extracting the numeric metric
    #[arg(long)]
    metric_regex: String,

    /// Declarative search-space file (JSON)
    #[arg(long)]
    search_space: Option<PathBuf>,

    /// Enumeration policy over the space
    #[arg(long, value_enum, default_value = "grid")]
    search_mode: SearchMode,

    /// Limit the number of trials to run
    #[arg(long)]
    max_tests: Option<usize>,

    /// Per-trial wall-clock timeout in seconds
    #[arg(long, default_value_t = DEFAULT_CMD_TIMEOUT_SECS)]
    cmd_timeout: u64,

    /// Rank by highest metric instead of lowest
    #[arg(long)]
    maximize: bool,

    /// Print rendered commands without executing them
    #[arg(long)]
    dry_run: bool,

    /// Comma-separated coalition distances
    #[arg(long)]
    coalition: Option<String>,

    /// Comma-separated cluster min points
    #[arg(long)]
    min_pts: Option<String>,

    /// Comma-separated cluster ratio values
    #[arg(long)]
    ratio: Option<String>,

    /// Additional parameter override, NAME=V1,V2,... (repeatable)
    #[arg(long = "param", value_name = "NAME=VALUES")]
    params: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SearchMode {
    Grid,
    Random,
}

fn build_space(cli: &Cli) -> anyhow::Result<gt_core::SearchSpace> {
    let mut builder = SearchSpaceBuilder::new();
    if let Some(path) = &cli.search_space {
        builder = builder.with_file(path);
    }

    let known = [
        ("coalition", &cli.coalition),
        ("min_pts", &cli.min_pts),
        ("ratio", &cli.ratio),
    ];
    for (name, values) in known {
        if let Some(csv) = values {
            builder = builder.with_override(name, csv);
        }
    }
    for spec in &cli.params {
        let (name, csv) = spec
            .split_once('=')
            .with_context(|| format!("--param '{spec}' is not of the form NAME=V1,V2,..."))?;
        builder = builder.with_override(name, csv);
    }

    Ok(builder.build()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // All configuration errors surface here, before any trial runs.
    let space = build_space(&cli)?;
    let template = CommandTemplate::parse(&cli.eval_cmd)?;
    let extractor = MetricExtractor::new(&cli.metric_regex)?;
    let config = RunConfig {
        template: template.clone(),
        extractor,
        timeout: Duration::from_secs(cli.cmd_timeout),
        dry_run: cli.dry_run,
    };
    debug!(?cli.search_mode, params = space.len(), "search space resolved");

    // The handler only flips the token; the loop observes it at trial
    // boundaries. A second interrupt forfeits the report.
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        if handler_token.cancel() == 0 {
            eprintln!("\nInterrupt received; finishing the current trial...");
        } else {
            eprintln!("\nForce quit.");
            std::process::exit(130);
        }
    })
    .context("failed to install interrupt handler")?;

    let mut strategy: Box<dyn SearchStrategy> = match cli.search_mode {
        SearchMode::Grid => Box::new(GridSearch::new(&space, cli.max_tests)),
        SearchMode::Random => Box::new(RandomSearch::new(&space, cli.max_tests)),
    };
    let direction = if cli.maximize {
        Direction::Maximize
    } else {
        Direction::Minimize
    };

    let log = run_search(&space, strategy.as_mut(), &config, &cancel).await;
    if !cli.dry_run {
        print_report(&log, &space, &template, direction);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn known_flags_and_param_overrides_build_a_space() {
        let cli = Cli::parse_from([
            "geotune",
            "--eval-cmd",
            "./app",
            "--metric-regex",
            "([0-9.]+)",
            "--min-pts",
            "5,7",
            "--param",
            "use_cache=true,false",
        ]);
        let space = build_space(&cli).unwrap();
        let names: Vec<&str> = space.names().collect();
        assert_eq!(names, vec!["min_pts", "use_cache"]);
        assert_eq!(space.grid_size(), Some(4));
    }

    #[test]
    fn missing_space_is_a_startup_error() {
        let cli = Cli::parse_from(["geotune", "--eval-cmd", "./app", "--metric-regex", "(.*)"]);
        assert!(build_space(&cli).is_err());
    }

    #[test]
    fn malformed_param_override_is_rejected() {
        let cli = Cli::parse_from([
            "geotune",
            "--eval-cmd",
            "./app",
            "--metric-regex",
            "(.*)",
            "--param",
            "missing-equals",
        ]);
        assert!(build_space(&cli).is_err());
    }

    #[test]
    fn defaults_match_documented_behavior() {
        let cli = Cli::parse_from(["geotune", "--eval-cmd", "./app", "--metric-regex", "(.*)"]);
        assert_eq!(cli.search_mode, SearchMode::Grid);
        assert_eq!(cli.cmd_timeout, DEFAULT_CMD_TIMEOUT_SECS);
        assert!(!cli.maximize);
        assert!(!cli.dry_run);
    }
}
