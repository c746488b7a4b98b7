use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use transit_planner::domain::ServiceTime;
use transit_planner::feed::{FeedError, load_schedule};
use transit_planner::planner::{
    DEFAULT_MAX_WAIT_SECS, Planner, SearchConfig, SearchError, SearchRequest,
};
use transit_planner::report::SettledReport;

/// Earliest arrivals across a timetable from one stop and start time.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Directory holding stops.txt, trips.txt and stop_times.txt
    #[arg(long, value_name = "DIR")]
    feed: PathBuf,

    /// Stop to start from
    #[arg(long, value_name = "STOP_ID")]
    from: String,

    /// Time at the origin, HH:MM:SS (hours may exceed 23)
    #[arg(long, value_name = "HH:MM:SS")]
    at: ServiceTime,

    /// Stop once this stop's station is reached
    #[arg(long, value_name = "STOP_ID")]
    to: Option<String>,

    /// Longest wait at a station before boarding, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_MAX_WAIT_SECS)]
    max_wait: i64,

    /// Give up after this many frontier pops
    #[arg(long, value_name = "N")]
    max_rounds: Option<usize>,

    /// Give up after this much wall-clock time
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("failed to encode result: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    let schedule = load_schedule(&args.feed)?;

    let mut config = SearchConfig::new(args.max_wait);
    if let Some(max_rounds) = args.max_rounds {
        config = config.with_max_rounds(max_rounds);
    }
    if let Some(ms) = args.timeout_ms {
        config = config.with_deadline(Duration::from_millis(ms));
    }

    let mut request = SearchRequest::new(args.from.as_str(), args.at);
    if let Some(to) = &args.to {
        request = request.with_target(to.as_str());
    }

    let settled = Planner::new(&schedule, config).search(&request)?;
    let report = SettledReport::from_settled(&settled);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for arrival in &report.arrivals {
            println!("{}", arrival.summary_line());
        }
    }
    Ok(())
}
