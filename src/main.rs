//! Command-line front end for the match report pipeline.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use cricket_stats::config::{OverKeying, OverListingScope, PipelineConfig};
use cricket_stats::ingestion::{CompositeObserver, FileObserver, StdErrObserver};
use cricket_stats::pipeline::Pipeline;
use cricket_stats::processing::RunsComponent;

#[derive(Parser)]
#[command(name = "cricket-stats")]
#[command(about = "Filter cricket match documents and report outcomes and runs per over", long_about = None)]
struct Cli {
    /// Directory containing *.json match documents
    #[arg(short, long, default_value = ".")]
    source: PathBuf,

    /// Team that must take part (repeatable)
    #[arg(short, long = "team")]
    teams: Vec<String>,

    /// Exact event name to report
    #[arg(short, long)]
    event: Option<String>,

    /// HTML report path
    #[arg(short, long, default_value = "stats.html")]
    output: PathBuf,

    /// Also write the report rows as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Search the source directory recursively
    #[arg(short, long)]
    recursive: bool,

    /// Only list overs for matches that pass the filter
    #[arg(long)]
    accepted_only: bool,

    /// Key over listings by (innings, over) instead of over number
    #[arg(long)]
    split_innings: bool,

    /// Runs component to aggregate per over
    #[arg(long, value_enum, default_value = "total")]
    runs: RunsArg,

    /// Decode documents on N worker threads
    #[arg(long)]
    threads: Option<usize>,

    /// Append per-document events to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not print over listings
    #[arg(long)]
    no_listing: bool,

    /// Log every decoded document to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum RunsArg {
    Total,
    Batter,
    Extras,
}

impl From<RunsArg> for RunsComponent {
    fn from(arg: RunsArg) -> Self {
        match arg {
            RunsArg::Total => RunsComponent::Total,
            RunsArg::Batter => RunsComponent::Batter,
            RunsArg::Extras => RunsComponent::Extras,
        }
    }
}

impl Cli {
    fn config(&self) -> PipelineConfig {
        PipelineConfig {
            source_dir: self.source.clone(),
            recursive: self.recursive,
            team_filter: self.teams.clone(),
            event_name_filter: self.event.clone(),
            output_path: self.output.clone(),
            csv_output_path: self.csv.clone(),
            over_listing: if self.accepted_only {
                OverListingScope::AcceptedOnly
            } else {
                OverListingScope::AllDocuments
            },
            over_keying: if self.split_innings {
                OverKeying::ByInningsAndOver
            } else {
                OverKeying::ByOver
            },
            runs: self.runs.into(),
            write_listing: !self.no_listing,
            num_threads: self.threads,
            ..Default::default()
        }
    }

    fn observer(&self) -> CompositeObserver {
        let observers = CompositeObserver::default().with(Arc::new(StdErrObserver { verbose: self.verbose }));
        match &self.log_file {
            Some(path) => observers.with(Arc::new(FileObserver::new(path))),
            None => observers,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let pipeline = Pipeline::new(cli.config()).with_observer(Arc::new(cli.observer()));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match pipeline.run(&mut out) {
        Ok(summary) => {
            eprintln!("[run][ok] {summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[run][fatal] {e}");
            ExitCode::FAILURE
        }
    }
}
