//! Pipeline configuration.

use std::path::PathBuf;

use crate::error::{StatsError, StatsResult};
use crate::ingestion::Severity;
use crate::processing::{MatchFilter, RunsComponent};

/// Which documents get a per-over listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverListingScope {
    /// Every decoded document, whether or not it passed the filter.
    #[default]
    AllDocuments,
    /// Only documents that produced a report row.
    AcceptedOnly,
}

/// How over listings are keyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverKeying {
    /// By over number, merging equal numbers from different innings.
    #[default]
    ByOver,
    /// By `(innings, over number)`.
    ByInningsAndOver,
}

/// Configuration for a [`crate::pipeline::Pipeline`] run.
///
/// Use [`Default`] for common cases.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding `*.json` match documents.
    pub source_dir: PathBuf,
    /// Descend into subdirectories of `source_dir`.
    pub recursive: bool,
    /// Teams that must all take part for a match to be reported.
    pub team_filter: Vec<String>,
    /// Exact event name to report; `None` (or empty) accepts any event.
    pub event_name_filter: Option<String>,
    /// HTML report destination.
    pub output_path: PathBuf,
    /// Optional CSV copy of the report rows.
    pub csv_output_path: Option<PathBuf>,
    pub over_listing: OverListingScope,
    pub over_keying: OverKeying,
    /// Runs component aggregated in the over listings.
    pub runs: RunsComponent,
    /// Write over listings at all.
    pub write_listing: bool,
    /// Worker threads for decoding. `None` processes documents sequentially.
    pub num_threads: Option<usize>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            recursive: false,
            team_filter: Vec::new(),
            event_name_filter: None,
            output_path: PathBuf::from("stats.html"),
            csv_output_path: None,
            over_listing: OverListingScope::default(),
            over_keying: OverKeying::default(),
            runs: RunsComponent::default(),
            write_listing: true,
            num_threads: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

impl PipelineConfig {
    /// Filter predicate built from `team_filter` and `event_name_filter`.
    pub fn filter(&self) -> MatchFilter {
        MatchFilter::new(self.team_filter.iter().cloned(), self.event_name_filter.clone())
    }

    pub fn validate(&self) -> StatsResult<()> {
        if self.num_threads == Some(0) {
            return Err(StatsError::Config {
                message: "num_threads must be > 0 when set".to_string(),
            });
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(StatsError::Config {
                message: "output_path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
