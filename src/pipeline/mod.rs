//! Batch pipeline: discovery, decoding, filtering, aggregation, and report output.
//!
//! Documents are independent. With [`PipelineConfig::num_threads`] set, they are decoded and
//! aggregated on a `rayon` pool; results are always collected in path order, so the report and
//! listings do not depend on the thread count.

mod discover;

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::config::{OverKeying, OverListingScope, PipelineConfig};
use crate::error::{StatsError, StatsResult};
use crate::ingestion::{decode_match_from_path, DocumentContext, DocumentStats, PipelineObserver, Severity};
use crate::processing::{aggregate_runs, runs_per_innings_over, InningsOverRuns, MatchFilter, OverRuns};
use crate::report::{write_innings_over_listing, write_over_listing, write_rows_csv, HtmlReport, ReportRow};

pub use discover::discover_documents;

/// What is kept of a decoded document once its record has been dropped: the report row, the
/// filter verdict, and the per-over aggregate for the configured [`OverKeying`].
#[derive(Debug, Clone)]
pub struct ProcessedMatch {
    pub path: PathBuf,
    pub row: ReportRow,
    /// Passed the filter predicate.
    pub accepted: bool,
    pub runs: MatchRuns,
}

/// Per-over aggregate of one match, keyed as [`PipelineConfig::over_keying`] asks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRuns {
    ByOver(OverRuns),
    ByInningsAndOver(InningsOverRuns),
}

impl MatchRuns {
    /// Sum over every key.
    pub fn total(&self) -> i64 {
        match self {
            MatchRuns::ByOver(runs) => runs.total(),
            MatchRuns::ByInningsAndOver(runs) => runs.total(),
        }
    }

    fn write_listing<W: Write>(&self, out: &mut W, title: &str) -> std::io::Result<()> {
        match self {
            MatchRuns::ByOver(runs) => write_over_listing(out, title, runs),
            MatchRuns::ByInningsAndOver(runs) => write_innings_over_listing(out, title, runs),
        }
    }
}

/// A document that could not be decoded.
#[derive(Debug)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub severity: Severity,
    pub error: StatsError,
}

/// Outcome of processing a set of documents, in input order.
#[derive(Debug, Default)]
pub struct BatchOutput {
    pub matches: Vec<ProcessedMatch>,
    pub skipped: Vec<SkippedDocument>,
}

impl BatchOutput {
    /// Matches that passed the filter, in input order.
    pub fn accepted(&self) -> impl Iterator<Item = &ProcessedMatch> {
        self.matches.iter().filter(|m| m.accepted)
    }

    /// Report rows for the accepted matches.
    pub fn report_rows(&self) -> Vec<ReportRow> {
        self.accepted().map(|m| m.row.clone()).collect()
    }
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub documents: usize,
    pub decoded: usize,
    pub skipped: usize,
    pub report_rows: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "documents={}, decoded={}, skipped={}, report_rows={}",
            self.documents, self.decoded, self.skipped, self.report_rows
        )
    }
}

/// Runs the batch described by a [`PipelineConfig`].
pub struct Pipeline {
    config: PipelineConfig,
    filter: MatchFilter,
    observer: Option<Arc<dyn PipelineObserver>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let filter = config.filter();
        Self {
            config,
            filter,
            observer: None,
        }
    }

    /// Attach an observer for per-document events.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Full run.
    ///
    /// The HTML report is created before any document is read, so an unwritable destination
    /// fails the run up front. Over listings go to `listing`. Per-document failures are
    /// reported to the observer and skipped; everything else aborts with an error.
    pub fn run<W: Write>(&self, listing: &mut W) -> StatsResult<RunSummary> {
        self.config.validate()?;

        let mut report = HtmlReport::create(&self.config.output_path)?;
        let paths = discover_documents(&self.config.source_dir, self.config.recursive)?;
        let batch = self.process_paths(&paths)?;

        for m in batch.accepted() {
            report.write_row(&m.row)?;
        }
        if self.config.write_listing {
            self.write_listings(&batch, listing)?;
        }
        let report_rows = report.rows();
        report.finish()?;

        if let Some(csv_path) = &self.config.csv_output_path {
            write_rows_csv(csv_path, &batch.report_rows())?;
        }

        Ok(RunSummary {
            documents: paths.len(),
            decoded: batch.matches.len(),
            skipped: batch.skipped.len(),
            report_rows,
        })
    }

    /// Decode, filter, and aggregate `paths`, preserving their order.
    pub fn process_paths(&self, paths: &[PathBuf]) -> StatsResult<BatchOutput> {
        let outcomes: Vec<Result<ProcessedMatch, SkippedDocument>> = match self.config.num_threads {
            None => paths.iter().map(|p| self.process_one(p)).collect(),
            Some(n) => {
                let pool = ThreadPoolBuilder::new().num_threads(n).build()?;
                pool.install(|| paths.par_iter().map(|p| self.process_one(p)).collect())
            }
        };

        let mut out = BatchOutput::default();
        for outcome in outcomes {
            match outcome {
                Ok(m) => out.matches.push(m),
                Err(s) => out.skipped.push(s),
            }
        }
        Ok(out)
    }

    fn process_one(&self, path: &Path) -> Result<ProcessedMatch, SkippedDocument> {
        let ctx = DocumentContext {
            path: path.to_path_buf(),
        };

        let record = match decode_match_from_path(path) {
            Ok(r) => r,
            Err(error) => {
                let severity = Severity::for_error(&error);
                if let Some(obs) = &self.observer {
                    obs.on_skipped(&ctx, severity, &error);
                    if severity >= self.config.alert_at_or_above {
                        obs.on_alert(&ctx, severity, &error);
                    }
                }
                return Err(SkippedDocument {
                    path: ctx.path,
                    severity,
                    error,
                });
            }
        };

        let accepted = self.filter.accepts(&record);
        if let Some(obs) = &self.observer {
            obs.on_decoded(
                &ctx,
                DocumentStats {
                    innings: record.innings.len(),
                    deliveries: record.delivery_count(),
                    accepted,
                },
            );
        }

        let runs = match self.config.over_keying {
            OverKeying::ByOver => MatchRuns::ByOver(aggregate_runs(&record, self.config.runs)),
            OverKeying::ByInningsAndOver => {
                MatchRuns::ByInningsAndOver(runs_per_innings_over(&record, self.config.runs))
            }
        };
        let row = ReportRow::from_record(&record);

        Ok(ProcessedMatch {
            path: ctx.path,
            row,
            accepted,
            runs,
        })
    }

    fn write_listings<W: Write>(&self, batch: &BatchOutput, out: &mut W) -> StatsResult<()> {
        for m in &batch.matches {
            if self.config.over_listing == OverListingScope::AcceptedOnly && !m.accepted {
                continue;
            }
            m.runs
                .write_listing(out, &m.path.display().to_string())
                .map_err(|e| StatsError::output("<over listing>", e))?;
        }
        out.flush().map_err(|e| StatsError::output("<over listing>", e))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{MatchRuns, Pipeline};
    use crate::config::{OverKeying, OverListingScope, PipelineConfig};
    use crate::ingestion::Severity;

    const INDIA_PAKISTAN: &str = r#"{"info":{"teams":["India","Pakistan"],"city":"Manchester",
        "outcome":{"winner":"India"}},"innings":[{"team":"India","overs":[
        {"over":0,"deliveries":[{"runs":{"total":3}}]}]}]}"#;
    const AUSTRALIA_ENGLAND: &str = r#"{"info":{"teams":["Australia","England"],
        "outcome":{"winner":"England"}},"innings":[{"team":"England","overs":[
        {"over":0,"deliveries":[{"runs":{"total":5}}]}]}]}"#;

    fn corpus() -> (PathBuf, Vec<PathBuf>) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("cricket-stats-pipeline-{nanos}"));
        fs::create_dir_all(&dir).unwrap();
        let files = vec![
            (dir.join("1.json"), INDIA_PAKISTAN),
            (dir.join("2.json"), "{ not json"),
            (dir.join("3.json"), AUSTRALIA_ENGLAND),
        ];
        for (p, body) in &files {
            fs::write(p, body).unwrap();
        }
        let paths = files.into_iter().map(|(p, _)| p).collect();
        (dir, paths)
    }

    fn config() -> PipelineConfig {
        PipelineConfig {
            team_filter: vec!["India".to_string(), "Pakistan".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn process_paths_keeps_order_and_skips_malformed() {
        let (dir, paths) = corpus();
        let out = Pipeline::new(config()).process_paths(&paths).unwrap();

        assert_eq!(out.matches.len(), 2);
        assert_eq!(out.skipped.len(), 1);
        assert_eq!(out.skipped[0].severity, Severity::Error);
        assert!(out.skipped[0].path.ends_with("2.json"));
        assert!(out.matches[0].accepted);
        assert!(!out.matches[1].accepted);
        assert!(matches!(&out.matches[1].runs, MatchRuns::ByOver(r) if r.get(0) == 5));

        let rows = out.report_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].winner, "India");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_document_is_critical() {
        let out = Pipeline::new(config())
            .process_paths(&[PathBuf::from("no/such/match.json")])
            .unwrap();
        assert_eq!(out.skipped[0].severity, Severity::Critical);
    }

    #[test]
    fn parallel_processing_matches_sequential() {
        let (dir, paths) = corpus();
        let seq = Pipeline::new(config()).process_paths(&paths).unwrap();
        let par = Pipeline::new(PipelineConfig {
            num_threads: Some(3),
            ..config()
        })
        .process_paths(&paths)
        .unwrap();

        let key = |b: &super::BatchOutput| {
            b.matches
                .iter()
                .map(|m| (m.path.clone(), m.accepted, m.runs.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(key(&seq), key(&par));
        assert_eq!(seq.skipped.len(), par.skipped.len());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn batch_keeps_row_and_selected_aggregate_only() {
        let (dir, paths) = corpus();
        let by_over = Pipeline::new(config()).process_paths(&paths).unwrap();
        let split = Pipeline::new(PipelineConfig {
            over_keying: OverKeying::ByInningsAndOver,
            ..config()
        })
        .process_paths(&paths)
        .unwrap();

        assert_eq!(by_over.matches[0].row.city, "Manchester");
        assert_eq!(by_over.matches[1].row.winner, "England");
        assert!(by_over
            .matches
            .iter()
            .all(|m| matches!(m.runs, MatchRuns::ByOver(_))));
        assert!(split
            .matches
            .iter()
            .all(|m| matches!(m.runs, MatchRuns::ByInningsAndOver(_))));
        let totals = |b: &super::BatchOutput| b.matches.iter().map(|m| m.runs.total()).collect::<Vec<_>>();
        assert_eq!(totals(&by_over), vec![3, 5]);
        assert_eq!(totals(&by_over), totals(&split));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn accepted_only_scope_limits_listings() {
        let (dir, _) = corpus();
        let output = dir.join("stats.html");
        let pipeline = Pipeline::new(PipelineConfig {
            source_dir: dir.clone(),
            output_path: output.clone(),
            over_listing: OverListingScope::AcceptedOnly,
            ..config()
        });
        let mut listing = Vec::<u8>::new();
        let summary = pipeline.run(&mut listing).unwrap();
        let text = String::from_utf8(listing).unwrap();

        assert_eq!(summary.documents, 3);
        assert_eq!(summary.report_rows, 1);
        assert_eq!(text.matches("Over\tTotal Runs").count(), 1);
        assert!(text.contains("0\t3\n"));
        let _ = fs::remove_dir_all(dir);
    }
}
