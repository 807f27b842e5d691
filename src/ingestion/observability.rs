//! Observer hooks for per-document pipeline outcomes.
//!
//! The pipeline calls [`PipelineObserver::on_decoded`] for every document it decodes and
//! [`PipelineObserver::on_skipped`] for every document it skips. Skips at or above
//! [`crate::config::PipelineConfig::alert_at_or_above`] also raise
//! [`PipelineObserver::on_alert`].

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::StatsError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    /// The document was skipped because its content is unusable.
    Error,
    /// The document could not be read at all.
    Critical,
}

impl Severity {
    /// Severity assigned to a per-document failure.
    pub fn for_error(e: &StatsError) -> Self {
        match e {
            StatsError::Io(_) => Severity::Critical,
            StatsError::Decode(err) if err.is_io() => Severity::Critical,
            StatsError::Decode(_) | StatsError::SchemaMismatch { .. } => Severity::Error,
            _ => Severity::Critical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which document an event refers to.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    pub path: PathBuf,
}

/// Stats reported for a successfully decoded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub innings: usize,
    pub deliveries: usize,
    /// Whether the match passed the filter predicate.
    pub accepted: bool,
}

/// Observer interface for per-document pipeline outcomes.
pub trait PipelineObserver: Send + Sync {
    fn on_decoded(&self, _ctx: &DocumentContext, _stats: DocumentStats) {}

    fn on_skipped(&self, _ctx: &DocumentContext, _severity: Severity, _error: &StatsError) {}

    /// Defaults to [`Self::on_skipped`].
    fn on_alert(&self, ctx: &DocumentContext, severity: Severity, error: &StatsError) {
        self.on_skipped(ctx, severity, error)
    }
}

/// One callback as the built-in log observers render it.
enum Event<'a> {
    Decoded(DocumentStats),
    Skipped(Severity, &'a StatsError),
    Alert(Severity, &'a StatsError),
}

impl Event<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Event::Decoded(_) => "decoded",
            Event::Skipped(..) => "skipped",
            Event::Alert(..) => "alert",
        }
    }

    fn severity(&self) -> Severity {
        match self {
            Event::Decoded(_) => Severity::Info,
            Event::Skipped(s, _) | Event::Alert(s, _) => *s,
        }
    }

    fn detail(&self) -> String {
        match self {
            Event::Decoded(stats) => format!(
                "innings={} deliveries={} filter={}",
                stats.innings,
                stats.deliveries,
                if stats.accepted { "accepted" } else { "rejected" }
            ),
            Event::Skipped(_, e) | Event::Alert(_, e) => e.to_string(),
        }
    }
}

/// Forwards every callback to each observer it holds, in insertion order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    pub fn with(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    fn each(&self, f: impl Fn(&dyn PipelineObserver)) {
        self.observers.iter().for_each(|o| f(o.as_ref()));
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_decoded(&self, ctx: &DocumentContext, stats: DocumentStats) {
        self.each(|o| o.on_decoded(ctx, stats));
    }

    fn on_skipped(&self, ctx: &DocumentContext, severity: Severity, error: &StatsError) {
        self.each(|o| o.on_skipped(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &DocumentContext, severity: Severity, error: &StatsError) {
        self.each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Logs events to stderr, e.g. `[match][skipped][error] odis/1.json decode error: ...`.
///
/// Decoded documents are only logged when `verbose` is set.
#[derive(Debug, Default)]
pub struct StdErrObserver {
    pub verbose: bool,
}

impl StdErrObserver {
    fn log(&self, ctx: &DocumentContext, event: Event<'_>) {
        let prefix = if matches!(event, Event::Alert(..)) { "[ALERT]" } else { "" };
        eprintln!(
            "{prefix}[match][{}][{}] {} {}",
            event.kind(),
            event.severity(),
            ctx.path.display(),
            event.detail()
        );
    }
}

impl PipelineObserver for StdErrObserver {
    fn on_decoded(&self, ctx: &DocumentContext, stats: DocumentStats) {
        if self.verbose {
            self.log(ctx, Event::Decoded(stats));
        }
    }

    fn on_skipped(&self, ctx: &DocumentContext, severity: Severity, error: &StatsError) {
        self.log(ctx, Event::Skipped(severity, error));
    }

    fn on_alert(&self, ctx: &DocumentContext, severity: Severity, error: &StatsError) {
        self.log(ctx, Event::Alert(severity, error));
    }
}

/// Appends one tab-separated line per event to a log file:
/// `unix_seconds  kind  severity  path  detail`.
///
/// The file is opened once, in append mode. If it cannot be opened, or a write fails, the event
/// is dropped and the pipeline carries on.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    out: Mutex<Option<LineWriter<File>>>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let out = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .ok()
            .map(LineWriter::new);
        Self {
            path,
            out: Mutex::new(out),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, ctx: &DocumentContext, event: Event<'_>) {
        let Ok(mut guard) = self.out.lock() else {
            return;
        };
        if let Some(out) = guard.as_mut() {
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                unix_ts(),
                event.kind(),
                event.severity(),
                ctx.path.display(),
                event.detail()
            );
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_decoded(&self, ctx: &DocumentContext, stats: DocumentStats) {
        self.record(ctx, Event::Decoded(stats));
    }

    fn on_skipped(&self, ctx: &DocumentContext, severity: Severity, error: &StatsError) {
        self.record(ctx, Event::Skipped(severity, error));
    }

    fn on_alert(&self, ctx: &DocumentContext, severity: Severity, error: &StatsError) {
        self.record(ctx, Event::Alert(severity, error));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
