//! HTML match-outcome table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{StatsError, StatsResult};
use crate::types::MatchRecord;

/// One row of the outcome report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Match Winner")]
    pub winner: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Venue")]
    pub venue: String,
    #[serde(rename = "Event Name")]
    pub event_name: String,
}

impl ReportRow {
    pub fn from_record(record: &MatchRecord) -> Self {
        Self {
            winner: record.info.outcome.winner.clone(),
            city: record.info.city.clone(),
            venue: record.info.venue.clone(),
            event_name: record.info.event.name.clone(),
        }
    }
}

const HEADER: &str = "<tr><th>Match Winner</th><th>City</th><th>Venue</th><th>Event Name</th></tr>";

/// Streaming writer for the report table.
///
/// The document preamble and header row are written on construction; [`HtmlReport::finish`]
/// closes the table and flushes. Every I/O failure is an [`StatsError::Output`].
pub struct HtmlReport<W: Write> {
    out: W,
    path: PathBuf,
    rows: usize,
}

impl HtmlReport<BufWriter<File>> {
    /// Create (truncate) the report file at `path`.
    pub fn create(path: impl AsRef<Path>) -> StatsResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| StatsError::output(path, e))?;
        Self::new(BufWriter::new(file), path)
    }
}

impl<W: Write> HtmlReport<W> {
    /// Wrap an arbitrary writer; `label` is only used in error messages.
    pub fn new(mut out: W, label: impl Into<PathBuf>) -> StatsResult<Self> {
        let path = label.into();
        write!(out, "<html><body><table>{HEADER}").map_err(|e| StatsError::output(&path, e))?;
        Ok(Self { out, path, rows: 0 })
    }

    pub fn write_row(&mut self, row: &ReportRow) -> StatsResult<()> {
        write!(
            self.out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&row.winner),
            escape_html(&row.city),
            escape_html(&row.venue),
            escape_html(&row.event_name)
        )
        .map_err(|e| StatsError::output(&self.path, e))?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Close the table and flush. Returns the inner writer.
    pub fn finish(mut self) -> StatsResult<W> {
        self.out
            .write_all(b"</table></body></html>")
            .and_then(|_| self.out.flush())
            .map_err(|e| StatsError::output(&self.path, e))?;
        Ok(self.out)
    }
}

/// Escape text for an HTML element body.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
