use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type used across the crate.
pub type StatsResult<T> = Result<T, StatsError>;

/// Error type returned by decoding, discovery, and report output.
///
/// Per-document variants ([`StatsError::Io`], [`StatsError::Decode`],
/// [`StatsError::SchemaMismatch`]) make the pipeline skip that document. Everything else aborts
/// the run.
#[derive(Debug, Error)]
pub enum StatsError {
    /// A match document could not be opened or read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not syntactically valid JSON.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The document parsed, but its shape cannot hold a match record (e.g. the root is an array).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// The report (or over listing) could not be created or written.
    #[error("failed to write output '{}': {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV export error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Match documents could not be listed.
    #[error("discovery error: {message}")]
    Discovery { message: String },

    /// The pipeline configuration is not usable.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// The worker pool for parallel processing could not be built.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl StatsError {
    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StatsError::Output {
            path: path.into(),
            source,
        }
    }
}
