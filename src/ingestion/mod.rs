//! Match document ingestion.
//!
//! - [`decode`]: projection of one JSON document onto a [`crate::types::MatchRecord`]
//! - [`observability`]: observer hooks for per-document outcomes (decoded / skipped)

pub mod decode;
pub mod observability;

pub use decode::{decode_match_from_path, decode_match_from_reader, decode_match_from_str, decode_match_value};
pub use observability::{
    CompositeObserver, DocumentContext, DocumentStats, FileObserver, PipelineObserver, Severity, StdErrObserver,
};
