//! `cricket-stats` ingests cricket match records stored as JSON documents (Cricsheet layout),
//! filters them by participating teams and event name, and produces:
//!
//! - an HTML table of match outcomes (winner, city, venue, event) for the matches that pass the
//!   filter, and
//! - a per-over run listing for each processed match.
//!
//! The primary entrypoint is [`pipeline::Pipeline`], configured by [`config::PipelineConfig`].
//! The pieces it is built from are usable on their own:
//!
//! - [`ingestion`]: decode one document into a [`types::MatchRecord`]; observer hooks
//! - [`processing`]: the team/event filter predicate and the per-over aggregator
//! - [`report`]: HTML table, over listings, CSV export
//! - [`types`]: the match data model
//! - [`error`]: the crate-wide error type
//!
//! ## Decoding is best-effort
//!
//! Documents only fail to decode when they are not valid JSON (or not a JSON object). Missing,
//! `null`, or mistyped fields become zero values, and `season` keeps whatever shape it has:
//!
//! ```rust
//! use cricket_stats::ingestion::decode_match_from_str;
//! use cricket_stats::types::Season;
//!
//! let a = decode_match_from_str(r#"{"info": {"season": 2019, "venue": "Old Trafford"}}"#).unwrap();
//! let b = decode_match_from_str(r#"{"info": {"season": "2014/15"}}"#).unwrap();
//!
//! assert_eq!(a.info.city, "");
//! assert_eq!(a.info.season, Season::Number(2019));
//! assert_eq!(b.info.season, Season::Text("2014/15".to_string()));
//! ```
//!
//! ## Running a batch
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cricket_stats::config::PipelineConfig;
//! use cricket_stats::ingestion::StdErrObserver;
//! use cricket_stats::pipeline::Pipeline;
//!
//! # fn main() -> Result<(), cricket_stats::StatsError> {
//! let config = PipelineConfig {
//!     source_dir: "odis_json".into(),
//!     team_filter: vec!["India".to_string(), "Pakistan".to_string()],
//!     output_path: "stats.html".into(),
//!     ..Default::default()
//! };
//!
//! let pipeline = Pipeline::new(config).with_observer(Arc::new(StdErrObserver::default()));
//! let summary = pipeline.run(&mut std::io::stdout().lock())?;
//! eprintln!("{summary}");
//! # Ok(())
//! # }
//! ```
//!
//! ### Over numbering
//!
//! [`processing::runs_per_over`] keys by over number only, so over `0` of the first innings and
//! over `0` of the second innings are summed together. [`processing::runs_per_innings_over`]
//! keeps them apart; the pipeline picks one via [`config::OverKeying`].

pub mod config;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod report;
pub mod types;

pub use error::{StatsError, StatsResult};
