//! In-memory processing of decoded match records.
//!
//! - [`filter`]: team / event predicate
//! - [`aggregate`]: runs per over
//!
//! ## Example: filter, then aggregate
//!
//! ```rust
//! use cricket_stats::ingestion::decode_match_from_str;
//! use cricket_stats::processing::{matches, runs_per_over};
//!
//! let record = decode_match_from_str(r#"{
//!     "info": {"teams": ["India", "Pakistan"]},
//!     "innings": [{"team": "India", "overs": [
//!         {"over": 1, "deliveries": [{"runs": {"total": 1}}, {"runs": {"total": 4}},
//!                                    {"runs": {"total": 0}}, {"runs": {"total": 2}}]},
//!         {"over": 2, "deliveries": [{"runs": {"total": 6}}, {"runs": {"total": 1}}]}
//!     ]}]
//! }"#).unwrap();
//!
//! assert!(matches(&record, &["India", "Pakistan"], None));
//!
//! let per_over = runs_per_over(&record);
//! assert_eq!(per_over.get(1), 7);
//! assert_eq!(per_over.get(2), 7);
//! ```

pub mod aggregate;
pub mod filter;

pub use aggregate::{aggregate_runs, runs_per_innings_over, runs_per_over, InningsOverRuns, OverRuns, RunsComponent};
pub use filter::{filter_matches, matches, MatchFilter};
