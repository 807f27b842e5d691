//! Report output: the HTML outcome table, per-match over listings, and CSV export.

pub mod export;
pub mod html;
pub mod listing;

pub use export::{write_rows_csv, write_rows_csv_to};
pub use html::{escape_html, HtmlReport, ReportRow};
pub use listing::{write_innings_over_listing, write_over_listing};
