//! Reporting and plotting helpers.
//!
//! Plots are small helper functions converting evaluation results into
//! `plotly::Plot`s, written either as standalone HTML figures or embedded
//! in an HTML report. The markdown summary and the plain-text metrics file
//! are rendered from the same evaluation results.
pub mod html;
pub mod plots;
pub mod summary;

pub use html::{Report, ReportSection};
pub use plots::{render_confusion, render_roc};
pub use summary::{write_metrics, write_summary, ReportEntry};
