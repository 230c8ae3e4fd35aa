//! Output formatting: present indent reports.
//!
//! This module handles the final stage of the pipeline - formatting results
//! for display and download. It provides:
//!
//! - **IndentTable**: Table-ready data structure with headers, rows, and footer
//! - **IndentChart**: Ranked horizontal bars with two-decimal labels
//! - **Export**: The downloadable CSV (`updated_dataframe.csv`, `text/csv`)
//!
//! Everything here is pure presentation. All filtering, aggregation, and
//! sorting happens in the query stage.

pub mod chart;
pub mod export;
pub mod table;

pub use chart::{ChartBar, IndentChart, DEFAULT_CHART_WIDTH};
pub use export::{to_csv_bytes, write_csv_export, EXPORT_FILE_NAME, EXPORT_HEADER, EXPORT_MIME};
pub use table::{IndentTable, TableRow};
