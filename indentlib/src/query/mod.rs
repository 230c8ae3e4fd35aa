//! Query processing: turn order tables into ranked indent results.
//!
//! This module handles the core stage of the pipeline. It provides:
//!
//! - **Params**: the tunable multipliers (`IndentParams`)
//! - **Engine**: `compute_indent`, which filters, aggregates, applies the
//!   formula and sorts
//!
//! ## Example
//!
//! ```rust
//! use indentlib::query::{compute_indent_records, IndentParams};
//! use indentlib::OrderRecord;
//!
//! let params = IndentParams::default().buffer(1.1).closing_stock(2.0);
//! let report = compute_indent_records(
//!     &[OrderRecord::new("A1", "Delivered", 3.0, 30.0, "Widget")],
//!     &params,
//! )
//! .unwrap();
//! assert_eq!(report.len(), 1);
//! ```

pub mod engine;
pub mod params;

pub use engine::{compute_indent, compute_indent_records, is_delivered};
pub use params::{load_params_file, IndentParams, PARAM_MAX, PARAM_MIN};
