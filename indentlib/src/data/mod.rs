//! Data model: order tables in, indent results out.
//!
//! This module holds the types that flow through the pipeline:
//!
//! - **Orders**: `OrderTable` (rows with named columns) and the typed `OrderRecord`
//! - **Results**: `IndentResult` per SKU and the `IndentReport` wrapping them
//!
//! ## Example
//!
//! ```rust
//! use indentlib::data::{OrderRecord, OrderTable};
//!
//! let table = OrderTable::from_records(&[
//!     OrderRecord::new("A001", "Delivered", 10.0, 100.0, "Widget"),
//! ]);
//! assert_eq!(table.len(), 1);
//! ```

pub mod orders;
pub mod result;

pub use orders::{OrderRecord, OrderRow, OrderTable, RowOrigin, DELIVERED, REQUIRED_COLUMNS};
pub use result::{IndentReport, IndentResult};
