//! # indentlib
//!
//! A procurement indent calculator: computes how much of each product to
//! replenish from historical order data.
//!
//! ## Overview
//!
//! The library works as a four-stage pipeline:
//!
//! - **Source**: Read one or more delimited order exports into an `OrderTable`
//! - **Data**: Orders in (`OrderTable`, `OrderRecord`), results out (`IndentReport`)
//! - **Query**: Filter delivered orders, aggregate per SKU, apply the indent
//!   formula, and rank ascending (`compute_indent`)
//! - **Output**: Presentation-ready table, bar chart data, and CSV export
//!
//! The indent formula multiplies aggregated quantity by seven demand factors,
//! subtracts closing stock, and adds a fixed shortfall:
//!
//! ```text
//! total_indent = quantity * weekend_multiplier * marketing_spend_variable
//!              * retention_projection * festival_offer * offer_on_product
//!              * market_closure * buffer - closing_stock + shortfall
//! ```
//!
//! ## Features
//!
//! - **Exact status filter**: only `"Delivered"` counts, no normalization
//! - **Deterministic ranking**: stable ascending sort, ties in SKU order
//! - **Strict numerics**: non-numeric quantities or prices fail loudly with the
//!   offending row and column
//! - **Pure data types**: the engine does no I/O
//!
//! ## Example
//!
//! ```rust
//! use indentlib::{compute_indent, load_orders, IndentParams, IndentTable};
//!
//! let csv = "sku,status,quantity,price,name\n\
//!            A001,Delivered,10,100,Widget\n\
//!            A001,Delivered,5,50,Widget\n\
//!            B002,Cancelled,99,999,Gadget\n";
//! let orders = load_orders(csv.as_bytes(), "orders.csv", b',').unwrap();
//!
//! let report = compute_indent(&orders, &IndentParams::default()).unwrap();
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.rows[0].sku_name, "A001 - Widget");
//!
//! let table = IndentTable::from_report(&report);
//! assert_eq!(table.rows[0].values[2], "24.44");
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod source;

pub use data::{IndentReport, IndentResult, OrderRecord, OrderRow, OrderTable, RowOrigin};
pub use error::IndentError;
pub use output::{
    to_csv_bytes, write_csv_export, IndentChart, IndentTable, TableRow, EXPORT_FILE_NAME,
    EXPORT_MIME,
};
pub use query::{
    compute_indent, compute_indent_records, is_delivered, load_params_file, IndentParams,
};
pub use source::{load_orders, load_orders_file, load_orders_files, LoadOptions};

/// Result type for indentlib operations
pub type Result<T> = std::result::Result<T, IndentError>;
