//! Source loading: read order exports into tables.
//!
//! This module handles the first stage of the pipeline - turning one or more
//! delimited files into a single `OrderTable`. It provides:
//!
//! - **Loading**: `load_orders` (any reader), `load_orders_file`
//! - **Concatenation**: `load_orders_files`, aligning columns by name
//!
//! ## Example
//!
//! ```rust
//! use indentlib::source::load_orders;
//!
//! let csv = "sku,status,quantity,price,name\nA1,Delivered,2,20,Widget\n";
//! let table = load_orders(csv.as_bytes(), "inline", b',').unwrap();
//! assert_eq!(table.len(), 1);
//! ```

pub mod loader;

pub use loader::{load_orders, load_orders_file, load_orders_files, LoadOptions};
