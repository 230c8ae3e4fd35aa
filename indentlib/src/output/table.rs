//! Table-ready data structures for indent output.
//!
//! This module provides `IndentTable`, a presentation-ready data structure
//! that can be directly consumed by templates or serialized to JSON.
//!
//! The data flow is:
//! 1. Raw Data (OrderTable)
//! 2. IndentReport (filtered, aggregated, sorted)
//! 3. IndentTable (formatted strings for display)
//!
//! IndentTable is a pure presentation layer - it only formats data, no
//! filtering or sorting logic.

use serde::{Deserialize, Serialize};

use crate::data::result::IndentReport;

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label (`"SKU - Name"` or `"Total (N skus)"`)
    pub label: String,
    /// Values for each numeric column (as strings, ready for display)
    pub values: Vec<String>,
}

/// Table-ready indent data.
///
/// Templates iterate over headers/rows/footer and apply formatting - no computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndentTable {
    /// Optional title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Column headers: [label_header, Quantity, Price, Total Indent]
    pub headers: Vec<String>,
    /// Data rows, in report order
    pub rows: Vec<TableRow>,
    /// Summary/footer row
    pub footer: TableRow,
}

impl IndentTable {
    /// Create an IndentTable from a report.
    ///
    /// The report is already sorted; this just formats numbers to two decimals.
    pub fn from_report(report: &IndentReport) -> Self {
        let headers = vec![
            "SKU - Product Name".to_string(),
            "Quantity".to_string(),
            "Price".to_string(),
            "Total Indent".to_string(),
        ];
        let rows: Vec<TableRow> = report
            .iter()
            .map(|r| TableRow {
                label: r.sku_name.clone(),
                values: format_values(r.quantity, r.price, r.total_indent),
            })
            .collect();
        let footer = TableRow {
            label: build_footer_label(rows.len()),
            values: format_values(
                report.quantity_sum(),
                report.price_sum(),
                report.total_indent_sum(),
            ),
        };

        IndentTable {
            title: Some("Total Indent by SKU".to_string()),
            headers,
            rows,
            footer,
        }
    }
}

fn build_footer_label(count: usize) -> String {
    if count == 1 {
        "Total (1 sku)".to_string()
    } else {
        format!("Total ({} skus)", count)
    }
}

fn format_values(quantity: f64, price: f64, total_indent: f64) -> Vec<String> {
    vec![
        format!("{:.2}", quantity),
        format!("{:.2}", price),
        format!("{:.2}", total_indent),
    ]
}
