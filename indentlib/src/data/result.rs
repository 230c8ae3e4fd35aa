//! Indent results: one computed row per SKU, plus the report that holds them.

use serde::{Deserialize, Serialize};

use crate::query::params::IndentParams;

/// Computed indent for a single SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndentResult {
    /// Product identifier
    pub sku: String,
    /// Sum of delivered quantities
    pub quantity: f64,
    /// Sum of delivered prices
    pub price: f64,
    /// Product name from the first delivered row for this SKU
    pub name: String,
    /// Display label: `"{sku} - {name}"`
    pub sku_name: String,
    /// Quantity to procure
    pub total_indent: f64,
}

impl IndentResult {
    /// Build the display label for a SKU/name pair.
    pub fn label(sku: &str, name: &str) -> String {
        format!("{} - {}", sku, name)
    }
}

/// Output of an indent computation.
///
/// `rows` are ordered by `total_indent` ascending. An empty report is a valid
/// outcome (no delivered orders), not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndentReport {
    /// Result rows, ascending by `total_indent`
    pub rows: Vec<IndentResult>,
    /// Number of rows in the input table
    pub input_rows: usize,
    /// Number of rows that passed the status filter
    pub delivered_rows: usize,
    /// Parameters the report was computed with
    pub params: IndentParams,
}

impl IndentReport {
    /// Number of result rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no delivered orders were found.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate result rows in ranked order.
    pub fn iter(&self) -> std::slice::Iter<'_, IndentResult> {
        self.rows.iter()
    }

    /// Sum of `total_indent` across all rows.
    pub fn total_indent_sum(&self) -> f64 {
        self.rows.iter().map(|r| r.total_indent).sum()
    }

    /// Sum of `quantity` across all rows.
    pub fn quantity_sum(&self) -> f64 {
        self.rows.iter().map(|r| r.quantity).sum()
    }

    /// Sum of `price` across all rows.
    pub fn price_sum(&self) -> f64 {
        self.rows.iter().map(|r| r.price).sum()
    }
}

impl<'a> IntoIterator for &'a IndentReport {
    type Item = &'a IndentResult;
    type IntoIter = std::slice::Iter<'a, IndentResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
