//! Order data: the tabular input to the indent engine.
//!
//! Orders arrive as rows with named columns. Cells are kept as the raw text
//! read from the source; numeric interpretation happens in the engine, and
//! only for rows that survive the status filter.
//!
//! A cell is `None` when the row came from a file that lacked that column
//! (tables built by concatenating files with different headers).

use serde::{Deserialize, Serialize};

/// Column holding the product identifier.
pub const SKU: &str = "sku";
/// Column holding the fulfillment status.
pub const STATUS: &str = "status";
/// Column holding the ordered quantity.
pub const QUANTITY: &str = "quantity";
/// Column holding the line price.
pub const PRICE: &str = "price";
/// Column holding the human-readable product name.
pub const NAME: &str = "name";

/// Columns the engine requires, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 5] = [SKU, STATUS, QUANTITY, PRICE, NAME];

/// The only status value counted as a fulfilled order.
pub const DELIVERED: &str = "Delivered";

/// Where a row came from: source name and 1-based line number (header is line 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOrigin {
    pub source: String,
    pub line: u64,
}

/// One row of an [`OrderTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    /// Cells aligned with [`OrderTable::columns`]
    pub cells: Vec<Option<String>>,
    /// Where the row was read from, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<RowOrigin>,
}

/// Rows with named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderTable {
    /// Column names, in first-seen order
    pub columns: Vec<String>,
    /// Data rows
    pub rows: Vec<OrderRow>,
}

impl OrderTable {
    /// Create an empty table with the given columns.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a table holding the given typed records.
    pub fn from_records(records: &[OrderRecord]) -> Self {
        let mut table = Self::with_columns(REQUIRED_COLUMNS);
        for record in records {
            table.push_row(vec![
                Some(record.sku.clone()),
                Some(record.status.clone()),
                Some(record.quantity.to_string()),
                Some(record.price.to_string()),
                Some(record.name.clone()),
            ]);
        }
        table
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Append a row without origin information.
    ///
    /// The row is padded with absent cells (or truncated) to the column count.
    pub fn push_row(&mut self, cells: Vec<Option<String>>) {
        self.push_row_with_origin(cells, None);
    }

    /// Append a row with an optional origin.
    pub fn push_row_with_origin(
        &mut self,
        mut cells: Vec<Option<String>>,
        origin: Option<RowOrigin>,
    ) {
        cells.resize(self.columns.len(), None);
        self.rows.push(OrderRow { cells, origin });
    }

    /// Cell value at (row, column), `None` if absent or out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(column))
            .and_then(|c| c.as_deref())
    }

    /// Concatenate another table onto this one, aligning columns by name.
    ///
    /// Columns only present in `other` are appended to this table's columns;
    /// existing rows get absent cells for them. Rows from `other` get absent
    /// cells for columns they lack. Rows are never merged or deduplicated.
    pub fn concat(&mut self, other: OrderTable) {
        let mut mapping: Vec<usize> = Vec::with_capacity(other.columns.len());
        for column in &other.columns {
            // a repeated header in `other` gets its own slot after the first
            let existing = self
                .columns
                .iter()
                .enumerate()
                .position(|(i, c)| c == column && !mapping.contains(&i));
            let idx = match existing {
                Some(idx) => idx,
                None => {
                    self.columns.push(column.clone());
                    self.columns.len() - 1
                }
            };
            mapping.push(idx);
        }

        let width = self.columns.len();
        for row in &mut self.rows {
            row.cells.resize(width, None);
        }

        for row in other.rows {
            let mut cells = vec![None; width];
            for (cell, &target) in row.cells.into_iter().zip(&mapping) {
                cells[target] = cell;
            }
            self.rows.push(OrderRow {
                cells,
                origin: row.origin,
            });
        }
    }
}

/// A typed order line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub sku: String,
    pub status: String,
    pub quantity: f64,
    pub price: f64,
    pub name: String,
}

impl OrderRecord {
    /// Create a record.
    pub fn new(
        sku: impl Into<String>,
        status: impl Into<String>,
        quantity: f64,
        price: f64,
        name: impl Into<String>,
    ) -> Self {
        Self {
            sku: sku.into(),
            status: status.into(),
            quantity,
            price,
            name: name.into(),
        }
    }
}
