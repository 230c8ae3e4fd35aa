//! The indent engine: filter, aggregate, compute, sort.
//!
//! The pipeline is:
//! 1. Schema check (all required columns present)
//! 2. Filter rows whose status is exactly `"Delivered"`
//! 3. Group by SKU in ascending SKU order, summing quantity and price;
//!    rows with a blank SKU are dropped
//! 4. Apply the indent formula per group
//! 5. Stable sort ascending by `total_indent`
//!
//! The engine is a pure function: no I/O, no shared state.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::data::orders::{
    OrderRecord, OrderTable, DELIVERED, NAME, PRICE, QUANTITY, SKU, STATUS,
};
use crate::data::result::{IndentReport, IndentResult};
use crate::error::IndentError;
use crate::Result;

use super::params::IndentParams;

/// Column positions of the required fields within a table.
struct Schema {
    sku: usize,
    status: usize,
    quantity: usize,
    price: usize,
    name: usize,
}

impl Schema {
    fn resolve(table: &OrderTable) -> Result<Self> {
        let find = |column: &str| {
            table.column_index(column).ok_or_else(|| IndentError::Schema {
                column: column.to_string(),
            })
        };
        Ok(Self {
            sku: find(SKU)?,
            status: find(STATUS)?,
            quantity: find(QUANTITY)?,
            price: find(PRICE)?,
            name: find(NAME)?,
        })
    }
}

/// Running totals for one SKU.
struct Group {
    sku: String,
    name: String,
    quantity: f64,
    price: f64,
}

/// Compute indents for every delivered SKU in `orders`.
///
/// Groups are ordered by SKU before sorting, so rows with equal
/// `total_indent` come out in ascending SKU order. Delivered rows with an
/// empty or absent SKU are counted but not grouped.
///
/// # Errors
///
/// - [`IndentError::Schema`] if a required column is missing
/// - [`IndentError::Type`] if a delivered row has a non-numeric quantity or price
/// - [`IndentError::InvalidParameter`] if a parameter is outside `[0, 20]`
///
/// # Example
///
/// ```rust
/// use indentlib::{compute_indent, IndentParams, OrderRecord, OrderTable};
///
/// let orders = OrderTable::from_records(&[
///     OrderRecord::new("A001", "Delivered", 10.0, 100.0, "Widget"),
///     OrderRecord::new("A001", "Delivered", 5.0, 50.0, "Widget"),
///     OrderRecord::new("B002", "Cancelled", 99.0, 999.0, "Gadget"),
/// ]);
/// let report = compute_indent(&orders, &IndentParams::default()).unwrap();
///
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.rows[0].sku, "A001");
/// assert_eq!(report.rows[0].quantity, 15.0);
/// assert!((report.rows[0].total_indent - 24.4392).abs() < 1e-9);
/// ```
pub fn compute_indent(orders: &OrderTable, params: &IndentParams) -> Result<IndentReport> {
    params.validate()?;
    let schema = Schema::resolve(orders)?;

    let mut groups: BTreeMap<String, Group> = BTreeMap::new();
    let mut delivered_rows = 0;

    for row_idx in 0..orders.len() {
        if !is_delivered(orders.cell(row_idx, schema.status)) {
            continue;
        }
        delivered_rows += 1;

        let quantity = parse_numeric(orders, row_idx, schema.quantity, QUANTITY)?;
        let price = parse_numeric(orders, row_idx, schema.price, PRICE)?;
        let sku = match orders.cell(row_idx, schema.sku) {
            Some(sku) if !sku.is_empty() => sku,
            _ => {
                debug!(row = row_idx, "skipping delivered row without sku");
                continue;
            }
        };

        match groups.get_mut(sku) {
            Some(group) => {
                group.quantity += quantity;
                group.price += price;
            }
            None => {
                groups.insert(
                    sku.to_string(),
                    Group {
                        sku: sku.to_string(),
                        name: orders
                            .cell(row_idx, schema.name)
                            .unwrap_or_default()
                            .to_string(),
                        quantity,
                        price,
                    },
                );
            }
        }
    }

    debug!(
        input_rows = orders.len(),
        delivered_rows,
        skus = groups.len(),
        "aggregated delivered orders"
    );

    let mut rows: Vec<IndentResult> = groups
        .into_values()
        .map(|g| {
            let total_indent = params.indent_for(g.quantity);
            IndentResult {
                sku_name: IndentResult::label(&g.sku, &g.name),
                sku: g.sku,
                quantity: g.quantity,
                price: g.price,
                name: g.name,
                total_indent,
            }
        })
        .collect();

    // sort_by is stable; ties (including -0.0 vs 0.0) keep sku order
    rows.sort_by(|a, b| {
        a.total_indent
            .partial_cmp(&b.total_indent)
            .unwrap_or(Ordering::Equal)
    });

    if rows.is_empty() {
        warn!(input_rows = orders.len(), "no delivered orders found");
    }

    Ok(IndentReport {
        rows,
        input_rows: orders.len(),
        delivered_rows,
        params: *params,
    })
}

/// Whether a status cell marks a fulfilled order (exact match, no trimming).
pub fn is_delivered(status: Option<&str>) -> bool {
    status == Some(DELIVERED)
}

/// Compute indents from typed records.
pub fn compute_indent_records(
    records: &[OrderRecord],
    params: &IndentParams,
) -> Result<IndentReport> {
    compute_indent(&OrderTable::from_records(records), params)
}

/// Parse a numeric cell of a retained row.
///
/// Absent, empty, non-numeric and non-finite values are all rejected.
fn parse_numeric(table: &OrderTable, row: usize, column: usize, name: &str) -> Result<f64> {
    let raw = table.cell(row, column);
    match raw.and_then(|s| s.trim().parse::<f64>().ok()) {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(IndentError::Type {
            row,
            origin: table.rows[row].origin.clone(),
            column: name.to_string(),
            value: raw.map(str::to_string),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::orders::RowOrigin;

    fn rec(sku: &str, status: &str, quantity: f64, price: f64, name: &str) -> OrderRecord {
        OrderRecord::new(sku, status, quantity, price, name)
    }

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn test_example_scenario() {
        let orders = vec![
            rec("A001", "Delivered", 10.0, 100.0, "Widget"),
            rec("A001", "Delivered", 5.0, 50.0, "Widget"),
            rec("B002", "Cancelled", 99.0, 999.0, "Gadget"),
        ];
        let report = compute_indent_records(&orders, &IndentParams::default()).unwrap();

        assert_eq!(report.len(), 1);
        let row = &report.rows[0];
        assert_eq!(row.sku, "A001");
        assert_eq!(row.quantity, 15.0);
        assert_eq!(row.price, 150.0);
        assert_eq!(row.name, "Widget");
        assert_eq!(row.sku_name, "A001 - Widget");
        assert!((row.total_indent - 24.4392).abs() < 1e-9);
        assert_eq!(report.input_rows, 3);
        assert_eq!(report.delivered_rows, 2);
    }

    #[test]
    fn test_status_filter_is_exact() {
        let orders = vec![
            rec("A", "delivered", 1.0, 1.0, "a"),
            rec("B", "DELIVERED", 1.0, 1.0, "b"),
            rec("C", " Delivered", 1.0, 1.0, "c"),
            rec("D", "Delivered ", 1.0, 1.0, "d"),
            rec("E", "", 1.0, 1.0, "e"),
            rec("F", "Delivered", 1.0, 1.0, "f"),
        ];
        let report = compute_indent_records(&orders, &IndentParams::default()).unwrap();
        let skus: Vec<&str> = report.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["F"]);
    }

    #[test]
    fn test_first_name_wins() {
        let orders = vec![
            rec("A", "Delivered", 1.0, 1.0, "First"),
            rec("A", "Cancelled", 1.0, 1.0, "Cancelled Name"),
            rec("A", "Delivered", 1.0, 1.0, "Second"),
        ];
        let report = compute_indent_records(&orders, &IndentParams::default()).unwrap();
        assert_eq!(report.rows[0].name, "First");
        assert_eq!(report.rows[0].quantity, 2.0);
    }

    #[test]
    fn test_first_delivered_name_wins_over_earlier_cancelled() {
        let orders = vec![
            rec("A", "Cancelled", 1.0, 1.0, "Old"),
            rec("A", "Delivered", 1.0, 1.0, "New"),
        ];
        let report = compute_indent_records(&orders, &IndentParams::default()).unwrap();
        assert_eq!(report.rows[0].name, "New");
    }

    #[test]
    fn test_sorted_ascending() {
        let orders = vec![
            rec("BIG", "Delivered", 100.0, 1.0, "b"),
            rec("SMALL", "Delivered", 1.0, 1.0, "s"),
            rec("MID", "Delivered", 10.0, 1.0, "m"),
        ];
        let report = compute_indent_records(&orders, &IndentParams::default()).unwrap();
        let skus: Vec<&str> = report.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["SMALL", "MID", "BIG"]);
    }

    #[test]
    fn test_ties_come_out_in_sku_order() {
        let orders = vec![
            rec("Z", "Delivered", 5.0, 1.0, "z"),
            rec("A", "Delivered", 5.0, 1.0, "a"),
            rec("M", "Delivered", 5.0, 1.0, "m"),
        ];
        let report = compute_indent_records(&orders, &IndentParams::default()).unwrap();
        let skus: Vec<&str> = report.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["A", "M", "Z"]);
    }

    #[test]
    fn test_signed_zero_indents_are_ties() {
        let params = IndentParams::default().shortfall(-0.0);
        let orders = vec![
            rec("P", "Delivered", 0.0, 1.0, "p"),
            rec("N", "Delivered", -0.0, 1.0, "n"),
            rec("A", "Delivered", 0.0, 1.0, "a"),
        ];
        let report = compute_indent_records(&orders, &params).unwrap();

        assert!(report.rows[1].total_indent.is_sign_negative());
        let skus: Vec<&str> = report.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["A", "N", "P"]);
    }

    #[test]
    fn test_blank_sku_rows_are_dropped() {
        let mut table = OrderTable::with_columns(["sku", "status", "quantity", "price", "name"]);
        table.push_row(cells(&["", "Delivered", "3", "1", "Widget"]));
        table.push_row(vec![
            None,
            Some("Delivered".to_string()),
            Some("2".to_string()),
            Some("1".to_string()),
            Some("Gadget".to_string()),
        ]);
        table.push_row(cells(&["A", "Delivered", "1", "1", "Apple"]));

        let report = compute_indent(&table, &IndentParams::default()).unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report.rows[0].sku_name, "A - Apple");
        assert_eq!(report.delivered_rows, 3);
    }

    #[test]
    fn test_blank_sku_row_still_needs_numeric_values() {
        let mut table = OrderTable::with_columns(["sku", "status", "quantity", "price", "name"]);
        table.push_row(cells(&["", "Delivered", "ten", "1", "Widget"]));
        let err = compute_indent(&table, &IndentParams::default()).unwrap_err();
        assert!(matches!(err, IndentError::Type { .. }));
    }

    #[test]
    fn test_is_delivered_exact_match() {
        assert!(is_delivered(Some("Delivered")));
        assert!(!is_delivered(Some("delivered")));
        assert!(!is_delivered(Some(" Delivered")));
        assert!(!is_delivered(None));
    }

    #[test]
    fn test_empty_input() {
        let report = compute_indent_records(&[], &IndentParams::default()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.input_rows, 0);
    }

    #[test]
    fn test_no_delivered_rows_is_empty_not_error() {
        let orders = vec![rec("A", "Cancelled", 1.0, 1.0, "a")];
        let report = compute_indent_records(&orders, &IndentParams::default()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.delivered_rows, 0);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let mut table = OrderTable::with_columns(["sku", "status", "quantity", "name"]);
        table.push_row(cells(&["A", "Delivered", "1", "a"]));
        let err = compute_indent(&table, &IndentParams::default()).unwrap_err();
        assert!(matches!(err, IndentError::Schema { column } if column == "price"));
    }

    #[test]
    fn test_schema_checked_even_when_empty() {
        let table = OrderTable::with_columns(["sku"]);
        let err = compute_indent(&table, &IndentParams::default()).unwrap_err();
        assert!(matches!(err, IndentError::Schema { column } if column == "status"));
    }

    #[test]
    fn test_non_numeric_quantity_is_type_error() {
        let mut table = OrderTable::with_columns(["sku", "status", "quantity", "price", "name"]);
        table.push_row(cells(&["A", "Delivered", "1", "2", "a"]));
        table.push_row_with_origin(
            cells(&["B", "Delivered", "lots", "2", "b"]),
            Some(RowOrigin {
                source: "orders.csv".to_string(),
                line: 3,
            }),
        );
        let err = compute_indent(&table, &IndentParams::default()).unwrap_err();
        match err {
            IndentError::Type {
                row,
                origin,
                column,
                value,
            } => {
                assert_eq!(row, 1);
                assert_eq!(origin.map(|o| o.line), Some(3));
                assert_eq!(column, "quantity");
                assert_eq!(value.as_deref(), Some("lots"));
            }
            other => panic!("expected type error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_price_is_type_error() {
        let mut table = OrderTable::with_columns(["sku", "status", "quantity", "price", "name"]);
        table.push_row(cells(&["A", "Delivered", "1", "", "a"]));
        let err = compute_indent(&table, &IndentParams::default()).unwrap_err();
        assert!(matches!(err, IndentError::Type { ref column, .. } if column == "price"));
    }

    #[test]
    fn test_non_finite_is_type_error() {
        let mut table = OrderTable::with_columns(["sku", "status", "quantity", "price", "name"]);
        table.push_row(cells(&["A", "Delivered", "NaN", "1", "a"]));
        assert!(compute_indent(&table, &IndentParams::default()).is_err());
    }

    #[test]
    fn test_bad_numbers_in_filtered_rows_are_ignored() {
        let mut table = OrderTable::with_columns(["sku", "status", "quantity", "price", "name"]);
        table.push_row(cells(&["A", "Cancelled", "n/a", "n/a", "a"]));
        table.push_row(cells(&["B", "Delivered", "2", "3.5", "b"]));
        let report = compute_indent(&table, &IndentParams::default()).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.rows[0].price, 3.5);
    }

    #[test]
    fn test_numeric_cells_allow_surrounding_whitespace() {
        let mut table = OrderTable::with_columns(["sku", "status", "quantity", "price", "name"]);
        table.push_row(cells(&["A", "Delivered", " 4 ", "1e1", "a"]));
        let report = compute_indent(&table, &IndentParams::default()).unwrap();
        assert_eq!(report.rows[0].quantity, 4.0);
        assert_eq!(report.rows[0].price, 10.0);
    }

    #[test]
    fn test_absent_status_cell_is_not_delivered() {
        let mut table = OrderTable::with_columns(["sku", "status", "quantity", "price", "name"]);
        table.push_row(vec![Some("A".to_string()), None, Some("1".to_string())]);
        let report = compute_indent(&table, &IndentParams::default()).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_extra_columns_and_reordered_columns() {
        let mut table =
            OrderTable::with_columns(["order_id", "name", "price", "quantity", "status", "sku"]);
        table.push_row(cells(&["1", "Widget", "10", "3", "Delivered", "W1"]));
        let report = compute_indent(&table, &IndentParams::default()).unwrap();
        assert_eq!(report.rows[0].sku, "W1");
        assert_eq!(report.rows[0].quantity, 3.0);
        assert_eq!(report.rows[0].price, 10.0);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = IndentParams::default().buffer(21.0);
        let err = compute_indent_records(&[], &params).unwrap_err();
        assert!(matches!(err, IndentError::InvalidParameter { .. }));
    }

    #[test]
    fn test_closing_stock_can_make_indent_negative() {
        let params = IndentParams::default().closing_stock(20.0).shortfall(0.0);
        let orders = vec![rec("A", "Delivered", 1.0, 1.0, "a")];
        let report = compute_indent_records(&orders, &params).unwrap();
        assert!(report.rows[0].total_indent < 0.0);
    }

    #[test]
    fn test_report_carries_params() {
        let params = IndentParams::default().buffer(2.0);
        let report = compute_indent_records(&[], &params).unwrap();
        assert_eq!(report.params, params);
    }
}
