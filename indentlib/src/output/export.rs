//! CSV export of an indent report.
//!
//! Layout: a header row whose first cell is blank (the index column),
//! followed by `sku,quantity,price,name,total_indent,sku_name`. Each data
//! row starts with its 0-based rank. Output is UTF-8, comma-delimited,
//! quoted only where needed.

use std::io::Write;

use crate::data::result::IndentReport;
use crate::error::IndentError;
use crate::Result;

/// File name offered for the export.
pub const EXPORT_FILE_NAME: &str = "updated_dataframe.csv";

/// MIME type of the export.
pub const EXPORT_MIME: &str = "text/csv";

/// Header row of the export.
pub const EXPORT_HEADER: [&str; 7] = [
    "",
    "sku",
    "quantity",
    "price",
    "name",
    "total_indent",
    "sku_name",
];

/// Write the report as CSV to `writer`.
pub fn write_csv_export<W: Write>(report: &IndentReport, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(EXPORT_HEADER).map_err(export_error)?;
    for (index, row) in report.iter().enumerate() {
        csv_writer
            .write_record([
                index.to_string(),
                row.sku.clone(),
                row.quantity.to_string(),
                row.price.to_string(),
                row.name.clone(),
                row.total_indent.to_string(),
                row.sku_name.clone(),
            ])
            .map_err(export_error)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render the report as CSV bytes.
pub fn to_csv_bytes(report: &IndentReport) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv_export(report, &mut buf)?;
    Ok(buf)
}

fn export_error(e: csv::Error) -> IndentError {
    IndentError::Csv {
        source_name: EXPORT_FILE_NAME.to_string(),
        message: e.to_string(),
    }
}
