//! Delimited-text loading into [`OrderTable`]s.
//!
//! Cells are read verbatim: no trimming, no type inference. The status
//! filter downstream is an exact string match, so normalizing here would
//! change which rows count as delivered.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::data::orders::{OrderTable, RowOrigin};
use crate::error::IndentError;
use crate::Result;

/// Options for loading order files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter; `None` picks one from the file extension
    pub delimiter: Option<u8>,
}

impl LoadOptions {
    /// Create default options (delimiter chosen per file).
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Resolve the delimiter for a path: the forced one, else tab for `.tsv`,
    /// else comma.
    pub fn delimiter_for(&self, path: &Path) -> u8 {
        if let Some(d) = self.delimiter {
            return d;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        }
    }
}

/// Load orders from a reader containing delimited text with a header row.
///
/// `source_name` labels rows for error messages.
pub fn load_orders<R: Read>(reader: R, source_name: &str, delimiter: u8) -> Result<OrderTable> {
    let csv_error = |e: csv::Error| IndentError::Csv {
        source_name: source_name.to_string(),
        message: e.to_string(),
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    let mut table = OrderTable::with_columns(
        headers
            .iter()
            .enumerate()
            .map(|(i, h)| if i == 0 { h.trim_start_matches('\u{feff}') } else { h }),
    );

    for result in csv_reader.records() {
        let record = result.map_err(csv_error)?;
        let origin = record.position().map(|p| RowOrigin {
            source: source_name.to_string(),
            line: p.line(),
        });
        let cells = record.iter().map(|c| Some(c.to_string())).collect();
        table.push_row_with_origin(cells, origin);
    }

    debug!(
        source = source_name,
        rows = table.len(),
        columns = table.columns.len(),
        "loaded orders"
    );
    Ok(table)
}

/// Load orders from a single file.
pub fn load_orders_file(path: impl AsRef<Path>, options: &LoadOptions) -> Result<OrderTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IndentError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_orders(
        file,
        &path.display().to_string(),
        options.delimiter_for(path),
    )
}

/// Load and concatenate several files, in order.
///
/// Columns are aligned by name; rows are never merged or deduplicated, so
/// the same SKU in two files is simply aggregated by the engine later.
pub fn load_orders_files<P: AsRef<Path>>(
    paths: &[P],
    options: &LoadOptions,
) -> Result<OrderTable> {
    let mut combined = OrderTable::default();
    for path in paths {
        let table = load_orders_file(path, options)?;
        combined.concat(table);
    }
    Ok(combined)
}
