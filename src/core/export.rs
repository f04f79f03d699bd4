// LogLens - core/export.rs
//
// CSV and JSON export of the current result set.
// Core layer: writes to any Write trait object.

use crate::core::model::ResultSet;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Text form of a cell: scalars render plainly, strings without
/// quotes, nested objects/arrays as compact JSON.
pub fn cell_text(row: &serde_json::Value, column: &str) -> String {
    let value = if row.is_object() {
        row.get(column)
    } else {
        // Non-object rows render under the synthetic `value` column.
        Some(row)
    };
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Export a result set to CSV. The header row is the derived column
/// set; returns the number of data rows written.
pub fn export_csv<W: Write>(
    results: &ResultSet,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(&results.columns)
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for row in &results.rows {
        let record: Vec<String> = results
            .columns
            .iter()
            .map(|col| cell_text(row, col))
            .collect();
        csv_writer
            .write_record(&record)
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export a result set to JSON (array of row objects).
pub fn export_json<W: Write>(
    results: &ResultSet,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, &results.rows).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(results.rows.len())
}
