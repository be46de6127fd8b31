//! Column-level transforms on raw alert tables.

use crate::logic::dataset::table::RawTable;
use crate::logic::dataset::timestamp::parse_timestamp;

/// Cells treated as missing values
pub fn is_missing(cell: &str) -> bool {
    let c = cell.trim();
    c.is_empty() || c.eq_ignore_ascii_case("nan") || c.eq_ignore_ascii_case("null")
}

/// Drop the named columns; names that are not present are ignored.
pub fn drop_columns(table: &mut RawTable, names: &[String]) {
    for name in names {
        if let Some(idx) = table.column_index(name) {
            table.remove_column(idx);
        }
    }
}

/// Drop every column with more than `max_missing` missing cells.
/// Returns the names of the dropped columns.
pub fn drop_sparse_columns(table: &mut RawTable, max_missing: usize) -> Vec<String> {
    let sparse: Vec<String> = (0..table.headers.len())
        .filter(|&i| table.column_values(i).filter(|c| is_missing(c)).count() > max_missing)
        .map(|i| table.headers[i].clone())
        .collect();

    drop_columns(table, &sparse);
    if !sparse.is_empty() {
        log::debug!("Dropped {} sparse columns: {:?}", sparse.len(), sparse);
    }
    sparse
}

/// Drop rows where any of the given columns is missing. Unknown columns count as missing.
pub fn drop_missing_rows(table: &mut RawTable, required: &[&str]) -> usize {
    let indices: Vec<Option<usize>> = required.iter().map(|n| table.column_index(n)).collect();
    let before = table.len();

    table.rows.retain(|row| {
        indices
            .iter()
            .all(|idx| idx.map_or(false, |i| !is_missing(&row[i])))
    });

    before - table.len()
}

/// Normalize a timestamp column to RFC 3339.
///
/// All-or-nothing: if any cell fails to parse the error is logged and the
/// column is left exactly as it was.
pub fn coerce_datetime(table: &mut RawTable, column: &str) -> bool {
    let Some(idx) = table.column_index(column) else {
        log::error!("An error occurred while converting {} to datetime: column not found", column);
        return false;
    };

    let mut converted = Vec::with_capacity(table.len());
    for row in &table.rows {
        match parse_timestamp(&row[idx]) {
            Ok(ts) => converted.push(ts.to_rfc3339()),
            Err(e) => {
                log::error!("An error occurred while converting {} to datetime: {}", column, e);
                return false;
            }
        }
    }

    for (row, value) in table.rows.iter_mut().zip(converted) {
        row[idx] = value;
    }
    true
}

/// Split a multi-valued column on newlines and emit one row per value.
/// Rows without a value in the column are kept once, unchanged.
pub fn explode_lines(table: &mut RawTable, column: &str) {
    let Some(idx) = table.column_index(column) else {
        return;
    };

    let mut exploded = Vec::with_capacity(table.len());
    for row in table.rows.drain(..) {
        let parts: Vec<String> = row[idx]
            .split('\n')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() <= 1 {
            let mut row = row;
            if let Some(single) = parts.into_iter().next() {
                row[idx] = single;
            }
            exploded.push(row);
            continue;
        }

        for part in parts {
            let mut copy = row.clone();
            copy[idx] = part;
            exploded.push(copy);
        }
    }
    table.rows = exploded;
}
