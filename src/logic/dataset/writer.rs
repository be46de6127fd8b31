use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{AnalysisError, AnalysisResult};
use crate::logic::dataset::table::RawTable;

/// Write a string table back to CSV (header + rows)
pub fn write_table(path: &Path, table: &RawTable) -> AnalysisResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| AnalysisError::csv(path, e))?;
    writer
        .write_record(&table.headers)
        .map_err(|e| AnalysisError::csv(path, e))?;
    for row in &table.rows {
        writer.write_record(row).map_err(|e| AnalysisError::csv(path, e))?;
    }
    writer.flush().map_err(|e| AnalysisError::io(path, e))?;
    Ok(())
}

/// Write flat serde records as CSV. Header comes from the field names.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> AnalysisResult<usize> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| AnalysisError::csv(path, e))?;
    for record in records {
        writer.serialize(record).map_err(|e| AnalysisError::csv(path, e))?;
    }
    writer.flush().map_err(|e| AnalysisError::io(path, e))?;
    Ok(records.len())
}

/// Write nested records as JSONL (one JSON object per line)
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> AnalysisResult<usize> {
    let file = File::create(path).map_err(|e| AnalysisError::io(path, e))?;
    let mut out = BufWriter::new(file);
    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(out, "{}", json).map_err(|e| AnalysisError::io(path, e))?;
    }
    out.flush().map_err(|e| AnalysisError::io(path, e))?;
    Ok(records.len())
}
