use std::fs::File;
use std::io;
use std::path::Path;

use crate::constants::{COL_ATTACK_CODE, COL_ATTACK_END, COL_ATTACK_START};
use crate::error::{AnalysisError, AnalysisResult};
use crate::logic::dataset::record::AttackInterval;
use crate::logic::dataset::table::RawTable;
use crate::logic::dataset::timestamp::parse_timestamp;

/// Read a CSV export into a string table.
///
/// A missing, empty or unreadable file is logged and yields an empty table so
/// that one bad export never aborts a batch.
pub fn read_table(path: &Path) -> RawTable {
    match try_read_table(path) {
        Ok(table) => {
            if table.headers.is_empty() {
                log::warn!("File {} is empty.", path.display());
            } else {
                log::debug!("Read {} rows from {}", table.len(), path.display());
            }
            table
        }
        Err(AnalysisError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            log::error!("File {} not found.", path.display());
            RawTable::default()
        }
        Err(e) => {
            log::error!("An error occurred while reading {}: {}", path.display(), e);
            RawTable::default()
        }
    }
}

/// Strict variant of [`read_table`]
pub fn try_read_table(path: &Path) -> AnalysisResult<RawTable> {
    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AnalysisError::csv(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Ok(RawTable::default());
    }

    let mut table = RawTable::new(headers);
    for record in reader.records() {
        let record = record.map_err(|e| AnalysisError::csv(path, e))?;
        table.push_row(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(table)
}

/// Parse an attack run log (`Codice attacco`, `Data inizio attacco`, `Data fine attacco`).
///
/// Header matching ignores case, spaces and underscores. A missing file gives
/// an empty log; a malformed timestamp is an error.
pub fn read_attack_log(path: &Path) -> AnalysisResult<Vec<AttackInterval>> {
    let table = read_table(path);
    if table.headers.is_empty() {
        return Ok(Vec::new());
    }
    attack_log_from_table(&table)
}

pub fn attack_log_from_table(table: &RawTable) -> AnalysisResult<Vec<AttackInterval>> {
    let code_idx = table.require_column(COL_ATTACK_CODE)?;
    let start_idx = table.require_column(COL_ATTACK_START)?;
    let end_idx = table.require_column(COL_ATTACK_END)?;

    let mut attacks = Vec::with_capacity(table.len());
    for row in &table.rows {
        let start = parse_timestamp(&row[start_idx])?;
        let end = parse_timestamp(&row[end_idx])?;
        if end < start {
            log::warn!(
                "Attack {} ends before it starts ({} < {})",
                row[code_idx], end, start
            );
        }
        attacks.push(AttackInterval::new(row[code_idx].trim(), start, end));
    }

    log::info!("Parsed {} attacks from run log", attacks.len());
    Ok(attacks)
}
