//! Preprocessing Module - raw alert export to typed events
//!
//! Pipeline:
//! 1. drop rows without signature / MITRE id
//! 2. drop sparse columns, then the fixed noise columns
//! 3. normalize `_time`
//! 4. explode newline-separated MITRE ids into one row each
//! 5. categorize `process_path`
//! 6. keep the analysis columns only

pub mod columns;
pub mod paths;
pub mod encoding;
pub mod scaler;

use crate::constants::{
    COL_EVENT_TYPE, COL_MITRE_ID, COL_PARENT_PROCESS_ID, COL_PROCESS_ID, COL_PROCESS_PATH,
    COL_SEVERITY, COL_SIGNATURE, COL_TAG, COL_TIME,
};
use crate::error::AnalysisResult;
use crate::logic::config::AnalysisConfig;
use crate::logic::dataset::record::Event;
use crate::logic::dataset::table::RawTable;
use crate::logic::dataset::timestamp::parse_timestamp;

pub use encoding::{label_encode, one_hot_encode, EncodedMatrix};
use paths::{categorize_path, PathCategory};
pub use scaler::StandardScaler;

pub const COL_PATH_CATEGORY: &str = "path_category_detailed";

/// Columns kept after preprocessing, in output order
pub const ANALYSIS_COLUMNS: &[&str] = &[
    COL_SIGNATURE,
    COL_MITRE_ID,
    COL_TIME,
    COL_PARENT_PROCESS_ID,
    COL_PROCESS_ID,
    COL_PATH_CATEGORY,
    COL_SEVERITY,
    COL_EVENT_TYPE,
    COL_TAG,
];

/// Clean a raw alert export. Never fails: problems with single columns are
/// logged and the column is left as it was.
pub fn preprocess_alerts(mut table: RawTable, config: &AnalysisConfig) -> RawTable {
    if table.headers.is_empty() {
        return table;
    }

    let removed = columns::drop_missing_rows(&mut table, &[COL_MITRE_ID, COL_SIGNATURE]);
    if removed > 0 {
        log::info!("Dropped {} rows without signature or MITRE id", removed);
    }

    columns::drop_sparse_columns(&mut table, config.max_missing_values);
    columns::drop_columns(&mut table, &config.columns_to_drop);
    columns::coerce_datetime(&mut table, COL_TIME);
    columns::explode_lines(&mut table, COL_MITRE_ID);
    add_path_categories(&mut table);

    let table = table.select(ANALYSIS_COLUMNS);
    log::info!("Preprocessed alerts: {} rows, {} columns", table.len(), table.headers.len());
    table
}

fn add_path_categories(table: &mut RawTable) {
    let path_idx = table.column_index(COL_PROCESS_PATH);
    if path_idx.is_none() {
        log::warn!("Column {} not found, every path categorized as Other", COL_PROCESS_PATH);
    }

    table.headers.push(COL_PATH_CATEGORY.to_string());
    for row in &mut table.rows {
        let category = match path_idx {
            Some(i) => categorize_path(&row[i]),
            None => PathCategory::Other,
        };
        row.push(category.as_str().to_string());
    }
}

/// Build typed events from a preprocessed table, ordered by timestamp.
///
/// `_time`, `signature` and `severity_id` are required columns; rows whose
/// timestamp or severity does not parse are skipped with a warning.
pub fn events_from_table(table: &RawTable) -> AnalysisResult<Vec<Event>> {
    if table.headers.is_empty() {
        return Ok(Vec::new());
    }

    let time_idx = table.require_column(COL_TIME)?;
    let sig_idx = table.require_column(COL_SIGNATURE)?;
    let sev_idx = table.require_column(COL_SEVERITY)?;
    let optional = |name: &str| table.column_index(name);
    let mitre_idx = optional(COL_MITRE_ID);
    let type_idx = optional(COL_EVENT_TYPE);
    let tag_idx = optional(COL_TAG);
    let path_idx = optional(COL_PATH_CATEGORY);
    let pid_idx = optional(COL_PROCESS_ID);
    let ppid_idx = optional(COL_PARENT_PROCESS_ID);

    let cell = |row: &Vec<String>, idx: Option<usize>| -> String {
        idx.map(|i| row[i].trim().to_string()).unwrap_or_default()
    };

    let mut events = Vec::with_capacity(table.len());
    let mut skipped = 0usize;

    for row in &table.rows {
        let Ok(timestamp) = parse_timestamp(&row[time_idx]) else {
            skipped += 1;
            continue;
        };
        let Ok(severity) = row[sev_idx].trim().parse::<f64>() else {
            skipped += 1;
            continue;
        };

        events.push(Event {
            mitre_id: cell(row, mitre_idx),
            event_type: cell(row, type_idx),
            tag: cell(row, tag_idx),
            path_category: cell(row, path_idx),
            process_id: cell(row, pid_idx),
            parent_process_id: cell(row, ppid_idx),
            ..Event::new(timestamp, row[sig_idx].trim(), severity)
        });
    }

    if skipped > 0 {
        log::warn!("Skipped {} rows with unparseable timestamp or severity", skipped);
    }

    // exports are often newest-first
    events.sort_by_key(|e| e.timestamp);
    Ok(events)
}
