use std::path::{Path, PathBuf};

use crate::constants::COL_ATTACK_START;
use crate::error::AnalysisResult;
use crate::logic::dataset::reader::read_table;
use crate::logic::dataset::table::RawTable;
use crate::logic::dataset::timestamp::parse_timestamp;
use crate::logic::dataset::writer::write_table;

/// Merge several attack run logs into one CSV sorted by attack start.
/// Returns the number of attack rows written.
///
/// Columns are aligned by name across files; unreadable files contribute
/// nothing. Rows whose start cannot be parsed sort last, in input order.
pub fn unify_attack_logs(sources: &[PathBuf], target: &Path) -> AnalysisResult<usize> {
    let mut combined = RawTable::default();
    let mut file_count = 0;

    for source in sources {
        let table = read_table(source);
        if table.headers.is_empty() {
            continue;
        }
        combined.concat(table);
        file_count += 1;
    }

    sort_by_start(&mut combined)?;
    write_table(target, &combined)?;

    log::info!(
        "Unified {} attack logs ({} attacks) into {}",
        file_count,
        combined.len(),
        target.display()
    );
    Ok(combined.len())
}

fn sort_by_start(table: &mut RawTable) -> AnalysisResult<()> {
    if table.is_empty() {
        return Ok(());
    }
    let start_idx = table.require_column(COL_ATTACK_START)?;

    let mut keyed: Vec<_> = table
        .rows
        .drain(..)
        .map(|row| {
            let key = parse_timestamp(&row[start_idx]).ok();
            if key.is_none() {
                log::warn!("Unparseable attack start '{}'", row[start_idx]);
            }
            (key, row)
        })
        .collect();

    // stable: equal starts keep file order
    keyed.sort_by(|a, b| match (&a.0, &b.0) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    table.rows = keyed.into_iter().map(|(_, row)| row).collect();
    Ok(())
}
