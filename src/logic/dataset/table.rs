//! Untyped string table as read from a CSV export.
//!
//! Only lives between the reader and the preprocessing step; everything after
//! that works on typed records.

use crate::error::{AnalysisError, AnalysisResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Push a row, padding or truncating it to the header width
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Lookup that ignores case, spaces and underscores ("Data inizio attacco" == "data_inizio_attacco")
    pub fn column_index_loose(&self, name: &str) -> Option<usize> {
        let wanted = normalize_header(name);
        self.headers.iter().position(|h| normalize_header(h) == wanted)
    }

    pub fn require_column(&self, name: &str) -> AnalysisResult<usize> {
        self.column_index_loose(name)
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))
    }

    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |r| r[index].as_str())
    }

    /// Remove a column by position
    pub fn remove_column(&mut self, index: usize) {
        self.headers.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }
    }

    /// Keep only the named columns, in the given order. Missing names are skipped.
    pub fn select(&self, names: &[&str]) -> RawTable {
        let indices: Vec<usize> = names.iter().filter_map(|n| self.column_index(n)).collect();
        RawTable {
            headers: indices.iter().map(|&i| self.headers[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| indices.iter().map(|&i| r[i].clone()).collect())
                .collect(),
        }
    }

    /// Append another table, aligning columns by name. New columns are added
    /// at the end and filled with empty cells for earlier rows.
    pub fn concat(&mut self, other: RawTable) {
        for header in &other.headers {
            if self.column_index(header).is_none() {
                self.headers.push(header.clone());
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }

        let mapping: Vec<usize> = other
            .headers
            .iter()
            .filter_map(|h| self.column_index(h))
            .collect();

        for row in other.rows {
            let mut aligned = vec![String::new(); self.headers.len()];
            for (cell, &target) in row.into_iter().zip(mapping.iter()) {
                aligned[target] = cell;
            }
            self.rows.push(aligned);
        }
    }
}

fn normalize_header(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect()
}
