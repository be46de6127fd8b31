//! Categorical encoders
//!
//! Vocabularies are built once over the observed values and kept sorted, so
//! the same input always encodes to the same indices. Numeric fields sort by
//! value, text fields lexicographically.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use ndarray::Array2;

use crate::constants::{
    COL_EVENT_TYPE, COL_MITRE_ID, COL_PARENT_PROCESS_ID, COL_PROCESS_ID, COL_SEVERITY,
    COL_SIGNATURE, COL_TAG, COL_TIME,
};
use crate::error::{AnalysisError, AnalysisResult};
use crate::logic::dataset::record::Event;
use crate::logic::dataset::table::RawTable;

// ============================================================================
// EVENT FIELDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Signature,
    MitreId,
    ParentProcessId,
    ProcessId,
    PathCategory,
    Severity,
    EventType,
    Tag,
}

impl EventField {
    pub fn name(&self) -> &'static str {
        match self {
            EventField::Signature => COL_SIGNATURE,
            EventField::MitreId => COL_MITRE_ID,
            EventField::ParentProcessId => COL_PARENT_PROCESS_ID,
            EventField::ProcessId => COL_PROCESS_ID,
            EventField::PathCategory => "path_category_detailed",
            EventField::Severity => COL_SEVERITY,
            EventField::EventType => COL_EVENT_TYPE,
            EventField::Tag => COL_TAG,
        }
    }

    pub fn class_order(&self) -> ClassOrder {
        match self {
            EventField::ParentProcessId
            | EventField::ProcessId
            | EventField::Severity
            | EventField::EventType => ClassOrder::Numeric,
            _ => ClassOrder::Lexicographic,
        }
    }

    pub fn value(&self, event: &Event) -> String {
        match self {
            EventField::Signature => event.signature.clone(),
            EventField::MitreId => event.mitre_id.clone(),
            EventField::ParentProcessId => event.parent_process_id.clone(),
            EventField::ProcessId => event.process_id.clone(),
            EventField::PathCategory => event.path_category.clone(),
            EventField::Severity => event.severity.to_string(),
            EventField::EventType => event.event_type.clone(),
            EventField::Tag => event.tag.clone(),
        }
    }
}

/// Fields label-encoded for model training
pub const LABEL_ENCODED_FIELDS: &[EventField] = &[
    EventField::Signature,
    EventField::MitreId,
    EventField::ParentProcessId,
    EventField::ProcessId,
    EventField::PathCategory,
    EventField::Severity,
    EventField::EventType,
    EventField::Tag,
];

/// Fields one-hot encoded; process ids stay numeric
pub const ONE_HOT_FIELDS: &[EventField] = &[
    EventField::Signature,
    EventField::MitreId,
    EventField::PathCategory,
    EventField::Severity,
    EventField::EventType,
    EventField::Tag,
];

// ============================================================================
// LABEL ENCODER
// ============================================================================

/// How a vocabulary is sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassOrder {
    #[default]
    Lexicographic,
    /// By parsed value (decimal or `0x` hex); values that do not parse sort
    /// after every number, lexicographically among themselves
    Numeric,
}

impl ClassOrder {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            ClassOrder::Lexicographic => a.cmp(b),
            ClassOrder::Numeric => match (parse_numeric(a), parse_numeric(b)) {
                (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.cmp(b),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelEncoder {
    field: String,
    order: ClassOrder,
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<'a, I>(field: &str, order: ClassOrder, values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classes: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        classes.sort_by(|a, b| order.compare(a, b));
        classes.dedup();
        Self {
            field: field.to_string(),
            order,
            classes,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn transform(&self, value: &str) -> AnalysisResult<usize> {
        self.classes
            .binary_search_by(|c| self.order.compare(c, value))
            .map_err(|_| AnalysisError::UnknownCategory {
                field: self.field.clone(),
                value: value.to_string(),
            })
    }
}

// ============================================================================
// ENCODED MATRIX
// ============================================================================

/// Numeric training matrix. Timestamps and labels ride alongside the values
/// and are never scaled.
#[derive(Debug, Clone)]
pub struct EncodedMatrix {
    pub columns: Vec<String>,
    pub values: Array2<f64>,
    pub timestamps: Vec<DateTime<Utc>>,
    pub labels: Vec<bool>,
}

impl EncodedMatrix {
    /// Flatten to a table: feature columns, then `_time`, then `is_attack`
    pub fn to_table(&self) -> RawTable {
        let mut headers = self.columns.clone();
        headers.push(COL_TIME.to_string());
        headers.push("is_attack".to_string());

        let mut table = RawTable::new(headers);
        for (i, row) in self.values.outer_iter().enumerate() {
            let mut cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            cells.push(self.timestamps[i].to_rfc3339());
            cells.push(u8::from(self.labels[i]).to_string());
            table.push_row(cells);
        }
        table
    }
}

/// Encode every categorical field as its vocabulary index
pub fn label_encode(events: &[Event]) -> AnalysisResult<EncodedMatrix> {
    let mut values = Array2::<f64>::zeros((events.len(), LABEL_ENCODED_FIELDS.len()));

    for (col, field) in LABEL_ENCODED_FIELDS.iter().enumerate() {
        let raw: Vec<String> = events.iter().map(|e| field.value(e)).collect();
        let encoder =
            LabelEncoder::fit(field.name(), field.class_order(), raw.iter().map(|s| s.as_str()));
        for (row, value) in raw.iter().enumerate() {
            values[[row, col]] = encoder.transform(value)? as f64;
        }
        log::debug!("{}: {} classes", field.name(), encoder.classes().len());
    }

    Ok(EncodedMatrix {
        columns: LABEL_ENCODED_FIELDS.iter().map(|f| f.name().to_string()).collect(),
        values,
        timestamps: events.iter().map(|e| e.timestamp).collect(),
        labels: events.iter().map(|e| e.is_attack).collect(),
    })
}

/// One indicator column per (field, value), `<field>_<value>` like dummy
/// variables. Newlines inside tags become `_`.
pub fn one_hot_encode(events: &[Event]) -> AnalysisResult<EncodedMatrix> {
    let mut columns = vec![
        COL_PARENT_PROCESS_ID.to_string(),
        COL_PROCESS_ID.to_string(),
    ];
    let mut encoded_fields = Vec::with_capacity(ONE_HOT_FIELDS.len());

    for field in ONE_HOT_FIELDS {
        let raw: Vec<String> = events.iter().map(|e| one_hot_value(*field, e)).collect();
        let encoder =
            LabelEncoder::fit(field.name(), field.class_order(), raw.iter().map(|s| s.as_str()));
        let offset = columns.len();
        columns.extend(encoder.classes().iter().map(|c| format!("{}_{}", field.name(), c)));
        encoded_fields.push((offset, encoder, raw));
    }

    let mut values = Array2::<f64>::zeros((events.len(), columns.len()));
    for (row, event) in events.iter().enumerate() {
        values[[row, 0]] = numeric_id(&event.parent_process_id);
        values[[row, 1]] = numeric_id(&event.process_id);
    }
    for (offset, encoder, raw) in &encoded_fields {
        for (row, value) in raw.iter().enumerate() {
            values[[row, offset + encoder.transform(value)?]] = 1.0;
        }
    }

    Ok(EncodedMatrix {
        columns,
        values,
        timestamps: events.iter().map(|e| e.timestamp).collect(),
        labels: events.iter().map(|e| e.is_attack).collect(),
    })
}

fn one_hot_value(field: EventField, event: &Event) -> String {
    match field {
        EventField::Tag => event.tag.replace('\n', "_"),
        other => other.value(event),
    }
}

fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).ok().map(|v| v as f64);
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn numeric_id(raw: &str) -> f64 {
    parse_numeric(raw).unwrap_or(0.0)
}
