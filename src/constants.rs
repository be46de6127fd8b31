//! Central Configuration Constants
//!
//! Single source of truth for defaults and CSV column names.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Attack Lens";

// ============================================
// Analysis defaults
// ============================================

/// Sub-sequence lengths mined by default
pub const DEFAULT_PATTERN_LENGTHS: &[usize] = &[2, 3, 4];

/// Patterns must occur strictly more often than this
pub const DEFAULT_MIN_FREQUENCY: u64 = 2;

/// Half-width of the severity band around the requested value
pub const DEFAULT_SEVERITY_BAND: f64 = 2.5;

/// Accepted severity filter range (inclusive)
pub const SEVERITY_FILTER_MIN: f64 = 25.0;
pub const SEVERITY_FILTER_MAX: f64 = 100.0;

/// A window counts as "significant drop" when severity_max falls by at least this much
pub const DEFAULT_MAX_DROP_THRESHOLD: f64 = 15.0;

/// Columns with more missing cells than this are pruned
pub const DEFAULT_MAX_MISSING_VALUES: usize = 2000;

/// Columns that carry no signal for the analyses
pub const DEFAULT_COLUMNS_TO_DROP: &[&str] = &[
    "_raw",
    "date",
    "date_hour",
    "date_mday",
    "date_minute",
    "date_month",
    "date_second",
    "date_wday",
    "date_year",
    "date_zone",
    "RuleAnnotation",
    "Timestamp",
    "tag::eventtype",
    "AppVersion",
];

// ============================================
// Alert export columns
// ============================================

pub const COL_TIME: &str = "_time";
pub const COL_SIGNATURE: &str = "signature";
pub const COL_MITRE_ID: &str = "RuleAnnotation.mitre_attack.id";
pub const COL_SEVERITY: &str = "severity_id";
pub const COL_EVENT_TYPE: &str = "EventType";
pub const COL_TAG: &str = "tag";
pub const COL_PROCESS_PATH: &str = "process_path";
pub const COL_PROCESS_ID: &str = "process_id";
pub const COL_PARENT_PROCESS_ID: &str = "parent_process_id";

// ============================================
// Attack run log columns
// ============================================

pub const COL_ATTACK_CODE: &str = "Codice attacco";
pub const COL_ATTACK_START: &str = "Data inizio attacco";
pub const COL_ATTACK_END: &str = "Data fine attacco";

/// Printed whenever an analysis has no attack windows to work with
pub const NO_ATTACKS_MESSAGE: &str = "Non ci sono attacchi.";

/// Printed when no window falls into the requested severity band
pub const NO_ATTACKS_IN_RANGE_MESSAGE: &str = "Non ci sono attacchi nel range di criticità specificato.";
