//! Timestamp parsing for alert exports and attack run logs.
//!
//! Exports mix RFC 3339 values with naive local-style stamps; naive values are
//! taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{AnalysisError, AnalysisResult};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

pub fn parse_timestamp(raw: &str) -> AnalysisResult<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AnalysisError::InvalidTimestamp(raw.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    // "2024-01-02 10:00:00.000+01:00" style (Splunk exports)
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(naive.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(naive.and_utc());
            }
        }
    }

    Err(AnalysisError::InvalidTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_rfc3339_converted_to_utc() {
        let ts = parse_timestamp("2024-03-01T10:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_naive_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap();
        assert_eq!(parse_timestamp("2024-03-01 10:15:30").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-01T10:15:30").unwrap(), expected);
        assert_eq!(parse_timestamp("01/03/2024 10:15:30").unwrap(), expected);
    }

    #[test]
    fn test_fractional_seconds_kept() {
        let ts = parse_timestamp("2024-03-01 10:15:30.500").unwrap();
        assert_eq!(ts.nanosecond(), 500_000_000);
    }

    #[test]
    fn test_splunk_offset_format() {
        let ts = parse_timestamp("2024-03-01 10:00:00.000+01:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("   ").is_err());
    }
}
