//! Time axis helpers
//!
//! The index stores time as Unix epoch seconds. Release years map to the
//! closed interval from January 1st 00:00:00 to December 31st 23:59:59, UTC.

use cdl_core::error::{CdlError, Result};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// Epoch-second bounds `(mint, maxt)` covering a release year
pub fn year_bounds(year: i32) -> Result<(f64, f64)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).and_then(|date| date.and_hms_opt(0, 0, 0));
    let end = NaiveDate::from_ymd_opt(year, 12, 31).and_then(|date| date.and_hms_opt(23, 59, 59));

    match (start, end) {
        (Some(start), Some(end)) => {
            Ok((start.and_utc().timestamp() as f64, end.and_utc().timestamp() as f64))
        }
        _ => Err(CdlError::Parse {
            path: format!("{}", year).into(),
            reason: format!("year {} is outside the supported calendar range", year),
        }),
    }
}

/// Calendar year of an epoch timestamp
pub fn year_of(timestamp: f64) -> Option<i32> {
    if !timestamp.is_finite() {
        return None;
    }
    Utc.timestamp_opt(timestamp.floor() as i64, 0).single().map(|dt| dt.year())
}

/// Parse a point in time into epoch seconds.
///
/// Accepts RFC 3339 (`2015-06-01T12:00:00Z`), a plain date (`2015-06-01`,
/// midnight UTC), or raw epoch seconds.
pub fn parse_timestamp(s: &str) -> Result<f64> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp() as f64);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp() as f64);
        }
    }

    if let Ok(seconds) = s.parse::<f64>() {
        if seconds.is_finite() {
            return Ok(seconds);
        }
    }

    Err(CdlError::InvalidBoundingVolume {
        reason: format!(
            "cannot parse '{}' as a timestamp (use RFC 3339, YYYY-MM-DD or epoch seconds)",
            s
        ),
    })
}
