//! Field conversion utilities for log records
//!
//! Every converter returns a `Result` so record handlers can log a failed
//! field and keep assembling the rest of the record.

use crate::constants::{DATE_DELIMITER, MAX_DATE, MIN_DATE};
use crate::{Error, Result};

/// Parse a `DD/MM/YYYY` token into a `YYYYMMDD` integer
///
/// The three parts are concatenated in reverse order and range checked
/// against `[20000000, 30000000]`. No calendar validation is performed, so
/// `05/13/2024` yields `20241305`.
pub fn parse_date(value: &str) -> Result<u32> {
    let parts: Vec<&str> = value.split(DATE_DELIMITER).collect();

    if parts.len() != 3 {
        return Err(Error::invalid_date(value, "expected DD/MM/YYYY"));
    }

    let joined = format!("{}{}{}", parts[2], parts[1], parts[0]);
    let day = joined
        .parse::<i64>()
        .map_err(|e| Error::invalid_date(value, format!("cannot parse day as int: {}", e)))?;

    if day < i64::from(MIN_DATE) || day > i64::from(MAX_DATE) {
        return Err(Error::invalid_date(
            value,
            format!("{} outside {}..={}", day, MIN_DATE, MAX_DATE),
        ));
    }

    Ok(day as u32)
}

/// Parse a base-10 float token
pub fn parse_f64(field: &'static str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|e| Error::field_conversion(field, value, e))
}

/// Parse a base-10 32-bit integer token
pub fn parse_i32(field: &'static str, value: &str) -> Result<i32> {
    value
        .parse::<i32>()
        .map_err(|e| Error::field_conversion(field, value, e))
}

/// Overwrite `slot` with a converted value, if any
pub fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Overwrite `slot` only with a converted, non-zero value
///
/// Upstream writes a zero balance/equity while a strategy is not
/// auto-trading; the last known figure is kept in that case.
pub fn assign_non_zero(slot: &mut f64, value: Option<f64>) {
    if let Some(value) = value.filter(|v| *v != 0.0) {
        *slot = value;
    }
}
