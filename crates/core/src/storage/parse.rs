//! Database value parsing utilities
//!
//! Provides error-safe parsing of stored values.

use std::collections::BTreeSet;

use rusqlite::types::Type;
use rusqlite::Error as SqlError;
use uuid::Uuid;

use crate::models::{ClassColor, ClockTime, Day};

fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> SqlError {
    SqlError::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

/// Parse a UUID from a database string column
pub fn parse_uuid(column: usize, s: &str) -> Result<Uuid, SqlError> {
    Uuid::parse_str(s).map_err(|e| conversion_error(column, e))
}

/// Parse an `HH:MM` time column
pub fn parse_time(column: usize, s: &str) -> Result<ClockTime, SqlError> {
    ClockTime::parse(s).map_err(|e| conversion_error(column, e))
}

/// Parse a comma-separated day list such as `Mon,Wed`
pub fn parse_days(column: usize, s: &str) -> Result<BTreeSet<Day>, SqlError> {
    let days = s
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.parse::<Day>())
        .collect::<Result<BTreeSet<Day>, _>>()
        .map_err(|e| conversion_error(column, e))?;

    if days.is_empty() {
        return Err(conversion_error(
            column,
            crate::Error::Validation("Stored entry has no days".into()),
        ));
    }
    Ok(days)
}

/// Read a required display name, rejecting blank values
pub fn parse_name(column: usize, s: String) -> Result<String, SqlError> {
    if s.trim().is_empty() {
        return Err(conversion_error(
            column,
            crate::Error::Validation("Stored entry has no name".into()),
        ));
    }
    Ok(s)
}

/// Serialize a day set for storage
pub fn serialize_days(days: &BTreeSet<Day>) -> String {
    days.iter()
        .map(Day::short_name)
        .collect::<Vec<_>>()
        .join(",")
}

/// Palette color by name; unknown names fall back to the default color
pub fn color_from_str(s: &str) -> ClassColor {
    ClassColor::from_key(s).unwrap_or_default()
}
