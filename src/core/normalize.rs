//! Upstream value cleanup: placeholder strings become null, numeric and
//! date-time strings are cast, everything else passes through.

use crate::domain::model::{NormalizedRecord, RawRecord, Value};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::num::IntErrorKind;

/// Strings the upstream uses to mean "no data".
pub const PLACEHOLDERS: [&str; 3] = ["unknown", "n/a", "none"];

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn normalize_value(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::String(s) => normalize_str(&s),
        serde_json::Value::Null => Value::Null,
        other => Value::Raw(other),
    }
}

pub fn normalize_str(raw: &str) -> Value {
    if PLACEHOLDERS.contains(&raw.trim().to_lowercase().as_str()) {
        return Value::Null;
    }

    let without_separators = raw.replace(',', "");
    let stripped = without_separators.trim();

    // Cast order matters: "172" is an integer before it is a float.
    match stripped.parse::<i64>() {
        Ok(i) => return Value::Int(i),
        // Integer literals wider than i64 clamp so integer fields still deserialize.
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => return Value::Int(i64::MAX),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => return Value::Int(i64::MIN),
        Err(_) => {}
    }
    if let Ok(f) = stripped.parse::<f64>() {
        return Value::Float(f);
    }
    if let Some(dt) = parse_datetime(stripped) {
        return Value::DateTime(dt);
    }

    Value::Text(stripped.to_string())
}

/// ISO-8601 date-time, with a trailing `Z` read as UTC. Values without an offset are taken as UTC.
pub fn parse_datetime(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Normalize every field; `None` when the record has no usable name.
pub fn normalize_record(item: RawRecord) -> Option<NormalizedRecord> {
    let data: HashMap<String, Value> = item
        .into_iter()
        .map(|(key, value)| (key, normalize_value(value)))
        .collect();

    let record = NormalizedRecord { data };
    record.name()?;
    Some(record)
}
