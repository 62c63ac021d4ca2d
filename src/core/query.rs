//! Name search and field sorting over a fetched collection.
//!
//! Sorting is stable and puts entities with a null sort value last in either
//! direction. A field that is unknown or list-typed is rejected up front; a
//! collection whose values cannot be compared with each other (say, numbers
//! and text mixed in one column) is logged and returned unsorted.

use crate::domain::model::SortOrder;
use crate::domain::schema::{Entity, FieldValue, Schema};
use crate::utils::error::{Result, SwapiError};
use crate::utils::logger::LogHandle;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// Keep entities whose name contains `search`, ignoring case. Empty search keeps everything.
pub fn filter_by_name<E: Entity>(data: Vec<E>, search: Option<&str>) -> Vec<E> {
    match search.filter(|s| !s.is_empty()) {
        Some(search) => {
            let needle = search.to_lowercase();
            data.into_iter()
                .filter(|item| item.name().to_lowercase().contains(&needle))
                .collect()
        }
        None => data,
    }
}

pub fn validate_sort_field(schema: &Schema, field: &str) -> Result<()> {
    if schema.is_sortable(field) {
        Ok(())
    } else {
        Err(SwapiError::InvalidSortField {
            field: field.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyClass {
    Number,
    Text,
    DateTime,
}

impl fmt::Display for KeyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyClass::Number => "number",
            KeyClass::Text => "text",
            KeyClass::DateTime => "date-time",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
enum SortKey<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
    DateTime(DateTime<Utc>),
}

impl<'a> SortKey<'a> {
    /// `Ok(None)` for null values; `Err` for values with no ordering at all.
    fn from_field(value: FieldValue<'a>) -> std::result::Result<Option<Self>, String> {
        let key = match value {
            FieldValue::Null => return Ok(None),
            FieldValue::Int(i) => SortKey::Int(i),
            FieldValue::Float(f) => SortKey::Float(f),
            FieldValue::Text(s) => SortKey::Text(s),
            FieldValue::DateTime(dt) => SortKey::DateTime(dt),
            FieldValue::Url(url) => SortKey::Text(url.as_str()),
            FieldValue::List(_) => return Err("list values cannot be ordered".to_string()),
            FieldValue::Json(json) => match json {
                serde_json::Value::Null => return Ok(None),
                serde_json::Value::Bool(b) => SortKey::Int(i64::from(*b)),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => SortKey::Int(i),
                    None => SortKey::Float(n.as_f64().unwrap_or(f64::NAN)),
                },
                serde_json::Value::String(s) => SortKey::Text(s),
                other => return Err(format!("cannot order value {}", other)),
            },
        };
        Ok(Some(key))
    }

    fn class(&self) -> KeyClass {
        match self {
            SortKey::Int(_) | SortKey::Float(_) => KeyClass::Number,
            SortKey::Text(_) => KeyClass::Text,
            SortKey::DateTime(_) => KeyClass::DateTime,
        }
    }

    /// Total order within one class. Mixed int/float columns are widened to float first.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::DateTime(a), SortKey::DateTime(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Positions of `data` in sorted order: non-null keys first, nulls after in original order.
fn sort_permutation<E: Entity>(
    data: &[E],
    field: &str,
    order: SortOrder,
) -> std::result::Result<Vec<usize>, String> {
    let mut keyed: Vec<(usize, SortKey<'_>)> = Vec::with_capacity(data.len());
    let mut nulls = Vec::new();
    let mut column_class: Option<KeyClass> = None;

    for (idx, item) in data.iter().enumerate() {
        let value = item
            .field(field)
            .ok_or_else(|| format!("no field '{}'", field))?;

        let Some(key) = SortKey::from_field(value)? else {
            nulls.push(idx);
            continue;
        };

        match column_class {
            None => column_class = Some(key.class()),
            Some(class) if class != key.class() => {
                return Err(format!("cannot compare {} with {}", class, key.class()));
            }
            Some(_) => {}
        }
        keyed.push((idx, key));
    }

    if keyed.iter().any(|(_, key)| matches!(key, SortKey::Float(_))) {
        for (_, key) in keyed.iter_mut() {
            if let SortKey::Int(i) = *key {
                *key = SortKey::Float(i as f64);
            }
        }
    }

    // `sort_by` is stable, so equal keys keep their incoming order in both directions.
    keyed.sort_by(|(_, a), (_, b)| match order {
        SortOrder::Asc => a.compare(b),
        SortOrder::Desc => b.compare(a),
    });

    Ok(keyed.into_iter().map(|(idx, _)| idx).chain(nulls).collect())
}

/// Sort by `field`. On incomparable values the input order is returned unchanged.
pub fn sort_entities<E: Entity>(
    data: Vec<E>,
    field: &str,
    order: SortOrder,
    log: &LogHandle,
) -> Vec<E> {
    let _entered = log.span().enter();

    let permutation = match sort_permutation(&data, field, order) {
        Ok(permutation) => permutation,
        Err(reason) => {
            tracing::warn!("Failed to sort by '{}': {}", field, reason);
            return data;
        }
    };

    let mut slots: Vec<Option<E>> = data.into_iter().map(Some).collect();
    permutation
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}

/// Name filter followed by an optional, schema-checked sort.
pub fn apply_filters_and_sorting<E: Entity>(
    data: Vec<E>,
    search: Option<&str>,
    sort_by: Option<&str>,
    order: SortOrder,
    log: &LogHandle,
) -> Result<Vec<E>> {
    let data = filter_by_name(data, search);

    match sort_by.filter(|s| !s.is_empty()) {
        Some(field) => {
            validate_sort_field(E::schema(), field)?;
            Ok(sort_entities(data, field, order, log))
        }
        None => Ok(data),
    }
}
