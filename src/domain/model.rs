use crate::utils::error::SwapiError;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A record exactly as the upstream sent it.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Canonical form of one upstream field after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    DateTime(DateTime<FixedOffset>),
    Text(String),
    /// Non-string upstream values (numbers, booleans, lists, objects) pass through untouched.
    Raw(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null | Value::Raw(serde_json::Value::Null))
    }

    pub fn into_json(self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Int(i) => serde_json::Value::from(i),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::DateTime(dt) => {
                serde_json::Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::Text(s) => serde_json::Value::String(s),
            Value::Raw(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub data: HashMap<String, Value>,
}

impl NormalizedRecord {
    pub fn name(&self) -> Option<&Value> {
        self.data.get("name").filter(|v| !v.is_null())
    }

    pub fn into_json(self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .data
            .into_iter()
            .map(|(k, v)| (k, v.into_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = SwapiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(SwapiError::InvalidQuery {
                field: "order".to_string(),
                value: other.to_string(),
                reason: "must match '^(asc|desc)$'".to_string(),
            }),
        }
    }
}

/// Pages are unbounded above; a page past the end is simply empty.
pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Parameters of one `getPage` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: SortOrder,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            sort_by: None,
            order: SortOrder::Asc,
        }
    }
}

impl crate::utils::validation::Validate for PageQuery {
    fn validate(&self) -> crate::utils::error::Result<()> {
        use crate::utils::validation::validate_query_range;

        validate_query_range("page", self.page, 1, None)?;
        validate_query_range("page_size", self.page_size, 1, Some(MAX_PAGE_SIZE))?;
        Ok(())
    }
}

/// Response body for one page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope<E> {
    /// Total matching records after filtering, not just this page.
    pub count: usize,
    pub page: u64,
    pub results_count: usize,
    pub results: Vec<E>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;

    #[test]
    fn test_page_query_defaults_from_empty_query() {
        let query: PageQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query, PageQuery::default());
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_page_query_bounds() {
        let mut query = PageQuery {
            page_size: 100,
            ..PageQuery::default()
        };
        assert!(query.validate().is_ok());

        query.page_size = 0;
        assert!(query.validate().is_err());

        query.page_size = 101;
        assert!(query.validate().is_err());

        query.page_size = 10;
        query.page = 0;
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("DESC".parse::<SortOrder>().is_err());
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_value_into_json() {
        let dt = DateTime::parse_from_rfc3339("2014-12-09T13:50:51.644Z").unwrap();
        assert_eq!(
            Value::DateTime(dt).into_json(),
            serde_json::json!("2014-12-09T13:50:51.644Z")
        );
        assert_eq!(Value::Int(172).into_json(), serde_json::json!(172));
        assert_eq!(Value::Float(f64::NAN).into_json(), serde_json::Value::Null);
        assert!(Value::Raw(serde_json::Value::Null).is_null());
    }
}
