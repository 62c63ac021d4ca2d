use crate::utils::error::{Result, SwapiError};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SwapiError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SwapiError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SwapiError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// A log file location the process can write to. A missing directory is fine, it is created at startup.
pub fn validate_log_file(field_name: &str, path: &Path) -> Result<()> {
    let invalid = |reason: &str| SwapiError::InvalidConfigValue {
        field: field_name.to_string(),
        value: path.display().to_string(),
        reason: reason.to_string(),
    };

    if path.file_name().is_none() {
        return Err(invalid("Path must end in a file name"));
    }
    if path.is_dir() {
        return Err(invalid("Path is a directory"));
    }

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match std::fs::metadata(directory) {
        Ok(meta) if !meta.is_dir() => Err(invalid("Parent is not a directory")),
        Ok(meta) if meta.permissions().readonly() => Err(invalid("Directory is read-only")),
        _ => Ok(()),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(SwapiError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value.to_lowercase().as_str()) {
        return Err(SwapiError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Range check for request parameters; violations are client errors, not config errors.
pub fn validate_query_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: Option<T>,
) -> Result<()> {
    let too_small = value < min;
    let too_large = max.is_some_and(|max| value > max);
    if too_small || too_large {
        let reason = match max {
            Some(max) => format!("Value must be between {} and {}", min, max),
            None => format!("Value must be at least {}", min),
        };
        return Err(SwapiError::InvalidQuery {
            field: field_name.to_string(),
            value: value.to_string(),
            reason,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("swapi_base_url", "https://swapi.info/api").is_ok());
        assert!(validate_url("swapi_base_url", "http://localhost:8000").is_ok());
        assert!(validate_url("swapi_base_url", "").is_err());
        assert!(validate_url("swapi_base_url", "invalid-url").is_err());
        assert!(validate_url("swapi_base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_log_file() {
        let dir = tempfile::TempDir::new().unwrap();

        assert!(validate_log_file("log_file", &dir.path().join("swapi-api.log")).is_ok());
        assert!(validate_log_file("log_file", &dir.path().join("logs/swapi-api.log")).is_ok());
        assert!(validate_log_file("log_file", dir.path()).is_err());
        assert!(validate_log_file("log_file", Path::new("/")).is_err());

        let not_a_dir = dir.path().join("plain.txt");
        std::fs::write(&not_a_dir, "x").unwrap();
        assert!(validate_log_file("log_file", &not_a_dir.join("swapi-api.log")).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout", 5, 1).is_ok());
        assert!(validate_positive_number("timeout", 0, 1).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        let levels = ["trace", "debug", "info", "warn", "error"];
        assert!(validate_one_of("log_level", "INFO", &levels).is_ok());
        assert!(validate_one_of("log_level", "loud", &levels).is_err());
    }

    #[test]
    fn test_validate_query_range() {
        assert!(validate_query_range("page_size", 10u32, 1, Some(100)).is_ok());
        assert!(validate_query_range("page_size", 100u32, 1, Some(100)).is_ok());

        let err = validate_query_range("page_size", 101u32, 1, Some(100)).unwrap_err();
        assert!(matches!(err, SwapiError::InvalidQuery { ref field, .. } if field == "page_size"));

        assert!(validate_query_range("page", 0u32, 1, None).is_err());
        assert!(validate_query_range("page", 5000u32, 1, None).is_ok());
    }
}
