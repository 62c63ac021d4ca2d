use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwapiError {
    #[error("Failed to reach upstream for '{resource}' at {url}: {source}")]
    Transport {
        resource: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Upstream returned status {status} for '{resource}' at {url}")]
    UpstreamStatus {
        resource: String,
        url: String,
        status: u16,
    },

    #[error("Invalid '{resource}' record: {message}")]
    Validation { resource: String, message: String },

    #[error("Cannot sort by '{field}'")]
    InvalidSortField { field: String },

    #[error("Invalid query parameter '{field}' = '{value}': {reason}")]
    InvalidQuery {
        field: String,
        value: String,
        reason: String,
    },

    /// The query string itself could not be decoded.
    #[error("{message}")]
    MalformedQuery { message: String },

    #[error("Connection error: {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error: {status}\n{body}")]
    ApiStatus { status: u16, body: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration value for '{field}' = '{value}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SwapiError {
    /// HTTP status the service boundary answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            SwapiError::InvalidSortField { .. } => 400,
            SwapiError::InvalidQuery { .. } | SwapiError::MalformedQuery { .. } => 422,
            _ => 500,
        }
    }

    /// Message safe to hand to a client. Upstream and internal details stay in the logs.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SwapiError::InvalidSortField { .. }
            | SwapiError::InvalidQuery { .. }
            | SwapiError::MalformedQuery { .. }
            | SwapiError::Connection { .. }
            | SwapiError::ApiStatus { .. }
            | SwapiError::Config { .. }
            | SwapiError::InvalidConfigValue { .. } => self.to_string(),
            SwapiError::Transport { .. } | SwapiError::UpstreamStatus { .. } => {
                "Upstream service unavailable".to_string()
            }
            _ => "Internal server error".to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            SwapiError::ApiStatus { .. } => 2,
            SwapiError::Config { .. } | SwapiError::InvalidConfigValue { .. } => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SwapiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let sort = SwapiError::InvalidSortField {
            field: "films".to_string(),
        };
        assert_eq!(sort.status_code(), 400);
        assert_eq!(sort.to_string(), "Cannot sort by 'films'");

        let query = SwapiError::InvalidQuery {
            field: "page".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(query.status_code(), 422);

        let malformed = SwapiError::MalformedQuery {
            message: "Failed to deserialize query string: invalid digit found in string".to_string(),
        };
        assert_eq!(malformed.status_code(), 422);
        assert_eq!(
            malformed.user_friendly_message(),
            "Failed to deserialize query string: invalid digit found in string"
        );

        let status = SwapiError::UpstreamStatus {
            resource: "people".to_string(),
            url: "http://upstream/people".to_string(),
            status: 503,
        };
        assert_eq!(status.status_code(), 500);
        assert_eq!(status.user_friendly_message(), "Upstream service unavailable");
    }

    #[test]
    fn test_exit_codes() {
        let api = SwapiError::ApiStatus {
            status: 400,
            body: "{}".to_string(),
        };
        assert_eq!(api.exit_code(), 2);

        let config = SwapiError::Config {
            message: "bad".to_string(),
        };
        assert_eq!(config.exit_code(), 3);
    }
}
