use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use clap::Args;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Connection settings shared by every terminal client command.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    #[arg(
        long,
        env = "INTERNAL_API_BASE_URL",
        default_value = DEFAULT_API_BASE_URL,
        global = true
    )]
    pub api_base_url: String,

    #[arg(long, default_value_t = 5, global = true, help = "Request timeout in seconds")]
    pub timeout_secs: u64,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            timeout_secs: 5,
            verbose: false,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_positive_number("timeout_secs", self.timeout_secs, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let mut config = ClientConfig::new(DEFAULT_API_BASE_URL);
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(5));

        config.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.timeout_secs = 5;
        config.api_base_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());
    }
}
