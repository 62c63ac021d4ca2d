use crate::config::toml_config::FileConfig;
use crate::utils::error::{Result, SwapiError};
use crate::utils::logger::{LogFormat, LogRotation, LogSettings, DEFAULT_MAX_LOG_FILES};
use crate::utils::validation::{
    validate_log_file, validate_one_of, validate_positive_number, validate_url, Validate,
};
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SWAPI_BASE_URL: &str = "https://swapi.info/api";
pub const DEFAULT_LOG_FILE: &str = "logs/swapi-api.log";
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Parser)]
#[command(name = "swapi-api")]
#[command(about = "Paginated, searchable proxy over the Star Wars API")]
pub struct ServerConfig {
    #[arg(long, env = "SWAPI_BASE_URL", default_value = DEFAULT_SWAPI_BASE_URL)]
    pub swapi_base_url: String,

    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(long, env = "LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    #[arg(long, value_enum, default_value_t = LogRotation::Daily)]
    pub log_rotation: LogRotation,

    #[arg(long, default_value_t = DEFAULT_MAX_LOG_FILES, help = "Rolled log files to keep")]
    pub log_max_files: usize,

    #[arg(long, default_value_t = 10, help = "Upstream request timeout in seconds")]
    pub request_timeout_secs: u64,

    /// Optional TOML settings file; flags and env vars take precedence over it
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ServerConfig {
    /// Parse process arguments, then layer in the settings file if one was given.
    pub fn load() -> Result<Self> {
        let matches = Self::command().get_matches();
        Self::from_matches(&matches)
    }

    pub fn load_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command()
            .try_get_matches_from(args)
            .map_err(|e| SwapiError::Config {
                message: e.to_string(),
            })?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let mut config = Self::from_arg_matches(matches).map_err(|e| SwapiError::Config {
            message: e.to_string(),
        })?;

        if let Some(path) = config.config.clone() {
            let file = FileConfig::from_file(&path)?;
            config.merge_file(file, |id| {
                matches.value_source(id) == Some(ValueSource::DefaultValue)
            });
        }

        Ok(config)
    }

    /// Apply file values to every setting still at its built-in default.
    pub fn merge_file(&mut self, file: FileConfig, is_default: impl Fn(&str) -> bool) {
        if let Some(base_url) = file.upstream.base_url.filter(|_| is_default("swapi_base_url")) {
            self.swapi_base_url = base_url;
        }
        if let Some(timeout) = file
            .upstream
            .timeout_seconds
            .filter(|_| is_default("request_timeout_secs"))
        {
            self.request_timeout_secs = timeout;
        }
        if let Some(host) = file.server.host.filter(|_| is_default("host")) {
            self.host = host;
        }
        if let Some(port) = file.server.port.filter(|_| is_default("port")) {
            self.port = port;
        }
        if let Some(level) = file.logging.level.filter(|_| is_default("log_level")) {
            self.log_level = level;
        }
        if let Some(format) = file.logging.format.filter(|_| is_default("log_format")) {
            self.log_format = format;
        }
        if let Some(path) = file.logging.file.filter(|_| is_default("log_file")) {
            self.log_file = path;
        }
        if let Some(rotation) = file.logging.rotation.filter(|_| is_default("log_rotation")) {
            self.log_rotation = rotation;
        }
        if let Some(max_files) = file.logging.max_files.filter(|_| is_default("log_max_files")) {
            self.log_max_files = max_files;
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.log_level.to_lowercase(),
            format: self.log_format,
            file: Some(self.log_file.clone()),
            rotation: self.log_rotation,
            max_files: self.log_max_files,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_url("swapi_base_url", &self.swapi_base_url)?;
        validate_positive_number("port", u64::from(self.port), 1)?;
        validate_positive_number("request_timeout_secs", self.request_timeout_secs, 1)?;
        validate_one_of("log_level", &self.log_level, &LOG_LEVELS)?;
        validate_positive_number("log_max_files", self.log_max_files as u64, 1)?;
        validate_log_file("log_file", &self.log_file)?;
        Ok(())
    }
}
