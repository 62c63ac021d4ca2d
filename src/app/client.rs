use crate::config::client::ClientConfig;
use crate::domain::model::{PageEnvelope, PageQuery};
use crate::domain::schema::EntityKind;
use crate::utils::error::{Result, SwapiError};
use crate::utils::logger::LogHandle;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::time::Duration;
use tracing::Instrument;

pub type Row = serde_json::Map<String, serde_json::Value>;

/// HTTP client for the proxy's own endpoints.
pub struct ApiClient {
    config: ClientConfig,
    client: Client,
    log: LogHandle,
}

impl ApiClient {
    pub fn new(config: ClientConfig, log: LogHandle) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SwapiError::Config {
                message: format!("Cannot build HTTP client: {}", e),
            })?;

        Ok(Self {
            config,
            client,
            log,
        })
    }

    pub fn endpoint(&self, kind: EntityKind) -> String {
        format!(
            "{}/{}/",
            self.config.api_base_url.trim_end_matches('/'),
            kind.resource()
        )
    }

    /// Fetch one page; only parameters that are set go on the query string.
    pub async fn list(&self, kind: EntityKind, query: &PageQuery) -> Result<PageEnvelope<Row>> {
        let url = self.endpoint(kind);

        async {
            tracing::debug!("Requesting {} with {:?}", url, query);
            let response = self
                .client
                .get(&url)
                .query(query)
                .send()
                .await
                .map_err(|source| SwapiError::Connection {
                    url: url.clone(),
                    source,
                })?;

            let status = response.status();
            let body = response
                .bytes()
                .await
                .map_err(|source| SwapiError::Connection {
                    url: url.clone(),
                    source,
                })?;

            if !status.is_success() {
                return Err(SwapiError::ApiStatus {
                    status: status.as_u16(),
                    body: format_error_body(&body),
                });
            }

            Ok(serde_json::from_slice(&body)?)
        }
        .instrument(self.log.span().clone())
        .await
    }
}

/// Pretty-printed JSON when the body parses, raw text otherwise.
fn format_error_body(body: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(json) => {
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        }
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

/// "hair_color" -> "Hair Color"
pub fn column_header(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn display_cell(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => "---".to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn build_table(rows: &[Row], columns: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(columns.iter().map(|c| header_cell(&column_header(c))));

    for row in rows {
        table.add_row(columns.iter().map(|c| Cell::new(display_cell(row.get(*c)))));
    }

    table
}

pub fn render_table(title: &str, rows: &[Row], columns: &[&str]) -> String {
    format!("{}\n{}", title, build_table(rows, columns))
}

/// Red-bordered box used for every error the client prints.
pub fn render_error(message: &str) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Error")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)])
        .add_row(vec![Cell::new(message)]);
    table.to_string()
}

/// Spinner shown while a request is in flight; cleared when dropped.
pub struct LoadingSpinner {
    bar: ProgressBar,
}

impl LoadingSpinner {
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }
}

impl Drop for LoadingSpinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
