use crate::core::normalize::normalize_record;
use crate::domain::ports::Upstream;
use crate::domain::schema::Entity;
use crate::utils::error::{Result, SwapiError};
use crate::utils::logger::LogHandle;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::Instrument;

/// Upstream reached over HTTP: `GET {base_url}/{resource}` returns a JSON array.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    base_url: String,
    client: Client,
}

impl HttpUpstream {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SwapiError::Config {
                message: format!("Cannot build HTTP client: {}", e),
            })?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    fn url_for(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), resource)
    }

    async fn fetch_raw(&self, resource: &str) -> Result<Vec<serde_json::Value>> {
        let url = self.url_for(resource);

        tracing::debug!("Making upstream request to: {}", url);
        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|source| SwapiError::Transport {
                    resource: resource.to_string(),
                    url: url.clone(),
                    source,
                })?;

        let status = response.status();
        tracing::debug!("Upstream response status: {}", status);

        if !status.is_success() {
            return Err(SwapiError::UpstreamStatus {
                resource: resource.to_string(),
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|source| {
                if source.is_decode() {
                    SwapiError::Validation {
                        resource: resource.to_string(),
                        message: format!("upstream body is not a JSON array: {}", source),
                    }
                } else {
                    SwapiError::Transport {
                        resource: resource.to_string(),
                        url,
                        source,
                    }
                }
            })
    }
}

/// Turns an upstream collection into typed entities.
pub struct Fetcher<U: Upstream> {
    upstream: U,
    log: LogHandle,
}

impl<U: Upstream> Fetcher<U> {
    pub fn new(upstream: U, log: LogHandle) -> Self {
        Self { upstream, log }
    }

    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Fetch the whole collection for `E`, in upstream order. Nameless records are skipped.
    pub async fn fetch<E: Entity>(&self) -> Result<Vec<E>> {
        let resource = E::KIND.resource();
        let url = self.upstream.url_for(resource);

        async {
            let items = self.upstream.fetch_raw(resource).await?;
            let received = items.len();

            let mut entities = Vec::with_capacity(received);
            for item in items {
                let raw = match item {
                    serde_json::Value::Object(raw) => raw,
                    other => {
                        return Err(SwapiError::Validation {
                            resource: resource.to_string(),
                            message: format!("expected a JSON object, got {}", other),
                        });
                    }
                };

                let Some(record) = normalize_record(raw) else {
                    continue;
                };

                let entity = serde_json::from_value::<E>(record.into_json()).map_err(|e| {
                    SwapiError::Validation {
                        resource: resource.to_string(),
                        message: e.to_string(),
                    }
                })?;
                entities.push(entity);
            }

            tracing::debug!(
                "Normalized {} of {} '{}' records",
                entities.len(),
                received,
                resource
            );
            Ok(entities)
        }
        .instrument(self.log.span().clone())
        .await
        .inspect_err(|e| {
            tracing::error!(
                resource,
                url = %url,
                "Failed to fetch '{}' from upstream: {}",
                resource,
                e
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Person, Planet};
    use httpmock::prelude::*;

    fn person(name: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "height": "172",
            "mass": "77",
            "hair_color": "blond",
            "skin_color": "fair",
            "eye_color": "blue",
            "birth_year": "19BBY",
            "gender": "male",
            "homeworld": "https://swapi.info/api/planets/1",
            "films": ["https://swapi.info/api/films/1"],
            "species": [],
            "vehicles": [],
            "starships": [],
            "created": "2014-12-09T13:50:51.644000Z",
            "edited": "2014-12-20T21:17:56.891000Z",
            "url": "https://swapi.info/api/people/1"
        })
    }

    fn fetcher(server: &MockServer) -> Fetcher<HttpUpstream> {
        Fetcher::new(HttpUpstream::new(server.base_url()), LogHandle::new("test"))
    }

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let upstream = HttpUpstream::new("https://swapi.info/api/");
        assert_eq!(upstream.url_for("people"), "https://swapi.info/api/people");
    }

    #[tokio::test]
    async fn test_fetch_normalizes_and_drops_nameless() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/people");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    person(serde_json::json!("Luke Skywalker")),
                    person(serde_json::json!("unknown")),
                    person(serde_json::json!("Leia Organa")),
                ]));
        });

        let people: Vec<Person> = fetcher(&server).fetch().await.unwrap();

        api_mock.assert();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].name, "Luke Skywalker");
        assert_eq!(people[0].height, Some(172));
        assert_eq!(people[0].mass, Some(77.0));
        assert_eq!(people[1].name, "Leia Organa");
    }

    #[tokio::test]
    async fn test_fetch_upstream_status_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/planets");
            then.status(503);
        });

        let err = fetcher(&server).fetch::<Planet>().await.unwrap_err();

        api_mock.assert();
        match err {
            SwapiError::UpstreamStatus {
                resource, status, ..
            } => {
                assert_eq!(resource, "planets");
                assert_eq!(status, 503);
            }
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_validation_error_on_schema_mismatch() {
        let server = MockServer::start();
        let mut broken = person(serde_json::json!("R2-D2"));
        broken["homeworld"] = serde_json::json!("unknown");

        server.mock(|when, then| {
            when.method(GET).path("/people");
            then.status(200).json_body(serde_json::json!([broken]));
        });

        let err = fetcher(&server).fetch::<Person>().await.unwrap_err();
        assert!(matches!(err, SwapiError::Validation { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_fetch_non_array_body_is_validation_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/people");
            then.status(200)
                .json_body(serde_json::json!({"detail": "not a list"}));
        });

        let err = fetcher(&server).fetch::<Person>().await.unwrap_err();
        assert!(matches!(err, SwapiError::Validation { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        // Nothing listens on port 1.
        let fetcher = Fetcher::new(
            HttpUpstream::new("http://127.0.0.1:1"),
            LogHandle::new("test"),
        );

        let err = fetcher.fetch::<Person>().await.unwrap_err();
        match err {
            SwapiError::Transport { resource, url, .. } => {
                assert_eq!(resource, "people");
                assert_eq!(url, "http://127.0.0.1:1/people");
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }
}
