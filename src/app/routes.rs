//! HTTP service boundary.
//!
//! ## Endpoints
//!
//! - `GET /people`, `GET /planets` - one page of entities (`page`, `page_size`,
//!   `search`, `sort_by`, `order` query parameters)
//! - `GET /simulate-ai-insight?type=person|planet&name=...` - canned insight text
//! - `GET /health` - liveness

use crate::app::insight::{self, Insight, InsightQuery};
use crate::core::pipeline::PagePipeline;
use crate::domain::model::{PageEnvelope, PageQuery};
use crate::domain::ports::Upstream;
use crate::domain::schema::Entity;
use crate::domain::{Person, Planet};
use crate::utils::error::SwapiError;
use crate::utils::logger::LogHandle;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub struct AppState<U: Upstream> {
    pub pipeline: Arc<PagePipeline<U>>,
    pub log: LogHandle,
}

impl<U: Upstream> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            log: self.log.clone(),
        }
    }
}

/// Error response: `{"detail": "..."}` with the status the error maps to.
#[derive(Debug)]
pub struct ApiError(pub SwapiError);

impl From<SwapiError> for ApiError {
    fn from(err: SwapiError) -> Self {
        Self(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(SwapiError::MalformedQuery {
            message: rejection.body_text(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_client_error() {
            tracing::warn!("Rejected request: {}", self.0);
        }

        let body = serde_json::json!({ "detail": self.0.user_friendly_message() });
        (status, Json(body)).into_response()
    }
}

pub fn build_router<U: Upstream + 'static>(pipeline: PagePipeline<U>, log: LogHandle) -> Router {
    let state = AppState {
        pipeline: Arc::new(pipeline),
        log,
    };

    Router::new()
        .route("/people", get(list_entities::<Person, U>))
        .route("/people/", get(list_entities::<Person, U>))
        .route("/planets", get(list_entities::<Planet, U>))
        .route("/planets/", get(list_entities::<Planet, U>))
        .route("/simulate-ai-insight", get(simulate_ai_insight))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_entities<E: Entity, U: Upstream + 'static>(
    State(state): State<AppState<U>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageEnvelope<E>>, ApiError> {
    let Query(query) = query?;
    let envelope = state.pipeline.get_page::<E>(&query).await?;
    Ok(Json(envelope))
}

async fn simulate_ai_insight(
    query: Result<Query<InsightQuery>, QueryRejection>,
) -> Result<Json<Insight>, ApiError> {
    let Query(query) = query?;
    let insight = insight::simulate(&query, &mut rand::thread_rng())?;
    Ok(Json(insight))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Bind and serve until Ctrl-C.
pub async fn serve(router: Router, addr: &str, log: &LogHandle) -> crate::utils::error::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!(parent: log.span(), "Failed to bind to {}: {}", addr, e);
        SwapiError::Io(e)
    })?;

    tracing::info!(parent: log.span(), "Serving on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    tracing::info!(parent: log.span(), "Server stopped");
    Ok(())
}
