//! HTTP surface: `POST /api/search`, `POST /api/summary`, `GET /health`.

mod errors;
mod params;

pub use errors::ApiError;

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::Client;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::insights;
use crate::llm::OpenRouterClient;
use crate::pubmed::PubMedClient;
use crate::search::engine::{self, SearchResponse};
use params::{HealthResponse, SearchBody, SummaryBody, SummaryResponse};

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Maximum redirect hops before aborting.
const MAX_REDIRECTS: usize = 5;

/// Outbound clients shared by every request. Holds no per-request state.
///
/// Configuration via environment variables:
/// - `OPENROUTER_API_KEY`: enables AI insights and summaries (optional)
/// - `OPENROUTER_MODEL`: model override (optional)
/// - `NCBI_API_KEY`: higher E-utilities rate limit (optional)
#[derive(Clone, Debug)]
pub struct AppState {
    pub pubmed: PubMedClient,
    pub llm: Option<OpenRouterClient>,
}

impl AppState {
    pub fn from_env() -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(HTTP_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        let llm = OpenRouterClient::from_env(http.clone())
            .inspect_err(|e| warn!("AI enrichment not available: {e}"))
            .ok();
        if let Some(ref client) = llm {
            info!(model = client.model(), "AI enrichment enabled");
        }
        Ok(Self {
            pubmed: PubMedClient::from_env(http),
            llm,
        })
    }

    fn llm(&self) -> Result<&OpenRouterClient, ApiError> {
        self.llm
            .as_ref()
            .ok_or_else(|| ApiError::NotConfigured("OpenRouter API key not configured".into()))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/search", post(search))
        .route("/api/summary", post(summary))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown requested");
        })
        .await
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn search(
    State(state): State<AppState>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(body) = body?;
    let request = body
        .into_request()
        .ok_or_else(|| ApiError::BadRequest("Query is required".into()))?;

    info!(query = %request.query, page = request.page, "api:search");

    let response = engine::run(&state.pubmed, state.llm.as_ref(), &request).await?;
    Ok(Json(response))
}

async fn summary(
    State(state): State<AppState>,
    body: Result<Json<SummaryBody>, JsonRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let Json(body) = body?;
    let (title, abstract_text) = match (body.title, body.abstract_text) {
        (Some(t), Some(a)) if !t.trim().is_empty() && !a.trim().is_empty() => (t, a),
        _ => {
            return Err(ApiError::BadRequest(
                "Title and abstract are required".into(),
            ));
        }
    };

    let llm = state.llm()?;
    info!(pmid = %body.pmid, "api:summary");

    let outcome = insights::summarize_article(llm, &title, &abstract_text).await;
    info!(degraded = outcome.error().is_some(), "summary complete");

    Ok(Json(SummaryResponse {
        success: true,
        pmid: body.pmid,
        summary: outcome.into_value(),
    }))
}
