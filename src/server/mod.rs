//! HTTP surface.

use crate::config::Config;
use crate::pipeline::{PipelineOrchestrator, PipelineRequest, PipelineResponse};
use anyhow::{Context, Result};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub orchestrator: Arc<PipelineOrchestrator>,
}

impl AppContext {
    pub fn new(config: Arc<Config>) -> Self {
        let orchestrator = Arc::new(PipelineOrchestrator::from_config(config.clone()));
        Self {
            config,
            orchestrator,
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/pipeline", post(run_pipeline))
        .with_state(ctx)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Run one pipeline for the posted request.
///
/// Stage failures are part of the response body, not HTTP errors: the
/// caller always gets the stage log, so the status is 200 either way.
/// Undecodable JSON is rejected by the extractor before this runs.
async fn run_pipeline(
    State(ctx): State<AppContext>,
    Json(request): Json<PipelineRequest>,
) -> Json<PipelineResponse> {
    tracing::info!("Pipeline requested for topic: {}", request.topic);
    Json(ctx.orchestrator.run(&request).await)
}

/// Bind and serve until the process is stopped.
pub async fn run_server(config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let ctx = AppContext::new(Arc::new(config));
    let app = create_router(ctx);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
