//! Webhook HTTP server

use super::types::Update;
use crate::bot::Dispatcher;
use crate::interface::Inbound;
use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{MatchedPath, Path, Request, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{Span, debug, info, info_span, warn};

/// Shared state of the webhook handlers
#[derive(Clone)]
pub struct WebhookState {
    token: Arc<str>,
    dispatcher: Arc<Dispatcher>,
}

impl WebhookState {
    pub fn new(token: &str, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            token: Arc::from(token),
            dispatcher,
        }
    }
}

/// Routes: `GET /health` and `POST /webhook/{token}`
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/webhook/{token}", post(webhook_handler))
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
        .with_state(state)
}

/// Route template of a request, never the raw path, which carries the token
fn route_label<B>(request: &Request<B>) -> &str {
    request
        .extensions()
        .get::<MatchedPath>()
        .map_or("unmatched", MatchedPath::as_str)
}

fn request_span<B>(request: &Request<B>) -> Span {
    info_span!(
        "http_request",
        method = %request.method(),
        route = route_label(request),
    )
}

/// Serve the webhook on `addr` until Ctrl-C
pub async fn serve(addr: &str, state: WebhookState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Webhook server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Dispatch one update
///
/// Answers 200 for every accepted delivery, even when the update is
/// malformed or its turn fails, so the platform does not redeliver it.
async fn webhook_handler(
    State(state): State<WebhookState>,
    Path(token): Path<String>,
    body: Bytes,
) -> StatusCode {
    if token != *state.token {
        warn!("Webhook called with a wrong token");
        return StatusCode::NOT_FOUND;
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, "Discarding malformed update");
            return StatusCode::OK;
        }
    };

    let update_id = update.update_id;
    match Inbound::from_update(update) {
        Some(inbound) => state.dispatcher.process(&inbound).await,
        None => debug!(update_id, "Update carries no command"),
    }
    StatusCode::OK
}
