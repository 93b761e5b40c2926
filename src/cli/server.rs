//! HTTP server mode for the routing service

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::routing::{route, RouteResponse};
use crate::types::Tier;
use crate::validate::RequestSchema;

/// State shared read-only across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service configuration
    pub config: ServiceConfig,
    /// Schema every routing payload is checked against
    pub schema: RequestSchema,
}

impl AppState {
    /// State with the standard request schema
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            schema: RequestSchema::new(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let cors_enabled = state.config.cors;

    let app = Router::new()
        .route("/health", get(health))
        .route("/tiers", get(list_tiers))
        .route("/schema", get(request_schema))
        .route("/route", post(route_recipients))
        .with_state(Arc::new(state));

    let app = if cors_enabled {
        // Allow all origins
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn serve(config: ServiceConfig) -> Result<()> {
    config.validate()?;
    let addr = config.socket_addr();
    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to {addr}: {e}")))?;
    tracing::info!("Starting HTTP server on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Capacity tiers and their address prefixes, largest first
async fn list_tiers() -> impl IntoResponse {
    let tiers: Vec<_> = Tier::ALL
        .into_iter()
        .map(|tier| {
            json!({
                "name": tier.label(),
                "capacity": tier.capacity(),
                "subnet": tier.subnet(),
                "prefix": tier.prefix(),
            })
        })
        .collect();

    Json(json!({ "tiers": tiers }))
}

/// JSON Schema for routing payloads
async fn request_schema(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.schema.to_json_schema())
}

/// Partition recipients into batches and assign each batch a route
///
/// The body is decoded here rather than through the `Json` extractor so
/// that malformed JSON gets the same `{"error": ...}` 400 as a schema
/// violation, whatever the request's content type.
async fn route_recipients(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> std::result::Result<Json<RouteResponse>, Error> {
    let request = state.schema.decode(&body).inspect_err(|e| {
        tracing::warn!("Rejected routing request: {e}");
    })?;

    let routes = route(&request.recipients);
    tracing::info!(
        recipients = request.recipients.len(),
        routes = routes.len(),
        "Routed request"
    );

    let message = state
        .config
        .message_mode
        .select(&state.config.banner, &request.message)
        .to_string();

    Ok(Json(RouteResponse { message, routes }))
}
