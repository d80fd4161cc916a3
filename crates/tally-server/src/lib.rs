//! Tally Web Server
//!
//! Axum-based REST API around the expense analyzer.
//!
//! - `GET /health` - liveness probe
//! - `POST /analyze` - suggestions and detailed analysis for a batch
//! - `POST /insights` - totals and breakdowns over a window of days
//!
//! The server keeps no state between requests beyond the immutable analyzer
//! configuration.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{info, warn};

use tally_core::ExpenseAnalyzer;

mod handlers;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "expense-analyzer";

/// Default allowed origin when none is configured
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
        }
    }
}

/// Parse a comma-separated list of origins
pub fn parse_origins(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Shared application state
pub struct AppState {
    pub analyzer: ExpenseAnalyzer,
}

/// Create the application router
pub fn create_router(analyzer: ExpenseAnalyzer, config: ServerConfig) -> Router {
    let cors = build_cors(&config);

    let state = Arc::new(AppState { analyzer });

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/analyze", post(handlers::analyze_expenses))
        .route("/insights", post(handlers::get_insights))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

fn build_cors(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        return cors;
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    analyzer: ExpenseAnalyzer,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    info!(origins = ?config.allowed_origins, "CORS configured");

    let app = create_router(analyzer, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    error: String,
    message: Option<String>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: msg.to_string(),
            message: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: msg.to_string(),
            message: None,
        }
    }

    /// Attach a diagnostic message surfaced to the caller
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Map a core error: missing input becomes 400, anything else a 500
    /// labelled with `failure`
    pub fn from_core(err: tally_core::Error, failure: &str) -> Self {
        if err.is_input_missing() {
            Self::bad_request(tally_core::input::MISSING_EXPENSES).with_message(err.to_string())
        } else {
            Self::internal(failure).with_message(err.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(error = %self.error, message = ?self.message, "Request failed");
        }

        let mut body = serde_json::json!({
            "error": self.error
        });
        if let Some(message) = self.message {
            body["message"] = serde_json::Value::String(message);
        }

        (self.status, Json(body)).into_response()
    }
}
