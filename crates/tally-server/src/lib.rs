//! Tally Web Server
//!
//! Axum-based REST API over an in-memory transaction dataset.
//!
//! - Read-only: the dataset is loaded once at startup
//! - Every GET accepts `?now=` so dashboards can be replayed for any date
//! - Restrictive CORS policy
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDateTime};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use tally_core::{ProjectionOptions, TallyConfig, Transaction};

mod handlers;

/// Maximum number of transactions returned by the list endpoint
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Default number of transactions returned by the list endpoint
pub const DEFAULT_PAGE_LIMIT: usize = 100;

pub use tally_core::insights::{MAX_PROJECTION_DAYS, MAX_WINDOW_DAYS};

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Defaults for `/api/projection` when the query omits them
    pub projection: ProjectionOptions,
    /// Pin "now" for every request that doesn't pass `?now=`
    pub now: Option<NaiveDateTime>,
}

impl ServerConfig {
    pub fn from_config(config: &TallyConfig) -> Self {
        Self {
            allowed_origins: config.server.allowed_origins.clone(),
            projection: config.projection.clone(),
            now: None,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub transactions: Vec<Transaction>,
    pub config: ServerConfig,
}

impl AppState {
    /// Resolve the reference time for a request
    pub fn now(&self, requested: Option<&str>) -> Result<NaiveDateTime, AppError> {
        match requested {
            Some(value) => tally_core::parse_timestamp(value)
                .map_err(|e| AppError::bad_request(&e.to_string())),
            None => Ok(self
                .config
                .now
                .unwrap_or_else(|| Local::now().naive_local())),
        }
    }
}

/// Create the application router
pub fn create_router(transactions: Vec<Transaction>, config: ServerConfig) -> Router {
    let cors = cors_layer(&config.allowed_origins);

    let state = Arc::new(AppState {
        transactions,
        config,
    });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Dataset
        .route("/transactions", get(handlers::list_transactions))
        // Dashboard
        .route("/overview", get(handlers::get_overview))
        .route("/projection", get(handlers::get_projection))
        // Insight engine
        .route(
            "/insights",
            get(handlers::get_insights).post(handlers::analyze_transactions),
        )
        .route("/prediction", get(handlers::get_prediction))
        .route("/trends", get(handlers::get_trends))
        .route("/analyze", post(handlers::analyze_transaction));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        return cors;
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    cors.allow_origin(origins)
}

/// Start the server
pub async fn serve(
    transactions: Vec<Transaction>,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let count = transactions.len();
    let app = create_router(transactions, config);
    let addr = format!("{}:{}", host, port);

    info!(transactions = count, "Starting server at http://{}", addr);

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
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
