//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod insights;
pub mod reports;
pub mod transactions;

// Re-export all handlers for use in router
pub use insights::*;
pub use reports::*;
pub use transactions::*;

use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    Json, Query,
};
use serde::Deserialize;

use crate::AppError;

/// Query parameters shared by the read-only dashboard endpoints
#[derive(Debug, Default, Deserialize)]
pub struct NowQuery {
    /// Reference time (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    pub now: Option<String>,
}

/// Unwrap query params, turning malformed values into a 400
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|e| AppError::bad_request(&e.body_text()))
}

/// Unwrap a JSON body, turning malformed payloads into a 400
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|e| AppError::bad_request(&e.body_text()))
}
