//! Dataset handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::query_params;
use crate::{AppError, AppState, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use tally_core::{Category, Transaction, TransactionType};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    pub limit: Option<usize>,
    /// Filter by category (food, housing, ...)
    pub category: Option<String>,
    /// Filter by direction (income, expense)
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub now: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub transactions: usize,
}

/// GET /api/health - Liveness check with dataset size
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        transactions: state.transactions.len(),
    })
}

/// GET /api/transactions - Transactions up to `now`, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TransactionQuery>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let params = query_params(query)?;
    let now = state.now(params.now.as_deref())?;

    let category = params
        .category
        .as_deref()
        .map(|c| c.parse::<Category>())
        .transpose()
        .map_err(|e| AppError::bad_request(&e))?;
    let transaction_type = params
        .transaction_type
        .as_deref()
        .map(|t| t.parse::<TransactionType>())
        .transpose()
        .map_err(|e| AppError::bad_request(&e))?;
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT);

    let mut transactions: Vec<Transaction> = state
        .transactions
        .iter()
        .filter(|t| t.date <= now)
        .filter(|t| category.map_or(true, |c| t.category == c))
        .filter(|t| transaction_type.map_or(true, |k| t.transaction_type == k))
        .cloned()
        .collect();
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions.truncate(limit);

    Ok(Json(transactions))
}
