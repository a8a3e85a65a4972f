//! Dashboard report handlers (overview cards, cash-flow projection)

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use super::{query_params, NowQuery};
use crate::{AppError, AppState};
use tally_core::insights::{project_cash_flow, CashFlowProjection};
use tally_core::{summarize_month, FinancialOverview};

/// Query parameters for the cash-flow projection
#[derive(Debug, Deserialize)]
pub struct ProjectionQuery {
    pub days: Option<u32>,
    /// Starting balance
    pub balance: Option<f64>,
    /// Trailing window in days for the moving averages
    pub window: Option<u32>,
    pub now: Option<String>,
}

/// GET /api/overview - Current month summary
pub async fn get_overview(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NowQuery>, QueryRejection>,
) -> Result<Json<FinancialOverview>, AppError> {
    let params = query_params(query)?;
    let now = state.now(params.now.as_deref())?;

    Ok(Json(summarize_month(&state.transactions, now)))
}

/// GET /api/projection - Day-by-day balance projection
pub async fn get_projection(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ProjectionQuery>, QueryRejection>,
) -> Result<Json<CashFlowProjection>, AppError> {
    let params = query_params(query)?;
    let now = state.now(params.now.as_deref())?;

    let mut options = state.config.projection.clone();
    if let Some(days) = params.days {
        options.days = days;
    }
    if let Some(window) = params.window {
        options.window_days = window;
    }
    if let Some(balance) = params.balance {
        options.starting_balance = balance;
    }
    options
        .validate()
        .map_err(|e| AppError::bad_request(&e.to_string()))?;

    Ok(Json(project_cash_flow(&state.transactions, &options, now)))
}
