//! Insight engine handlers

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use super::{json_body, query_params, NowQuery};
use crate::{AppError, AppState};
use tally_core::dataset;
use tally_core::insights::{
    analyze_all_purchases, analyze_purchase, generate_monthly_prediction, MonthlyPrediction,
    PurchaseAnalysis, PurchaseInsights, TrendSummary,
};
use tally_core::Transaction;

/// GET /api/insights - Full insights panel for the loaded dataset
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NowQuery>, QueryRejection>,
) -> Result<Json<PurchaseInsights>, AppError> {
    let params = query_params(query)?;
    let now = state.now(params.now.as_deref())?;

    Ok(Json(analyze_all_purchases(&state.transactions, now)))
}

/// POST /api/insights - Insights for a caller-supplied transaction list
pub async fn analyze_transactions(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NowQuery>, QueryRejection>,
    body: Result<Json<Vec<Transaction>>, JsonRejection>,
) -> Result<Json<PurchaseInsights>, AppError> {
    let params = query_params(query)?;
    let now = state.now(params.now.as_deref())?;
    let transactions = json_body(body)?;
    dataset::validate(&transactions).map_err(|e| AppError::bad_request(&e.to_string()))?;

    Ok(Json(analyze_all_purchases(&transactions, now)))
}

/// POST /api/analyze - Classify a single transaction
pub async fn analyze_transaction(
    body: Result<Json<Transaction>, JsonRejection>,
) -> Result<Json<PurchaseAnalysis>, AppError> {
    let transaction = json_body(body)?;
    dataset::validate(std::slice::from_ref(&transaction))
        .map_err(|e| AppError::bad_request(&e.to_string()))?;

    Ok(Json(analyze_purchase(&transaction)))
}

/// GET /api/prediction - Next month's spending prediction
pub async fn get_prediction(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NowQuery>, QueryRejection>,
) -> Result<Json<MonthlyPrediction>, AppError> {
    let params = query_params(query)?;
    let now = state.now(params.now.as_deref())?;

    Ok(Json(generate_monthly_prediction(&state.transactions, now)))
}

/// GET /api/trends - Recent vs older purchase quality
pub async fn get_trends(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NowQuery>, QueryRejection>,
) -> Result<Json<TrendSummary>, AppError> {
    let params = query_params(query)?;
    let now = state.now(params.now.as_deref())?;

    // Trends need the good/bad ratio, so run the whole engine
    Ok(Json(analyze_all_purchases(&state.transactions, now).trends))
}
