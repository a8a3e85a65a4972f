//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tally_core::models::Category;
use tally_core::test_utils::{at, expense, income};
use tower::ServiceExt;

fn sample_transactions() -> Vec<Transaction> {
    vec![
        income(4000.0).on_day(2026, 6, 1),
        expense(1500.0, Category::Housing).on_day(2026, 6, 1).recurring(),
        expense(12.5, Category::Food).on_day(2026, 6, 3),
        expense(650.0, Category::Shopping).on_day(2026, 6, 5).at_hour(23),
        expense(90.0, Category::Entertainment).on_day(2026, 5, 20),
        expense(1450.0, Category::Housing).on_day(2026, 5, 1).recurring(),
        // After the pinned "now"
        expense(80.0, Category::Food).on_day(2026, 7, 2),
    ]
}

fn setup_test_app() -> Router {
    let config = ServerConfig {
        now: Some(at(2026, 6, 15, 12)),
        ..Default::default()
    };
    create_router(sample_transactions(), config)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

// ========== Dataset API Tests ==========

#[tokio::test]
async fn test_health() {
    let response = get(setup_test_app(), "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["transactions"], 7);
}

#[tokio::test]
async fn test_list_transactions_newest_first() {
    let response = get(setup_test_app(), "/api/transactions").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let txs = json.as_array().unwrap();
    // The July transaction is after the pinned "now"
    assert_eq!(txs.len(), 6);
    assert_eq!(txs[0]["category"], "shopping");
    assert_eq!(txs[0]["type"], "expense");
}

#[tokio::test]
async fn test_list_transactions_filters() {
    let response = get(
        setup_test_app(),
        "/api/transactions?category=housing&type=expense&limit=1",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let txs = json.as_array().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0]["amount"], 1500.0);

    let response = get(setup_test_app(), "/api/transactions?now=2026-07-31").await;
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_list_transactions_bad_filter() {
    let response = get(setup_test_app(), "/api/transactions?category=groceries").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("groceries"));

    let response = get(setup_test_app(), "/api/transactions?limit=lots").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Insight API Tests ==========

#[tokio::test]
async fn test_get_insights() {
    let response = get(setup_test_app(), "/api/insights").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let good = json["goodPurchases"].as_array().unwrap().len();
    let bad = json["badPurchases"].as_array().unwrap().len();
    let neutral = json["neutralPurchases"].as_array().unwrap().len();
    assert_eq!(good + bad + neutral, 7);
    assert!(json["goodBadRatio"].as_f64().unwrap() > 0.0);
    assert_eq!(json["monthlyPrediction"]["month"], "July 2026");
}

#[tokio::test]
async fn test_invalid_now() {
    let response = get(setup_test_app(), "/api/insights?now=yesterday").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("yesterday"));
}

#[tokio::test]
async fn test_prediction_for_other_month() {
    let response = get(setup_test_app(), "/api/prediction?now=2026-12-10").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["month"], "January 2027");
    // No history in the three months up to December
    assert_eq!(json["totalEstimated"], 0.0);
    assert_eq!(json["riskLevel"], "low");
}

#[tokio::test]
async fn test_get_trends() {
    let response = get(setup_test_app(), "/api/trends").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json.get("improvementScore").is_some());
    assert!(json["riskAreas"].is_array());
    assert!(json["strengths"].is_array());
}

#[tokio::test]
async fn test_analyze_single_transaction() {
    let body = serde_json::json!({
        "id": "late-snack",
        "accountId": "acc-1",
        "amount": 34.67,
        "description": "Corner deli",
        "category": "food",
        "date": "2026-06-10T02:00:00",
        "type": "expense"
    });

    let response = post_json(setup_test_app(), "/api/analyze", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["id"], "analysis-late-snack");
    assert_eq!(json["score"], 5);
    assert_eq!(json["classification"], "neutral");
    assert_eq!(json["category"], "impulse");
    assert_eq!(json["impact"], "neutral");
}

#[tokio::test]
async fn test_analyze_rejects_bad_payload() {
    let response = post_json(
        setup_test_app(),
        "/api/analyze",
        serde_json::json!({ "amount": 12.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({
        "id": "neg",
        "accountId": "acc-1",
        "amount": -5.0,
        "description": "Refund",
        "category": "shopping",
        "date": "2026-06-10T12:00:00",
        "type": "expense"
    });
    let response = post_json(setup_test_app(), "/api/analyze", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("neg"));
}

#[tokio::test]
async fn test_post_insights_empty_list() {
    let response = post_json(setup_test_app(), "/api/insights", serde_json::json!([])).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["goodBadRatio"], 1.0);
    assert_eq!(json["totalGoodValue"], 0.0);
    assert_eq!(
        json["monthlyPrediction"]["recommendations"],
        serde_json::json!(["Your spending patterns look stable for next month"])
    );
}

// ========== Report API Tests ==========

#[tokio::test]
async fn test_get_overview() {
    let response = get(setup_test_app(), "/api/overview").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["month"], "June 2026");
    assert_eq!(json["totalIncome"], 4000.0);
    assert_eq!(json["totalExpenses"], 2162.5);
    assert_eq!(json["spendingByCategory"][0]["category"], "housing");
    assert_eq!(json["previousMonthExpenses"], 1540.0);
}

#[tokio::test]
async fn test_get_projection() {
    let response = get(
        setup_test_app(),
        "/api/projection?days=45&balance=1000&window=30",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let points = json["points"].as_array().unwrap();
    assert_eq!(points.len(), 45);
    assert_eq!(points[0]["date"], "2026-06-16");
    assert_eq!(json["startingBalance"], 1000.0);

    // Rent recurs on the 1st
    let july_first = points.iter().find(|p| p["date"] == "2026-07-01").unwrap();
    assert!(july_first["expenses"].as_f64().unwrap() >= 1500.0);
}

#[tokio::test]
async fn test_projection_rejects_bad_params() {
    for uri in [
        "/api/projection?window=0",
        "/api/projection?window=4294967295&now=2026-06-30",
        "/api/projection?days=5000",
        "/api/projection?days=-3",
        "/api/projection?balance=abc",
    ] {
        let response = get(setup_test_app(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_projection_accepts_limits() {
    let uri = format!(
        "/api/projection?days={}&window={}",
        MAX_PROJECTION_DAYS, MAX_WINDOW_DAYS
    );
    let response = get(setup_test_app(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(
        json["points"].as_array().unwrap().len(),
        MAX_PROJECTION_DAYS as usize
    );

    let response = get(
        setup_test_app(),
        &format!("/api/projection?window={}", MAX_WINDOW_DAYS + 1),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("window_days"));
}

#[tokio::test]
async fn test_cors_allowed_origin() {
    let config = ServerConfig {
        allowed_origins: vec!["http://localhost:5173".to_string()],
        now: Some(at(2026, 6, 15, 12)),
        ..Default::default()
    };
    let app = create_router(sample_transactions(), config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("origin", "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
}
