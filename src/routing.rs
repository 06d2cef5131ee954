//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    forecast::forecast_endpoint,
    not_found::get_404_not_found,
    summary::get_summary_endpoint,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Any origin may call the API so that the dashboard can be served from a
/// different port.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_health_check))
        .route(
            endpoints::SPENDING,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_SPENDING,
            delete(delete_transaction_endpoint),
        )
        .route(endpoints::FORECAST, post(forecast_endpoint))
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Lets operators check that the gateway is up.
async fn get_health_check() -> &'static str {
    "API Gateway is running..."
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc};

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use time::{OffsetDateTime, macros::date};

    use crate::{
        AppState, GatewayConfig, build_router,
        endpoints::{self, format_endpoint},
        forecast::test_utils::{spawn_forecast_service, unreachable_forecast_url},
        store::MemoryStore,
        transaction::Transaction,
    };

    fn get_test_server(forecast_url: &str) -> TestServer {
        let config = GatewayConfig {
            forecast_url: forecast_url.to_owned(),
            ..Default::default()
        };
        let state = AppState::with_store(&config, Arc::new(MemoryStore::default()));

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn health_check() {
        let server = get_test_server("http://127.0.0.1:1/predict");

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        response.assert_text("API Gateway is running...");
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let server = get_test_server("http://127.0.0.1:1/predict");

        let response = server.get("/api/nope").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["kind"], "not_found");
    }

    #[tokio::test]
    async fn create_list_delete_scenario() {
        let server = get_test_server("http://127.0.0.1:1/predict");

        server
            .get(endpoints::SPENDING)
            .await
            .assert_json(&json!([]));

        let response = server
            .post(endpoints::SPENDING)
            .json(&json!({"amount": 1200, "date": "2024-01-01", "category": "Rent"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["success"], true);

        let history: Value = server.get(endpoints::SPENDING).await.json();
        assert_eq!(history.as_array().map(Vec::len), Some(1));
        assert_eq!(history[0]["category"], "Rent");
        assert_eq!(history[0]["amount"], 1200.0);
        let rent_id = history[0]["id"].as_i64().unwrap();

        let response = server
            .post(endpoints::SPENDING)
            .json(&json!({"amount": 50}))
            .await;
        let body: Value = response.json();
        let created = body["history"]
            .as_array()
            .unwrap()
            .iter()
            .find(|transaction| transaction["id"] != rent_id)
            .unwrap()
            .clone();
        assert_eq!(created["category"], "Other");
        assert_eq!(created["amount"], 50.0);
        let today = OffsetDateTime::now_utc().date().to_string();
        assert_eq!(created["date"], today.as_str());

        server
            .delete(&format_endpoint(endpoints::DELETE_SPENDING, rent_id))
            .await
            .assert_status_ok();

        let history: Value = server.get(endpoints::SPENDING).await.json();
        assert_eq!(history, json!([created]));
    }

    #[tokio::test]
    async fn created_record_appears_exactly_once_with_assigned_id() {
        let server = get_test_server("http://127.0.0.1:1/predict");

        let body: Value = server
            .post(endpoints::SPENDING)
            .json(&json!({"amount": "19.99", "date": "2024-06-01", "category": "Food"}))
            .await
            .json();
        let id = body["history"][0]["id"].clone();

        let history: Value = server.get(endpoints::SPENDING).await.json();
        let matches = history
            .as_array()
            .unwrap()
            .iter()
            .filter(|transaction| transaction["id"] == id)
            .count();
        assert_eq!(matches, 1);
    }

    #[tokio::test]
    async fn create_without_amount_is_bad_request() {
        let server = get_test_server("http://127.0.0.1:1/predict");

        let response = server
            .post(endpoints::SPENDING)
            .json(&json!({"category": "Food"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"error": "amount is required", "kind": "validation"}));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let server = get_test_server("http://127.0.0.1:1/predict");

        let response = server
            .post(endpoints::SPENDING)
            .content_type("application/json")
            .text("{amount: ")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["kind"], "validation");
    }

    #[tokio::test]
    async fn summary_reflects_history() {
        let server = get_test_server("http://127.0.0.1:1/predict");
        for (amount, date, category) in [
            (1200, "2024-01-01", "Rent"),
            (300, "2024-01-15", "Food"),
            (1200, "2024-02-01", "Rent"),
            (600, "2024-02-10", "Food"),
        ] {
            server
                .post(endpoints::SPENDING)
                .json(&json!({"amount": amount, "date": date, "category": category}))
                .await
                .assert_status_ok();
        }

        let summary: Value = server.get(endpoints::SUMMARY).await.json();

        assert_eq!(summary["total"], 3300.0);
        assert_eq!(summary["count"], 4);
        assert_eq!(summary["by_category"][0]["category"], "Rent");
        assert_eq!(summary["monthly"][1], json!({"month": "2024-02", "total": 1800.0}));
        assert_eq!(summary["month_over_month_growth"], 20.0);
    }

    #[tokio::test]
    async fn forecast_is_relayed() {
        let forecast = json!({"predicted_next_month": 1400, "status": "ok", "trend": "up"});
        let (url, _received) = spawn_forecast_service(StatusCode::OK, forecast.clone()).await;
        let server = get_test_server(&url);

        let response = server
            .post(endpoints::FORECAST)
            .json(&json!({"history": [1200, 1350, 1280]}))
            .await;

        response.assert_status_ok();
        response.assert_json(&forecast);
    }

    #[tokio::test]
    async fn unreachable_forecast_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("spending.json");
        let original = r#"{"history": [{"id": 1, "amount": 1200, "date": "2024-01-01", "category": "Rent"}]}"#;
        fs::write(&store_path, original).unwrap();
        let config = GatewayConfig {
            store_path: store_path.clone(),
            forecast_url: unreachable_forecast_url().await,
            ..Default::default()
        };
        let server = TestServer::try_new(build_router(AppState::new(&config)))
            .expect("Could not create test server.");

        let response = server
            .post(endpoints::FORECAST)
            .json(&json!({"history": [1200, 1350, 1280]}))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.json::<Value>()["error"].is_string());
        assert_eq!(fs::read_to_string(&store_path).unwrap(), original);
    }

    #[tokio::test]
    async fn missing_store_file_is_internal_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = GatewayConfig {
            store_path: dir.path().join("missing.json"),
            ..Default::default()
        };
        let server = TestServer::try_new(build_router(AppState::new(&config)))
            .expect("Could not create test server.");

        let response = server.get(endpoints::SPENDING).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({
            "error": "Failed to read or write spending data",
            "kind": "storage",
        }));
    }

    #[tokio::test]
    async fn create_after_largest_possible_id_is_storage_error() {
        let store = MemoryStore::with_history(vec![
            Transaction::build(1.0, date!(2024 - 01 - 01)).finalize(i64::MAX),
        ]);
        let state = AppState::with_store(&GatewayConfig::default(), Arc::new(store));
        let server =
            TestServer::try_new(build_router(state)).expect("Could not create test server.");

        let response = server
            .post(endpoints::SPENDING)
            .json(&json!({"amount": 5}))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>()["kind"], "storage");
        let history: Value = server.get(endpoints::SPENDING).await.json();
        assert_eq!(history.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn store_with_null_amount_keeps_working() {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("spending.json");
        fs::write(
            &store_path,
            r#"{"history": [
                {"id": 1, "amount": 1200, "date": "2024-01-01", "category": "Rent"},
                {"id": 2, "amount": null, "date": "2024-01-02", "category": "Food"}
            ]}"#,
        )
        .unwrap();
        let config = GatewayConfig {
            store_path,
            ..Default::default()
        };
        let server = TestServer::try_new(build_router(AppState::new(&config)))
            .expect("Could not create test server.");

        let history: Value = server.get(endpoints::SPENDING).await.json();
        assert_eq!(history[1]["amount"], Value::Null);

        server
            .post(endpoints::SPENDING)
            .json(&json!({"amount": 5, "date": "2024-01-03"}))
            .await
            .assert_status_ok();

        let summary: Value = server.get(endpoints::SUMMARY).await.json();
        assert_eq!(summary["total"], 1205.0);

        let response = server
            .delete(&format_endpoint(endpoints::DELETE_SPENDING, 2))
            .await;
        response.assert_status_ok();
        let ids: Vec<_> = response.json::<Value>()["history"]
            .as_array()
            .unwrap()
            .iter()
            .map(|transaction| transaction["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&2));
    }
}
