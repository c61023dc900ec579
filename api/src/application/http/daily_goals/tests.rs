use std::sync::Arc;

use axum::Router;
use axum::http::{Method, StatusCode, header::CONTENT_TYPE};
use axum_test::TestServer;
use chrono::NaiveDate;
use clap::Parser;
use nutrigoal_core::{
    domain::{
        common::{RecalculationConfig, SupabaseConfig},
        daily_goals::{
            entities::{FoodEntry, NutritionGoals, NutritionItem},
            services::DailyGoalsRecalculator,
        },
    },
    infrastructure::{
        daily_goals::repositories::{
            DataStoreRepository, InMemoryDailyGoalsRepository, SupabaseDailyGoalsRepository,
        },
        supabase::SupabaseClient,
    },
};
use serde_json::{Value, json};

use crate::application::http::server::{
    app_state::AppState,
    http_server::{ALLOWED_HEADERS, app_router, router},
};
use crate::args::Args;

const PATH: &str = "/functions/v1/recalculate-daily-goals";
const USER_ID: &str = "3f2a7c1e-8d4b-4a8e-9c1f-2b6d5e7a9f00";

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
}

fn state(repository: DataStoreRepository) -> AppState {
    let args = Args::parse_from([
        "nutrigoal-api",
        "--data-store",
        "memory",
        "--server-root-path",
        "/functions/v1",
    ]);
    let service = DailyGoalsRecalculator::new(repository, RecalculationConfig::default());

    AppState::new(Arc::new(args), service)
}

fn setup() -> (TestServer, InMemoryDailyGoalsRepository) {
    let repository = InMemoryDailyGoalsRepository::new();
    let state = state(DataStoreRepository::InMemory(repository.clone()));
    let server = TestServer::new(app_router(state)).unwrap();

    (server, repository)
}

/// A REST endpoint that rejects every request the way PostgREST rejects a bad key.
async fn rejecting_store() -> DataStoreRepository {
    let app = Router::new().fallback(|| async {
        (
            StatusCode::UNAUTHORIZED,
            [(CONTENT_TYPE, "application/json")],
            r#"{"message":"Invalid API key"}"#,
        )
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = SupabaseClient::new(SupabaseConfig {
        url: format!("http://{addr}"),
        service_role_key: "wrong-key".to_string(),
    })
    .unwrap();
    DataStoreRepository::Supabase(SupabaseDailyGoalsRepository::new(client))
}

async fn seed_goals(repository: &InMemoryDailyGoalsRepository, goals: Value) {
    let goals: NutritionGoals = serde_json::from_value(goals).unwrap();
    repository.insert_user_profile(USER_ID, Some(goals)).await;
}

async fn seed_entry(repository: &InMemoryDailyGoalsRepository, hour: u32, items: &[(&str, f64)]) {
    let nutrition = items
        .iter()
        .map(|(component, value)| NutritionItem::new(*component, *value))
        .collect();
    repository
        .insert_food_entry(FoodEntry::new(
            USER_ID,
            date().and_hms_opt(hour, 0, 0).unwrap(),
            nutrition,
        ))
        .await;
}

fn body() -> Value {
    json!({ "userId": USER_ID, "date": "2024-01-05" })
}

#[tokio::test]
async fn test_recalculate_without_entries() {
    let (server, repository) = setup();
    seed_goals(&repository, json!({ "a": { "target": 10 } })).await;

    let response = server.post(PATH).json(&body()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "message": "Daily goals recalculated successfully",
            "updatedGoals": { "a": { "target": 10, "actual": 0 } }
        })
    );
}

#[tokio::test]
async fn test_recalculate_sums_entries_and_drops_unknown_components() {
    let (server, repository) = setup();
    seed_goals(
        &repository,
        json!({ "a": { "target": 10 }, "b": { "target": 5, "unit": "g" } }),
    )
    .await;
    seed_entry(&repository, 8, &[("a", 3.0), ("z", 99.0)]).await;
    seed_entry(&repository, 18, &[("a", 4.0)]).await;

    let response = server.post(PATH).json(&body()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let updated_goals = &response.json::<Value>()["updatedGoals"];
    assert_eq!(
        updated_goals,
        &json!({
            "a": { "target": 10, "actual": 7 },
            "b": { "target": 5, "unit": "g", "actual": 0 }
        })
    );
    assert!(updated_goals.get("z").is_none());
}

#[tokio::test]
async fn test_recalculate_persists_latest_result_only() {
    let (server, repository) = setup();
    seed_goals(&repository, json!({ "calories": { "target": 2000 } })).await;
    seed_entry(&repository, 12, &[("calories", 640.0)]).await;

    let first = server.post(PATH).json(&body()).await.json::<Value>();
    let second = server.post(PATH).json(&body()).await.json::<Value>();

    assert_eq!(first, second);
    let stored = repository.daily_goals(USER_ID, date()).await.unwrap();
    assert_eq!(stored.goals["calories"].actual, 640.0);
    assert_eq!(repository.daily_goals_count().await, 1);
}

#[tokio::test]
async fn test_missing_user_id() {
    let (server, _) = setup();

    let response = server
        .post(PATH)
        .json(&json!({ "date": "2024-01-05" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "userId and date are required" })
    );
}

#[tokio::test]
async fn test_invalid_date_format() {
    let (server, _) = setup();

    let response = server
        .post(PATH)
        .json(&json!({ "userId": USER_ID, "date": "2024-1-5" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Invalid date format: must be YYYY-MM-DD" })
    );
}

#[tokio::test]
async fn test_non_string_user_id() {
    let (server, _) = setup();

    let response = server
        .post(PATH)
        .json(&json!({ "userId": 42, "date": "2024-01-05" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Invalid userId: must be a string"
    );
}

#[tokio::test]
async fn test_profile_not_found() {
    let (server, repository) = setup();

    let response = server.post(PATH).json(&body()).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        format!("User profile not found for userId: {USER_ID}")
    );
    assert_eq!(repository.daily_goals_count().await, 0);
}

#[tokio::test]
async fn test_goals_not_found() {
    let (server, repository) = setup();
    repository.insert_user_profile(USER_ID, None).await;

    let response = server.post(PATH).json(&body()).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "User profile or nutrition goals not found"
    );
}

#[tokio::test]
async fn test_malformed_json_body() {
    let (server, _) = setup();

    let response = server.post(PATH).text("{\"userId\": ").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_options_preflight() {
    let (server, _) = setup();

    let response = server.method(Method::OPTIONS, PATH).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().is_empty());
    assert_eq!(response.header("access-control-allow-origin"), "*");
    let allowed: Vec<String> = response
        .header("access-control-allow-headers")
        .to_str()
        .unwrap()
        .split(',')
        .map(|name| name.trim().to_string())
        .collect();
    assert_eq!(
        allowed,
        vec!["authorization", "x-client-info", "apikey", "content-type"]
    );
}

#[tokio::test]
async fn test_cors_headers_on_every_response() {
    let (server, repository) = setup();
    seed_goals(&repository, json!({ "a": { "target": 10 } })).await;

    let ok = server.post(PATH).json(&body()).await;
    let failed = server.post(PATH).json(&json!({})).await;

    for response in [ok, failed] {
        assert_eq!(response.header("access-control-allow-origin"), "*");
        assert_eq!(response.header("access-control-allow-headers"), ALLOWED_HEADERS);
    }
}

#[tokio::test]
async fn test_any_method_runs_recalculation() {
    let (server, repository) = setup();
    seed_goals(&repository, json!({ "a": { "target": 10 } })).await;

    let response = server.put(PATH).json(&body()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(repository.daily_goals(USER_ID, date()).await.is_some());
}

#[tokio::test]
async fn test_health() {
    let (server, _) = setup();

    let response = server.get("/functions/v1/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_openapi_document_lists_endpoint() {
    let (server, _) = setup();

    let response = server.get("/functions/v1/api-docs/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<Value>()["paths"].get(PATH).is_some());
}

#[tokio::test]
async fn test_data_store_failure_returns_store_message() {
    let server = TestServer::new(app_router(state(rejecting_store().await))).unwrap();

    let response = server.post(PATH).json(&body()).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": "Invalid API key" }));
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_metrics_endpoint_has_cors_headers() {
    let repository = DataStoreRepository::InMemory(InMemoryDailyGoalsRepository::new());
    let server = TestServer::new(router(state(repository)).unwrap()).unwrap();

    let response = server.get("/functions/v1/metrics").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(response.header("access-control-allow-headers"), ALLOWED_HEADERS);
}
