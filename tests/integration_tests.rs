//! Integration tests for the HTTP service
//!
//! Drives the full router in-process: request body → validation → binning →
//! route assignment → JSON response.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use recipient_router::cli::{build_router, AppState};
use recipient_router::client::{synthetic_recipients, verify_server, RouteClient};
use recipient_router::config::{MessageMode, ServiceConfig};
use recipient_router::routing::{route, verify_routes, RouteResponse};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    build_router(AppState::new(ServiceConfig::default()))
}

fn echo_app() -> Router {
    let config = ServiceConfig {
        message_mode: MessageMode::Echo,
        ..ServiceConfig::default()
    };
    build_router(AppState::new(config))
}

fn route_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/route")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// POST /route
// ============================================================================

#[tokio::test]
async fn test_route_single_recipient() {
    let body = json!({"message": "hello", "recipients": ["+15555550000"]});
    let (status, value) = send(test_app(), route_request(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        value,
        json!({
            "message": "SH Rocks",
            "routes": [{"ip": "10.0.1.1", "recipients": ["+15555550000"]}]
        })
    );
}

#[tokio::test]
async fn test_route_thirteen_recipients() {
    let recipients = synthetic_recipients(13);
    let body = json!({"message": "hello", "recipients": recipients});
    let (status, value) = send(test_app(), route_request(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    let response: RouteResponse = serde_json::from_value(value).unwrap();
    let addresses: Vec<&str> = response
        .routes
        .iter()
        .map(|r| r.address.as_str())
        .collect();
    assert_eq!(addresses, vec!["10.0.3.1", "10.0.1.1", "10.0.1.2", "10.0.1.3"]);
    assert_eq!(response.routes.routes()[0].recipients, recipients[..10].to_vec());
}

#[tokio::test]
async fn test_route_thirty_recipients() {
    let recipients = synthetic_recipients(30);
    let body = json!({"message": "hello", "recipients": recipients});
    let (_, value) = send(test_app(), route_request(body.to_string())).await;

    assert_eq!(value["routes"][0]["ip"], "10.0.4.1");
    assert_eq!(value["routes"][0]["recipients"].as_array().unwrap().len(), 25);
    assert_eq!(value["routes"][1]["ip"], "10.0.2.1");
    assert_eq!(value["routes"][1]["recipients"], json!(recipients[25..].to_vec()));
    assert_eq!(value["routes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_route_tables_verify_for_many_sizes() {
    let app = test_app();

    for n in [1, 4, 5, 9, 10, 24, 25, 26, 49, 51, 99, 250] {
        let body = json!({"message": "m", "recipients": synthetic_recipients(n)});
        let (status, value) = send(app.clone(), route_request(body.to_string())).await;
        assert_eq!(status, StatusCode::OK, "status for n={n}");

        let response: RouteResponse = serde_json::from_value(value).unwrap();
        verify_routes(n, &response.routes).unwrap();
        let flat: Vec<String> = response.routes.recipients().cloned().collect();
        assert_eq!(flat, synthetic_recipients(n), "order for n={n}");
    }
}

#[tokio::test]
async fn test_route_is_idempotent() {
    let app = test_app();
    let body = json!({"message": "m", "recipients": synthetic_recipients(77)}).to_string();

    let (_, first) = send(app.clone(), route_request(body.clone())).await;
    let (_, second) = send(app, route_request(body)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_route_echo_message_mode() {
    let body = json!({"message": "hello there", "recipients": ["a"]});
    let (status, value) = send(echo_app(), route_request(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["message"], "hello there");
}

#[tokio::test]
async fn test_route_without_content_type() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/route")
        .body(Body::from(r#"{"message": "m", "recipients": ["a", "b"]}"#))
        .unwrap();
    let (status, value) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["routes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let app = test_app();
    let mut tasks = tokio::task::JoinSet::new();

    for n in [1, 7, 13, 30, 64, 101, 250, 3] {
        let app = app.clone();
        // Distinct recipients per request so crossed responses would show
        let recipients: Vec<String> = (0..n).map(|i| format!("req{n}-{i}")).collect();
        tasks.spawn(async move {
            let body = json!({"message": format!("batch {n}"), "recipients": recipients});
            let (status, value) = send(app, route_request(body.to_string())).await;
            (recipients, status, value)
        });
    }

    let mut completed = 0;
    while let Some(joined) = tasks.join_next().await {
        let (recipients, status, value) = joined.unwrap();
        assert_eq!(status, StatusCode::OK);
        let response: RouteResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.routes, route(&recipients));
        completed += 1;
    }
    assert_eq!(completed, 8);
}

// ============================================================================
// Rejected Requests
// ============================================================================

#[tokio::test]
async fn test_route_rejects_empty_recipients() {
    let body = json!({"message": "hello", "recipients": []});
    let (status, value) = send(test_app(), route_request(body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value, json!({"error": "[] is too short"}));
}

#[tokio::test]
async fn test_route_rejects_duplicates() {
    let body = json!({"message": "hello", "recipients": ["a", "a"]});
    let (status, value) = send(test_app(), route_request(body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "[\"a\",\"a\"] has non-unique elements");
    assert!(value.get("routes").is_none());
}

#[tokio::test]
async fn test_route_rejects_missing_message() {
    let body = json!({"recipients": ["a"]});
    let (status, value) = send(test_app(), route_request(body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "'message' is a required property");
}

#[tokio::test]
async fn test_route_rejects_malformed_json() {
    let (status, value) = send(test_app(), route_request("{\"message\": ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to parse JSON"));
}

#[tokio::test]
async fn test_route_rejects_wrong_method() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/route")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// Auxiliary Endpoints
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, value) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_tiers_endpoint() {
    let request = Request::builder()
        .uri("/tiers")
        .body(Body::empty())
        .unwrap();
    let (_, value) = send(test_app(), request).await;

    let capacities: Vec<u64> = value["tiers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["capacity"].as_u64().unwrap())
        .collect();
    assert_eq!(capacities, vec![25, 10, 5, 1]);
    assert_eq!(value["tiers"][0]["prefix"], "10.0.4.");
}

#[tokio::test]
async fn test_schema_endpoint() {
    let request = Request::builder()
        .uri("/schema")
        .body(Body::empty())
        .unwrap();
    let (_, value) = send(test_app(), request).await;

    assert_eq!(value["required"], json!(["message", "recipients"]));
    assert_eq!(value["properties"]["recipients"]["minItems"], 1);
}

// ============================================================================
// Client Against Live Server
// ============================================================================

#[tokio::test]
async fn test_client_verifies_live_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, test_app()).await.unwrap();
    });

    let client = RouteClient::new(&format!("http://{addr}")).unwrap();
    assert!(client.health().await.unwrap());

    let outcomes = verify_server(&client, "SH Rocks", 30, Some("SH Rocks"))
        .await
        .unwrap();
    assert_eq!(outcomes.len(), 30);
}
