use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use review_cell::router::review_routes;
use shared_config::AppConfig;
use shared_utils::test_utils::{MockStoreResponses, TestConfig};

fn create_test_app(config: AppConfig) -> Router {
    review_routes(Arc::new(config))
}

async fn app_with_store(mock_server: &MockServer) -> Router {
    create_test_app(TestConfig::with_store_url(&mock_server.uri()).to_app_config())
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn creating_a_review_stores_it_without_a_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/reviews"))
        .and(body_partial_json(json!({
            "appointment_id": 10,
            "rating": 4,
            "comment": "Helpful",
            "response": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::review_row(7, 10, 1, 2)
        ])))
        .mount(&mock_server)
        .await;

    let app = app_with_store(&mock_server).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/add",
            json!({
                "appointment_id": 10,
                "client_id": 1,
                "lawyer_id": 2,
                "rating": 4,
                "comment": "Helpful"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["rating"], 4);
    assert!(body["response"].is_null());
    assert_eq!(body["created_at"], body["updated_at"]);
}

#[tokio::test]
async fn responding_attaches_the_lawyer_response() {
    let mock_server = MockServer::start().await;

    let mut responded = MockStoreResponses::review_row(7, 10, 1, 2);
    responded["response"] = json!("Thank you");

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/reviews"))
        .and(query_param("id", "eq.7"))
        .and(body_partial_json(json!({ "response": "Thank you" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([responded])))
        .mount(&mock_server)
        .await;

    let app = app_with_store(&mock_server).await;

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/7/respond",
            json!({ "response": "Thank you" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["response"], "Thank you");
}

#[tokio::test]
async fn responding_to_an_unknown_review_returns_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let app = app_with_store(&mock_server).await;

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/99/respond",
            json!({ "response": "Thank you" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listings_filter_by_foreign_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/reviews"))
        .and(query_param("lawyer_id", "eq.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::review_row(7, 10, 1, 2),
            MockStoreResponses::review_row(8, 11, 3, 2),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/reviews"))
        .and(query_param("client_id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::review_row(7, 10, 1, 2),
        ])))
        .mount(&mock_server)
        .await;

    let app = app_with_store(&mock_server).await;

    let for_lawyer = app
        .clone()
        .oneshot(Request::builder().uri("/lawyer/2").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(for_lawyer.status(), StatusCode::OK);
    assert_eq!(response_json(for_lawyer).await.as_array().unwrap().len(), 2);

    let for_client = app
        .oneshot(Request::builder().uri("/client/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(for_client.status(), StatusCode::OK);
    assert_eq!(response_json(for_client).await.as_array().unwrap().len(), 1);
}
