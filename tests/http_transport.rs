mod common;
use common::{search_call, server_for, StaticToken, SEARCH_PATH};

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use vertex_search_mcp::mcp::http::router;
use wiremock::matchers::{header as header_is, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn post(body: String, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::from(body)).expect("request")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn http_authorization_header_reaches_backend() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(header_is("authorization", "Bearer http-caller"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"document": {"derivedStructData": {"snippets": [{"snippet": "hello"}]}}}]
        })))
        .expect(1)
        .mount(&backend)
        .await;

    let tokens = StaticToken::new("ambient");
    let app = router(server_for(&backend.uri(), tokens.clone(), false));
    let response = app
        .oneshot(post(
            search_call(1, json!({"query": "greeting"})),
            Some("Bearer http-caller"),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let out = json_body(response).await;
    assert_eq!(out["id"], 1);
    assert_eq!(out["result"]["content"][0]["text"], "hello");
    assert_eq!(tokens.calls(), 0);
}

#[tokio::test]
async fn http_without_authorization_falls_back_to_ambient_token() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(header_is("authorization", "Bearer ambient"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&backend)
        .await;

    let tokens = StaticToken::new("ambient");
    let app = router(server_for(&backend.uri(), tokens.clone(), false));
    let response = app
        .oneshot(post(search_call(2, json!({"query": "q"})), None))
        .await
        .expect("response");

    let out = json_body(response).await;
    assert_eq!(out["result"]["content"][0]["text"], "No content found for the query.");
    assert_eq!(tokens.calls(), 1);
}

#[tokio::test]
async fn http_notification_is_accepted_without_body() {
    let app = router(server_for("http://127.0.0.1:9", StaticToken::new("t"), false));
    let response = app
        .oneshot(post(
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
            None,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn http_tools_list_advertises_search() {
    let app = router(server_for("http://127.0.0.1:9", StaticToken::new("t"), false));
    let response = app
        .oneshot(post(
            json!({"jsonrpc": "2.0", "id": "list", "method": "tools/list"}).to_string(),
            None,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let out = json_body(response).await;
    assert_eq!(out["result"]["tools"][0]["name"], "search");
    assert_eq!(out["result"]["tools"][0]["inputSchema"]["required"], json!(["query"]));
}

#[tokio::test]
async fn http_malformed_body_is_parse_error() {
    let app = router(server_for("http://127.0.0.1:9", StaticToken::new("t"), false));
    let response = app
        .oneshot(post("not json".to_string(), None))
        .await
        .expect("response");
    let out = json_body(response).await;
    assert_eq!(out["error"]["code"], -32700);
}
