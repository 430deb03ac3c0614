use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use std::net::SocketAddr;

use crate::constants::network::{HTTP_BIND_HOST, HTTP_ENDPOINT_PATH};
use crate::errors::ToolError;
use crate::mcp::server::McpServer;
use crate::services::request_context::RequestContext;

/// Routes `POST /mcp` to the server. Each request is dispatched on its own
/// task by axum, so calls run concurrently.
pub fn router(server: McpServer) -> Router {
    Router::new()
        .route(HTTP_ENDPOINT_PATH, post(handle_http))
        .with_state(server)
}

fn request_context(headers: &HeaderMap) -> RequestContext {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .filter(|value| !value.is_empty());
    RequestContext::http(auth_header)
}

async fn handle_http(
    State(server): State<McpServer>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ctx = request_context(&headers);
    let raw = String::from_utf8_lossy(&body);
    match server.handle_message(raw.trim(), &ctx).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

pub async fn serve_http(server: McpServer, port: &str) -> Result<(), ToolError> {
    let bind = format!("{}:{}", HTTP_BIND_HOST, port.trim().trim_start_matches(':'));
    let addr: SocketAddr = bind
        .parse()
        .map_err(|_| ToolError::invalid_params(format!("invalid HTTP port: {}", port)))?;

    if server.is_debug() {
        server.logger().info(
            "starting MCP server (HTTP)",
            Some(&serde_json::json!({
                "addr": addr.to_string(),
                "endpoint": format!("http://localhost:{}{}", addr.port(), HTTP_ENDPOINT_PATH),
            })),
        );
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| ToolError::internal(format!("http bind failed: {}", err)))?;
    axum::serve(listener, router(server))
        .await
        .map_err(|err| ToolError::internal(format!("http server failed: {}", err)))
}
