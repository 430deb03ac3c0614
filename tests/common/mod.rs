#![allow(dead_code)]

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use vertex_search_mcp::app::App;
use vertex_search_mcp::errors::SearchError;
use vertex_search_mcp::mcp::server::McpServer;
use vertex_search_mcp::services::credentials::{CredentialResolver, TokenSource};
use vertex_search_mcp::services::logger::Logger;
use vertex_search_mcp::services::request_context::RequestContext;
use vertex_search_mcp::services::search_client::SearchClient;

pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub const SEARCH_PATH: &str = "/v1/projects/test-project/locations/global/collections/default_collection/engines/test-app/servingConfigs/default_search:search";

pub fn restore_env(key: &str, previous: Option<String>) {
    match previous {
        Some(value) => std::env::set_var(key, value),
        None => std::env::remove_var(key),
    }
}

/// Ambient token source that hands out a fixed token and counts calls.
pub struct StaticToken {
    token: &'static str,
    calls: AtomicUsize,
}

impl StaticToken {
    pub fn new(token: &'static str) -> Arc<Self> {
        Arc::new(Self {
            token,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self, _scopes: &[&str]) -> Result<String, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.token.to_string())
    }
}

pub fn server_for(base_uri: &str, tokens: Arc<StaticToken>, is_debug: bool) -> McpServer {
    let logger = Logger::new("test");
    let client = SearchClient::new(logger.clone()).expect("client");
    let app = App::from_parts(
        logger,
        CredentialResolver::new(tokens),
        client,
        format!("{}{}", base_uri, SEARCH_PATH),
        is_debug,
    )
    .expect("app");
    McpServer::new(app)
}

pub fn search_call(id: i64, arguments: Value) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": "search", "arguments": arguments },
    })
    .to_string()
}

pub async fn call(server: &McpServer, raw: &str, ctx: &RequestContext) -> Value {
    let response = server.handle_message(raw, ctx).await.expect("response");
    serde_json::to_value(response).expect("json")
}

pub fn result_text(out: &Value) -> &str {
    out["result"]["content"][0]["text"]
        .as_str()
        .expect("text content")
}
