//! The `search` tool: validate, authenticate, build, call, reduce, respond.

mod digest;
mod request;

pub use digest::{extract_text, result_fragments, DerivedData, ExtractiveSegment, Snippet};
pub use request::{
    build_request, ContentSearchSpec, ExtractiveContentSpec, SearchRequest, SnippetSpec, ToolCall,
};

use async_trait::async_trait;
use serde_json::Value;

use crate::constants::digest::NO_CONTENT;
use crate::errors::{SearchError, ToolError};
use crate::services::credentials::CredentialResolver;
use crate::services::logger::Logger;
use crate::services::request_context::RequestContext;
use crate::services::search_client::SearchClient;
use crate::services::tool_executor::ToolHandler;

/// Stateless across calls; every field is shared, read-only plumbing.
#[derive(Clone)]
pub struct SearchManager {
    logger: Logger,
    credentials: CredentialResolver,
    client: SearchClient,
    url: String,
    debug: bool,
}

impl SearchManager {
    pub fn new(
        logger: Logger,
        credentials: CredentialResolver,
        client: SearchClient,
        url: impl Into<String>,
        debug: bool,
    ) -> Self {
        Self {
            logger: logger.child("search"),
            credentials,
            client,
            url: url.into(),
            debug,
        }
    }

    pub async fn search(&self, args: &Value, ctx: &RequestContext) -> Result<String, SearchError> {
        let call = ToolCall::from_args(args)?;
        let credential = self.credentials.resolve(ctx).await?;
        let body = build_request(&call);

        self.logger.debug(
            "search request",
            Some(&serde_json::json!({
                "call_id": ctx.call_id(),
                "transport": ctx.transport().as_str(),
                "caller_credential": ctx.authorization().is_some(),
                "max_extractive_segment_count": call.max_extractive_segment_count(),
            })),
        );

        let response = self
            .client
            .post_search(&self.url, &credential, &body, self.debug)
            .await?;
        if !response.is_success() {
            return Err(SearchError::BackendStatus {
                status: response.status,
                body: response.body_text(),
            });
        }

        let text = extract_text(&response.body);
        if text.trim().is_empty() {
            return Ok(NO_CONTENT.to_string());
        }
        Ok(text)
    }
}

#[async_trait]
impl ToolHandler for SearchManager {
    async fn handle(&self, args: Value, ctx: &RequestContext) -> Result<String, ToolError> {
        self.search(&args, ctx).await.map_err(ToolError::from)
    }
}
