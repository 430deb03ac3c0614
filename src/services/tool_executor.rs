use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::constants::limits::LOG_SUBSTRING_LENGTH;
use crate::constants::network::TIMEOUT_MCP_TOOL_CALL_MS;
use crate::errors::ToolError;
use crate::services::logger::Logger;
use crate::services::request_context::RequestContext;
use crate::utils::text::preview;

use serde_json::Value;

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn handle(&self, args: Value, ctx: &RequestContext) -> Result<String, ToolError>;
}

#[derive(Clone)]
pub struct ToolExecutor {
    logger: Logger,
    handlers: Arc<HashMap<String, Arc<dyn ToolHandler>>>,
    call_timeout: Duration,
}

impl ToolExecutor {
    pub fn new(logger: Logger, handlers: HashMap<String, Arc<dyn ToolHandler>>) -> Self {
        Self {
            logger: logger.child("executor"),
            handlers: Arc::new(handlers),
            call_timeout: Duration::from_millis(TIMEOUT_MCP_TOOL_CALL_MS),
        }
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Runs one tool call under the call deadline. When the deadline fires the
    /// handler future is dropped, which aborts its in-flight token fetch or
    /// backend request.
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        ctx: &RequestContext,
    ) -> Result<String, ToolError> {
        let Some(handler) = self.handlers.get(name).cloned() else {
            return Err(ToolError::invalid_params(format!("Unknown tool: {}", name)));
        };

        let started = Instant::now();
        let outcome = match tokio::time::timeout(self.call_timeout, handler.handle(args, ctx)).await
        {
            Ok(result) => result,
            Err(_) => Err(ToolError::timeout(format!(
                "{} timed out after {} ms",
                name,
                self.call_timeout.as_millis()
            ))),
        };
        let duration_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            Ok(text) => self.logger.info(
                "tool call completed",
                Some(&serde_json::json!({
                    "tool": name,
                    "call_id": ctx.call_id(),
                    "duration_ms": duration_ms,
                    "bytes": text.len(),
                })),
            ),
            Err(err) => self.logger.warn(
                "tool call failed",
                Some(&serde_json::json!({
                    "tool": name,
                    "call_id": ctx.call_id(),
                    "duration_ms": duration_ms,
                    "code": err.code,
                    "retryable": err.retryable,
                    "message": preview(&err.message, LOG_SUBSTRING_LENGTH),
                    "hint": err.hint,
                    "details": err.details,
                })),
            ),
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ToolErrorKind;

    struct Echo;

    #[async_trait]
    impl ToolHandler for Echo {
        async fn handle(&self, args: Value, _ctx: &RequestContext) -> Result<String, ToolError> {
            Ok(args.to_string())
        }
    }

    struct Slow;

    #[async_trait]
    impl ToolHandler for Slow {
        async fn handle(&self, _args: Value, _ctx: &RequestContext) -> Result<String, ToolError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("late".to_string())
        }
    }

    fn executor() -> ToolExecutor {
        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        handlers.insert("echo".to_string(), Arc::new(Echo));
        handlers.insert("slow".to_string(), Arc::new(Slow));
        ToolExecutor::new(Logger::new("test"), handlers)
    }

    #[tokio::test]
    async fn dispatches_to_registered_handler() {
        let out = executor()
            .execute("echo", serde_json::json!({"a": 1}), &RequestContext::stdio())
            .await
            .expect("echo");
        assert_eq!(out, r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn unknown_tool_is_invalid_params() {
        let err = executor()
            .execute("nope", Value::Null, &RequestContext::stdio())
            .await
            .expect_err("unknown");
        assert_eq!(err.kind, ToolErrorKind::InvalidParams);
    }

    #[tokio::test]
    async fn deadline_cancels_slow_handler() {
        let err = executor()
            .with_call_timeout(Duration::from_millis(20))
            .execute("slow", Value::Null, &RequestContext::stdio())
            .await
            .expect_err("timeout");
        assert_eq!(err.kind, ToolErrorKind::Timeout);
        assert!(err.retryable);
    }
}
