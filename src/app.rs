use crate::errors::ToolError;
use crate::managers::search::SearchManager;
use crate::mcp::catalog::tool_catalog;
use crate::services::config::AppConfig;
use crate::services::credentials::CredentialResolver;
use crate::services::logger::{LogLevel, Logger};
use crate::services::search_client::SearchClient;
use crate::services::tool_executor::{ToolExecutor, ToolHandler};
use std::collections::HashMap;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub tool_executor: Arc<ToolExecutor>,
    pub is_debug: bool,
}

impl App {
    fn validate_tool_wiring(handlers: &HashMap<String, Arc<dyn ToolHandler>>) -> Result<(), ToolError> {
        let mut missing: Vec<String> = tool_catalog()
            .iter()
            .filter(|tool| !handlers.contains_key(&tool.name))
            .map(|tool| tool.name.clone())
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        Err(ToolError::internal("Tool wiring is incomplete")
            .with_hint("Every tool in tool_catalog.json must have a handler.")
            .with_details(serde_json::json!({ "missing_tools": missing })))
    }

    pub fn initialize(config: &AppConfig) -> Result<Self, ToolError> {
        let mut logger = Logger::new("vertex");
        if config.is_debug {
            logger.set_level(LogLevel::Debug);
        }
        let client = SearchClient::new(logger.clone())?;
        Self::from_parts(
            logger,
            CredentialResolver::with_default_credentials(),
            client,
            config.config.url(),
            config.is_debug,
        )
    }

    /// Wires the app around explicit collaborators; `initialize` uses ADC and a
    /// fresh HTTP client.
    pub fn from_parts(
        logger: Logger,
        credentials: CredentialResolver,
        client: SearchClient,
        url: String,
        is_debug: bool,
    ) -> Result<Self, ToolError> {
        let search_manager = Arc::new(SearchManager::new(
            logger.clone(),
            credentials,
            client,
            url,
            is_debug,
        ));

        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        handlers.insert("search".to_string(), search_manager);

        Self::validate_tool_wiring(&handlers)?;

        let tool_executor = Arc::new(ToolExecutor::new(logger.clone(), handlers));

        Ok(Self {
            logger,
            tool_executor,
            is_debug,
        })
    }
}
