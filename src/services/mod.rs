pub mod config;
pub mod credentials;
pub mod logger;
pub mod request_context;
pub mod search_client;
pub mod tool_executor;
