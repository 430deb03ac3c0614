mod config_error;
mod mcp_error;
mod search_error;
mod tool_error;

pub use config_error::ConfigError;
pub use mcp_error::{ErrorCode, McpError};
pub use search_error::SearchError;
pub use tool_error::{ToolError, ToolErrorKind};
