pub mod network {
    pub const TIMEOUT_MCP_TOOL_CALL_MS: u64 = 55_000;
    pub const TIMEOUT_CONNECTION_MS: u64 = 5_000;
    pub const TIMEOUT_IDLE_MS: u64 = 300_000;
    pub const HTTP_BIND_HOST: &str = "0.0.0.0";
    pub const HTTP_ENDPOINT_PATH: &str = "/mcp";
}

pub mod limits {
    pub const LOG_SUBSTRING_LENGTH: usize = 100;
    pub const DEFAULT_EXTRACTIVE_SEGMENT_COUNT: i64 = 1;
}

pub mod vertex {
    pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
    pub const API_HOST: &str = "discoveryengine.googleapis.com";
    pub const COLLECTION: &str = "default_collection";
    pub const SERVING_CONFIG: &str = "default_search";
    pub const CONFIG_FILE_NAME: &str = "vertex.yaml";
    pub const ENV_CONFIG: &str = "VERTEX_CONFIG";
    pub const ENV_DEBUG: &str = "VERTEX_DEBUG";
}

pub mod digest {
    pub const SEPARATOR: &str = "\n\n---\n\n";
    pub const NO_CONTENT: &str = "No content found for the query.";
}
