use clap::Parser;
use std::path::PathBuf;

use vertex_search_mcp::app::App;
use vertex_search_mcp::mcp::http::serve_http;
use vertex_search_mcp::mcp::server::McpServer;
use vertex_search_mcp::services::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "vertex-search-mcp", version, about = "MCP server exposing Vertex AI Search as a `search` tool")]
struct Cli {
    /// Run the HTTP transport on this port (e.g. 8080); defaults to stdio.
    #[arg(long)]
    http: Option<String>,

    /// Folder containing vertex.yaml, or the file itself (overrides VERTEX_CONFIG).
    #[arg(long = "vertex-config", alias = "vertexConfig")]
    vertex_config: Option<PathBuf>,

    /// Log outbound requests and backend responses (overrides VERTEX_DEBUG).
    #[arg(long = "vertex-debug", alias = "vertexDebug")]
    vertex_debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.vertex_config.as_deref(), cli.vertex_debug) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let app = match App::initialize(&config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Error creating MCP server: {}", err);
            std::process::exit(1);
        }
    };
    app.logger.debug(
        "debug mode enabled",
        Some(&serde_json::json!({ "config": config.config_path.display().to_string() })),
    );

    let server = McpServer::new(app);
    let result = match cli.http.as_deref().filter(|port| !port.trim().is_empty()) {
        Some(port) => serve_http(server, port).await,
        None => server.run_stdio().await,
    };

    if let Err(err) = result {
        eprintln!("vertex-search-mcp: {}", err);
        std::process::exit(1);
    }
}
