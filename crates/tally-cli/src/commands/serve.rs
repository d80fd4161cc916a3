//! Server command implementation

use std::path::Path;

use anyhow::Result;
use tally_server::{parse_origins, ServerConfig, DEFAULT_CORS_ORIGIN};

use super::load_analyzer;

/// Allowed origins from `CORS_ORIGIN` (comma-separated)
pub fn cors_origins_from_env() -> Vec<String> {
    let raw = std::env::var("CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());
    parse_origins(&raw)
}

pub async fn cmd_serve(config_path: Option<&Path>, host: &str, port: u16) -> Result<()> {
    let analyzer = load_analyzer(config_path)?;
    let allowed_origins = cors_origins_from_env();

    println!("🚀 Starting expense analyzer service...");
    println!("   Listening: http://{}:{}", host, port);
    if allowed_origins.is_empty() {
        println!("   CORS: same-origin only");
    } else {
        println!("   CORS: {}", allowed_origins.join(", "));
    }
    println!();

    let config = ServerConfig { allowed_origins };
    tally_server::serve_with_config(analyzer, host, port, config).await
}
