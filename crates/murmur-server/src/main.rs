use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use murmur_server::config::ServerConfig;
use murmur_server::genai::{GeminiClient, GenerativeModel};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();

    if config.genai.api_key.is_none() {
        warn!("GOOGLE_GENERATIVE_AI_API_KEY is not set; /api/suggest-messages will fail");
    }
    let model: Arc<dyn GenerativeModel> = Arc::new(GeminiClient::new(&config.genai));
    info!("suggestion model: {}", config.genai.model);

    let addr = config.addr();
    let listener = TcpListener::bind(addr).await?;
    info!("murmur-server listening on http://{addr}");

    murmur_server::serve(listener, model).await
}
