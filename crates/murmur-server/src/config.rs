use std::net::{IpAddr, SocketAddr};

use clap::{Args, Parser};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GENAI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Parser)]
#[command(name = "murmur-server", about = "Anonymous messaging backend")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "MURMUR_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(long, env = "MURMUR_PORT", default_value = "3000")]
    pub port: u16,

    #[command(flatten)]
    pub genai: GenAiConfig,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Generative-AI provider settings, read once at startup.
#[derive(Debug, Clone, Args)]
pub struct GenAiConfig {
    /// API key for the Generative Language API.
    /// Without it the server still starts, but suggestion requests fail.
    #[arg(long = "genai-api-key", env = "GOOGLE_GENERATIVE_AI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used for message suggestions
    #[arg(long, env = "MURMUR_SUGGEST_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the Generative Language API
    #[arg(long = "genai-endpoint", env = "MURMUR_GENAI_ENDPOINT", default_value = DEFAULT_GENAI_ENDPOINT)]
    pub endpoint: String,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_GENAI_ENDPOINT.to_string(),
        }
    }
}
