//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// LLM configuration
    pub llm: LlmConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Ollama connection used by the slot extractor
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the Ollama server
    pub host: String,
    /// Model name
    pub model: String,
    /// Timeout for a single LLM call
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            host: "http://127.0.0.1:11434".to_string(),
            model: "llama3.1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let llm_defaults = LlmConfig::default();
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8000),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            llm: LlmConfig {
                host: env::var("OLLAMA_HOST").unwrap_or(llm_defaults.host),
                model: env::var("OLLAMA_MODEL").unwrap_or(llm_defaults.model),
                timeout: env::var("OLLAMA_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(llm_defaults.timeout),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
