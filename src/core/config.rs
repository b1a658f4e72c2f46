//! Configuration management for troupe
//!
//! Supports environment variables, config files, and runtime overrides.
//!
//! Config file location: ~/.config/troupe/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{Result, TroupeError};

/// Main configuration for troupe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Completion provider configuration
    pub provider: ProviderConfig,
    /// Tool bridge configuration
    pub bridge: BridgeConfig,
    /// Browser configuration
    pub browser: BrowserConfig,
    /// Agent behavior configuration
    pub agent: AgentConfig,
}

/// Completion provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the OpenAI-compatible chat-completions API
    pub base_url: String,
    /// API key, absent until supplied via env or config file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model name sent with every request
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Default sampling temperature
    pub temperature: f32,
}

/// Tool bridge (MCP server) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Base URL of the MCP server, requests go to {base_url}/mcp
    pub base_url: String,
    /// Access token for the service backing the bridge (e.g. GitHub)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
}

/// Browser automation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Whether browsing scenarios are enabled
    pub enabled: bool,
    /// Session name for agent-browser
    pub session_name: String,
    /// Whether to run in headed mode (visible browser)
    pub headed: bool,
}

/// Agent behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Number of recent turns kept in a conversation history
    pub max_history: usize,
    /// Whether to show debug output
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            bridge: BridgeConfig::default(),
            browser: BrowserConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("OPENAI_API_ENDPOINT")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key: env::var("OPENAI_API_KEY").ok(),
            model: env::var("DEFAULT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            timeout_secs: 120,
            temperature: 0.7,
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("MCP_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            github_token: env::var("GITHUB_TOKEN").ok(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            enabled: env::var("TROUPE_BROWSER_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            session_name: env::var("TROUPE_BROWSER_SESSION")
                .unwrap_or_else(|_| "troupe".to_string()),
            headed: env::var("TROUPE_BROWSER_HEADED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_history: 10,
            debug: env::var("TROUPE_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("troupe")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(TroupeError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| TroupeError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| TroupeError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| TroupeError::config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TroupeError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| TroupeError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// The API key, or a configuration error when it was never supplied
    ///
    /// Checked at agent/team construction so that a missing credential
    /// fails before the first provider call.
    pub fn require_api_key(&self) -> Result<&str> {
        self.provider
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                TroupeError::config(
                    "OPENAI_API_KEY is not set. Add it to your environment or .env file.",
                )
            })
    }

    /// Full chat-completions endpoint URL
    pub fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.provider.base_url.trim_end_matches('/')
        )
    }
}
