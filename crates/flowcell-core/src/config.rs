use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FlowcellError, Result};

/// Top-level Flowcell configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub executor: ExecutorConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Where the external code-execution service lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    #[serde(default = "default_executor_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            base_url: default_executor_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Layering direction: "TB" (top to bottom) or "LR" (left to right).
    #[serde(default = "default_direction")]
    pub direction: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: default_direction(),
        }
    }
}

fn default_executor_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_bind() -> String {
    "127.0.0.1:7430".to_string()
}

fn default_direction() -> String {
    "TB".to_string()
}

impl AppConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| FlowcellError::ConfigNotFound(path.display().to_string()))?;

        toml::from_str(&content).map_err(|e| FlowcellError::Config(e.to_string()))
    }
}
