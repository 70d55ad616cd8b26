//! Configuration loading for Genolens.
//! Reads genolens.toml from the current directory or path in GENOLENS_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;

use genolens_sources::firebrowse::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, FIREBROWSE_API_URL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub firebrowse: FirebrowseConfig,
    #[serde(default)]
    pub tavily: TavilyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebrowseConfig {
    #[serde(default = "default_firebrowse_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

fn default_firebrowse_url() -> String {
    FIREBROWSE_API_URL.to_string()
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

impl Default for FirebrowseConfig {
    fn default() -> Self {
        Self {
            base_url: default_firebrowse_url(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TavilyConfig {
    /// API key for api.tavily.com. Empty leaves the search client unavailable.
    #[serde(default)]
    pub api_key: String,
}


impl Config {
    /// Load configuration from genolens.toml.
    /// Checks GENOLENS_CONFIG env var first, then current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path =
            std::env::var("GENOLENS_CONFIG").unwrap_or_else(|_| "genolens.toml".to_string());

        if !Path::new(&path).exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy genolens.example.toml to genolens.toml and edit it.",
                path
            );
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
