//! Client configuration.
//!
//! Precedence, highest first: `--api-url` flag (or `VOUCH_API_URL`,
//! wired through clap's env support), `~/.vouch/config.toml`, built-in
//! default. The flag/env layer is applied in `main`; this module only
//! knows about the file and the default.

use crate::token_store::vouch_home;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default service endpoint for local development.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:4000/api";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the testimonial service, including the `/api` prefix.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl Config {
    /// Load from `~/.vouch/config.toml`. A missing file yields the
    /// built-in defaults; an unparseable one is an error.
    pub fn load() -> Result<Self> {
        let path = vouch_home().join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path. Missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(anyhow!("api_url must not be empty"));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(anyhow!("api_url must be an http(s) URL: {}", self.api_url));
        }
        Ok(())
    }
}
