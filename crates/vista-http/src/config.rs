//! HTTP transport configuration, loaded from TOML.
//!
//! ```toml
//! base_url = "https://vista.example.org"
//! timeout_secs = 60
//! accept_invalid_certs = false
//! use_system_proxy = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading an [`HttpConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid TOML for this config.
    #[error("invalid config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Where the server lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Server root; request paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout covering connect, send, and body read.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Skip TLS certificate validation (self-signed development servers).
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    #[serde(default = "default_use_system_proxy")]
    pub use_system_proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            accept_invalid_certs: false,
            use_system_proxy: default_use_system_proxy(),
        }
    }
}

// Serde default functions
fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_use_system_proxy() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("vista-client/{}", env!("CARGO_PKG_VERSION"))
}

impl HttpConfig {
    /// Defaults pointed at `base_url`.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Try to load config, returning defaults if the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default HTTP config: {}", e);
                Self::default()
            }
        }
    }
}
