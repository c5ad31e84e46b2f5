//! Deployment configuration.
//!
//! Settings come from an optional YAML file; every field has a default so a
//! partial file (or none at all) is valid. Command-line flags and their
//! environment variables override file values, see [`crate::cli::Cli`].
//!
//! ```yaml
//! origin: https://cms.example.org
//! language: hindi
//! probe_concurrency: 8
//! layout:
//!   hero: 4
//!   sidebar: 4
//! ```

use crate::curation::Layout;
use crate::models::Language;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

/// Origin of a local content store development server.
pub const DEFAULT_ORIGIN: &str = "http://localhost:1337";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("origin {origin:?} is not an absolute http(s) address: {reason}")]
    Origin { origin: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Content store origin; relative asset paths are resolved against it.
    pub origin: String,
    /// Default display language.
    pub language: Language,
    /// Simultaneous PDF reachability checks.
    pub probe_concurrency: usize,
    /// Per-request timeout for the store client and the probe.
    pub request_timeout_secs: u64,
    pub layout: Layout,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            language: Language::English,
            probe_concurrency: 4,
            request_timeout_secs: 10,
            layout: Layout::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Read a YAML config file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = tokio::fs::read_to_string(path).await.map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&yaml).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        info!(origin = %config.origin, language = %config.language, "Loaded configuration");
        Ok(config)
    }

    /// Apply command-line overrides; `None` keeps the current value.
    pub fn with_overrides(mut self, origin: Option<String>, language: Option<Language>) -> Self {
        if let Some(origin) = origin {
            self.origin = origin;
        }
        if let Some(language) = language {
            self.language = language;
        }
        self
    }

    /// Check that `origin` is an absolute `http`/`https` address.
    ///
    /// Relative asset paths are appended to it verbatim, so anything else
    /// would produce addresses that are neither fetchable nor stable under
    /// re-resolution.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::Origin {
            origin: self.origin.clone(),
            reason,
        };
        let url = Url::parse(&self.origin).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        if !crate::assets::is_absolute(&self.origin) {
            return Err(invalid("scheme must be lowercase".to_string()));
        }
        Ok(self)
    }
}
