// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! User configuration persisted as JSON in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::provider::{RestConfig, SourceConfig, rest::DEFAULT_PER_PAGE};

/// Settings read at startup. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CMS site root; enables the REST source when set.
    pub wordpress_url: Option<String>,
    pub auth_token: Option<String>,
    pub public_portal: bool,
    pub posts_api: bool,
    pub per_page: u32,
    pub timeout_secs: u64,
    /// JSON fixture used when no CMS is configured.
    pub fixture_path: Option<PathBuf>,
    pub dark_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wordpress_url: None,
            auth_token: None,
            public_portal: false,
            posts_api: false,
            per_page: DEFAULT_PER_PAGE,
            timeout_secs: 15,
            fixture_path: None,
            dark_mode: false,
        }
    }
}

impl AppConfig {
    /// REST settings derived from this config, when a CMS URL is set.
    pub fn rest_config(&self) -> Option<RestConfig> {
        let base = self
            .wordpress_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())?;
        Some(RestConfig {
            auth_token: self.auth_token.clone(),
            public_portal: self.public_portal,
            posts_api: self.posts_api,
            per_page: self.per_page,
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            ..RestConfig::new(base)
        })
    }

    /// Source precedence: CMS, then fixture file, then the bundled samples.
    pub fn source_config(&self) -> SourceConfig {
        if let Some(rest) = self.rest_config() {
            return SourceConfig::Rest(rest);
        }
        match &self.fixture_path {
            Some(path) => SourceConfig::File(path.clone()),
            None => SourceConfig::Builtin,
        }
    }
}

/// Result of loading config from disk.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// Set when the file existed but had to be replaced by defaults.
    pub reset_reason: Option<String>,
}

/// Default location: `<config_dir>/damdesk/config.json`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("damdesk").join("config.json"))
}

/// Load configuration; missing files yield defaults, broken files yield defaults plus a reason.
pub fn load(path: &Path) -> LoadedConfig {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return LoadedConfig {
            config: AppConfig::default(),
            reset_reason: None,
        };
    }

    match read(path) {
        Ok(config) => {
            info!(path = %path.display(), "config loaded");
            LoadedConfig {
                config,
                reset_reason: None,
            }
        }
        Err(err) => {
            warn!(path = %path.display(), "{err:#}");
            LoadedConfig {
                config: AppConfig::default(),
                reset_reason: Some(format!("{err:#}")),
            }
        }
    }
}

fn read(path: &Path) -> Result<AppConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Settings in {} are not valid", path.display()))
}
