// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Blocking HTTP source for the CMS asset plugin and the stock posts API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::info;
use url::Url;

use super::AssetSource;

const USER_AGENT: &str = concat!("damdesk/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_PER_PAGE: u32 = 50;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection settings for a CMS-backed asset source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    /// Use the unauthenticated public listing; credentials are never sent.
    pub public_portal: bool,
    /// Read plain posts with asset metadata instead of the plugin endpoint.
    pub posts_api: bool,
    pub per_page: u32,
    pub page: u32,
    pub timeout: Duration,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            public_portal: false,
            posts_api: false,
            per_page: DEFAULT_PER_PAGE,
            page: 1,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Full request URL including paging parameters.
    pub fn endpoint(&self) -> Result<Url> {
        let base = self.base_url.trim().trim_end_matches('/');
        let path = if self.posts_api {
            "wp-json/wp/v2/posts"
        } else if self.public_portal {
            "wp-json/tsp-dam/v1/assets/public"
        } else {
            "wp-json/tsp-dam/v1/assets"
        };

        let mut url = Url::parse(&format!("{base}/{path}"))
            .with_context(|| format!("Invalid CMS base URL {:?}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!("CMS base URL must use http or https"));
        }
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.max(1).to_string())
            .append_pair("page", &self.page.max(1).to_string());
        Ok(url)
    }

    /// Bearer header value, if one should be sent.
    pub fn authorization(&self) -> Option<String> {
        if self.public_portal {
            return None;
        }
        self.auth_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {t}"))
    }
}

/// Fetches one page of records over HTTP.
#[derive(Debug, Clone)]
pub struct RestSource {
    config: RestConfig,
}

impl RestSource {
    pub fn new(config: RestConfig) -> Self {
        Self { config }
    }
}

impl AssetSource for RestSource {
    fn describe(&self) -> String {
        match self.config.endpoint() {
            Ok(url) => format!("CMS endpoint {url}"),
            Err(_) => format!("CMS endpoint {}", self.config.base_url),
        }
    }

    fn fetch(&self) -> Result<Vec<Value>> {
        let url = self.config.endpoint()?;
        info!(%url, "fetching assets");

        let agent = ureq::AgentBuilder::new()
            .timeout(self.config.timeout)
            .build();
        let mut request = agent
            .get(url.as_str())
            .set("User-Agent", USER_AGENT)
            .set("Accept", "application/json");
        if let Some(auth) = self.config.authorization() {
            request = request.set("Authorization", &auth);
        }

        match request.call() {
            Ok(resp) => resp
                .into_json::<Vec<Value>>()
                .context("CMS response is not a JSON array"),
            Err(ureq::Error::Status(code, resp)) => {
                Err(anyhow!("API Error: {} {}", code, resp.status_text()))
            }
            Err(e) => Err(anyhow!("Failed to reach CMS: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_endpoint_with_paging() {
        let cfg = RestConfig::new("https://cms.example.com/");
        assert_eq!(
            cfg.endpoint().unwrap().as_str(),
            "https://cms.example.com/wp-json/tsp-dam/v1/assets?per_page=50&page=1"
        );
    }

    #[test]
    fn public_portal_never_sends_token() {
        let cfg = RestConfig {
            public_portal: true,
            auth_token: Some("secret".into()),
            ..RestConfig::new("https://cms.example.com")
        };
        assert_eq!(
            cfg.endpoint().unwrap().path(),
            "/wp-json/tsp-dam/v1/assets/public"
        );
        assert_eq!(cfg.authorization(), None);
    }

    #[test]
    fn posts_api_and_bearer_token() {
        let cfg = RestConfig {
            posts_api: true,
            auth_token: Some(" abc ".into()),
            per_page: 10,
            page: 3,
            ..RestConfig::new("http://localhost:8080/site")
        };
        assert_eq!(
            cfg.endpoint().unwrap().as_str(),
            "http://localhost:8080/site/wp-json/wp/v2/posts?per_page=10&page=3"
        );
        assert_eq!(cfg.authorization().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn blank_token_is_not_sent() {
        let cfg = RestConfig {
            auth_token: Some("   ".into()),
            ..RestConfig::new("https://cms.example.com")
        };
        assert_eq!(cfg.authorization(), None);
    }

    #[test]
    fn invalid_base_urls_are_rejected() {
        assert!(RestConfig::new("not a url").endpoint().is_err());
        assert!(RestConfig::new("ftp://cms.example.com").endpoint().is_err());
    }
}
