//! Best-effort decorative image lookup via the Unsplash "random photo" API.
//!
//! `GET {endpoint}/photos/random?query=<q>&client_id=<key>` → `urls.regular`.
//! The page renders fine without an image, so every failure here is logged
//! and collapsed into an empty string.

use std::time::Duration;

use anyhow::{Context, bail};
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::{debug, info, warn};

pub const DEFAULT_UNSPLASH_ENDPOINT: &str = "https://api.unsplash.com";
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 10;

/// Search terms; one is picked uniformly at random per fetch.
pub const DEFAULT_QUERIES: [&str; 5] = [
    "3d robot assistant",
    "3d digital assistant",
    "3d ai chatbot",
    "3d futuristic ai",
    "hologram ai assistant",
];

#[derive(Clone)]
pub struct UnsplashConfig {
    pub endpoint: String,
    pub access_key: String,
    pub timeout_secs: u64,
}

impl UnsplashConfig {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_UNSPLASH_ENDPOINT.to_string(),
            access_key: access_key.into(),
            timeout_secs: DEFAULT_IMAGE_TIMEOUT_SECS,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl std::fmt::Debug for UnsplashConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsplashConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct RandomPhoto {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: Option<String>,
}

/// Fetches decorative images; cheap to clone.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
    cfg: UnsplashConfig,
    url_random: String,
}

impl ImageFetcher {
    /// Builds the HTTP client with the configured timeout.
    pub fn new(cfg: UnsplashConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .gzip(true)
            .build()
            .context("building Unsplash HTTP client")?;

        let url_random = format!("{}/photos/random", cfg.endpoint.trim().trim_end_matches('/'));

        info!(
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs,
            "ImageFetcher initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_random,
        })
    }

    /// Returns an image URL, or `""` when anything goes wrong.
    pub async fn fetch_decorative_image(&self) -> String {
        let query = pick_query();
        match self.try_fetch(query).await {
            Ok(url) => {
                debug!(query, "decorative image fetched");
                url
            }
            Err(err) => {
                warn!(query, error = %format!("{err:#}"), "decorative image unavailable");
                String::new()
            }
        }
    }

    async fn try_fetch(&self, query: &str) -> anyhow::Result<String> {
        let resp = self
            .client
            .get(&self.url_random)
            .query(&[("query", query), ("client_id", self.cfg.access_key.as_str())])
            .send()
            .await
            // reqwest errors embed the URL, which carries the access key
            .map_err(|e| anyhow::anyhow!("request failed: {}", e.without_url()))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("Unsplash returned HTTP {status}");
        }

        let photo: RandomPhoto = resp
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("malformed body: {}", e.without_url()))?;

        match photo.urls.regular {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => bail!("response has no urls.regular"),
        }
    }
}

fn pick_query() -> &'static str {
    DEFAULT_QUERIES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DEFAULT_QUERIES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_comes_from_fixed_set() {
        for _ in 0..50 {
            assert!(DEFAULT_QUERIES.contains(&pick_query()));
        }
    }

    #[test]
    fn debug_hides_access_key() {
        let cfg = UnsplashConfig::new("secret-key").with_endpoint("http://localhost:1");
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("secret-key"));
        assert!(printed.contains("http://localhost:1"));
    }

    #[test]
    fn random_url_has_no_trailing_slash_issues() {
        let fetcher =
            ImageFetcher::new(UnsplashConfig::new("k").with_endpoint("https://api.unsplash.com/"))
                .unwrap();
        assert_eq!(fetcher.url_random, "https://api.unsplash.com/photos/random");
    }
}
