//! HTTP-backed `CampsiteSource` for the OpenCampingMap service.
//!
//! The [`CampsiteSource`] trait is synchronous so the export pipeline stays
//! free of async plumbing. [`HttpCampsiteSource`] bridges to `reqwest` by
//! blocking on a Tokio runtime it owns.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use campsite_data::{Area, CampsiteSource, HttpCampsiteSource, HttpSourceConfig};
//!
//! let config = HttpSourceConfig::default().with_timeout(Duration::from_secs(120));
//! let source = HttpCampsiteSource::with_config(config)?;
//! let campsites = source.fetch(&Area::Country("lu".to_owned()))?;
//! println!("{} campsites", campsites.features.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use campsite_core::FeatureCollection;
use log::debug;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::{Area, CampsiteSource, SourceError, parse_sitemap};

/// Default user agent for service requests.
pub const DEFAULT_USER_AGENT: &str = concat!("campsite-poi/", env!("CARGO_PKG_VERSION"));

/// Default campsite endpoint.
pub const DEFAULT_CAMPSITES_URL: &str = "https://opencampingmap.org/getcampsites";

/// Default sitemap index listing the available countries.
pub const DEFAULT_SITEMAP_URL: &str = "https://opencampingmap.org/sitemap.xml";

/// Whole-country responses are large; allow the service time to assemble them.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Error type for [`HttpCampsiteSource`] construction failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`HttpCampsiteSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceConfig {
    /// Campsite endpoint queried with `?country=` or `?bbox=`.
    pub campsites_url: String,
    /// Sitemap index listing the available countries.
    pub sitemap_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            campsites_url: DEFAULT_CAMPSITES_URL.to_owned(),
            sitemap_url: DEFAULT_SITEMAP_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpSourceConfig {
    /// Create a configuration for the given endpoints.
    #[must_use]
    pub fn new(campsites_url: impl Into<String>, sitemap_url: impl Into<String>) -> Self {
        Self {
            campsites_url: campsites_url.into(),
            sitemap_url: sitemap_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Campsite source backed by the OpenCampingMap HTTP API.
///
/// The source owns a current-thread Tokio runtime that is reused across
/// calls. When called from inside a multi-threaded runtime it borrows that
/// runtime through [`tokio::task::block_in_place`] instead.
pub struct HttpCampsiteSource {
    client: Client,
    config: HttpSourceConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpCampsiteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCampsiteSource")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpCampsiteSource {
    /// Create a source for the default OpenCampingMap endpoints.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(HttpSourceConfig::default())
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpSourceConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TransportError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpSourceConfig {
        &self.config
    }

    /// Build the campsite query URL for an area.
    fn campsites_url(&self, area: &Area) -> String {
        let (key, value) = match area {
            Area::Country(code) => ("country", code.clone()),
            Area::BoundingBox(bbox) => ("bbox", bbox.to_string()),
        };
        format!("{}?{key}={value}", self.config.campsites_url)
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, SourceError> {
        debug!("GET {url}");
        self.client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))
    }

    /// Convert a reqwest error to a `SourceError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> SourceError {
        if error.is_timeout() {
            return SourceError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return SourceError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        SourceError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl CampsiteSource for HttpCampsiteSource {
    fn fetch(&self, area: &Area) -> Result<FeatureCollection, SourceError> {
        let url = self.campsites_url(area);
        let body = self.block_on(self.get_text(&url))?;
        serde_json::from_str(&body).map_err(|err| SourceError::Decode {
            url,
            message: err.to_string(),
        })
    }

    fn countries(&self) -> Result<Vec<String>, SourceError> {
        let url = self.config.sitemap_url.clone();
        let body = self.block_on(self.get_text(&url))?;
        parse_sitemap(&body).map_err(|source| SourceError::Sitemap { url, source })
    }
}

#[cfg(test)]
mod tests;
