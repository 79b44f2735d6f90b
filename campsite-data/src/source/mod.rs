//! Campsite sources.
//!
//! A [`CampsiteSource`] yields the campsites of one [`Area`] and lists the
//! countries the service knows about. [`HttpCampsiteSource`] talks to the
//! OpenCampingMap service; [`test_support::StubSource`] serves canned data.

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use campsite_core::FeatureCollection;
use thiserror::Error;

mod http;
mod sitemap;

#[doc(hidden)]
pub mod test_support;

pub use http::{
    DEFAULT_CAMPSITES_URL, DEFAULT_SITEMAP_URL, DEFAULT_USER_AGENT, HttpCampsiteSource,
    HttpSourceConfig, TransportError,
};
pub use sitemap::{SitemapError, parse_sitemap};

/// Region whose campsites are requested.
#[derive(Debug, Clone, PartialEq)]
pub enum Area {
    /// All campsites of a country, by ISO code as listed in the sitemap.
    Country(String),
    /// All campsites inside a bounding box.
    BoundingBox(BoundingBox),
}

impl Area {
    /// Prefix for bucket file names: the country code for country runs and
    /// nothing for bounding-box runs.
    #[must_use]
    pub fn file_prefix(&self) -> Option<&str> {
        match self {
            Self::Country(code) => Some(code),
            Self::BoundingBox(_) => None,
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Country(code) => write!(f, "country {code}"),
            Self::BoundingBox(bbox) => write!(f, "bounding box {bbox}"),
        }
    }
}

/// Four ordered bounds passed verbatim to the campsite service.
///
/// The service expects `west,south,east,north` in decimal degrees; values are
/// only checked for being finite numbers.
///
/// # Examples
/// ```
/// use campsite_data::BoundingBox;
///
/// let bbox: BoundingBox = "9.5, 47.25,10,48".parse()?;
/// assert_eq!(bbox.to_string(), "9.5,47.25,10,48");
/// # Ok::<(), campsite_data::BoundingBoxError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    bounds: [f64; 4],
}

impl BoundingBox {
    /// Create a bounding box from four finite bounds.
    ///
    /// # Errors
    /// Returns [`BoundingBoxError::NotFinite`] for NaN or infinite bounds.
    pub fn new(bounds: [f64; 4]) -> Result<Self, BoundingBoxError> {
        if let Some(value) = bounds.iter().find(|value| !value.is_finite()) {
            return Err(BoundingBoxError::NotFinite {
                value: value.to_string(),
            });
        }
        Ok(Self { bounds })
    }

    /// Bounds in the order they were given.
    #[must_use]
    pub const fn bounds(&self) -> [f64; 4] {
        self.bounds
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.bounds;
        write!(f, "{a},{b},{c},{d}")
    }
}

impl FromStr for BoundingBox {
    type Err = BoundingBoxError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        let [a, b, c, d] = parts.as_slice() else {
            return Err(BoundingBoxError::WrongCount { count: parts.len() });
        };
        Self::new([parse_bound(a)?, parse_bound(b)?, parse_bound(c)?, parse_bound(d)?])
    }
}

fn parse_bound(value: &str) -> Result<f64, BoundingBoxError> {
    value
        .parse()
        .map_err(|source| BoundingBoxError::InvalidNumber {
            value: value.to_owned(),
            source,
        })
}

/// Errors raised while parsing a bounding box.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundingBoxError {
    /// The text did not contain exactly four comma-separated values.
    #[error("expected four comma-separated bounds, found {count}")]
    WrongCount {
        /// Number of values found.
        count: usize,
    },
    /// A value is not a number.
    #[error("invalid bound {value:?}: {source}")]
    InvalidNumber {
        /// Offending text.
        value: String,
        /// Parser error.
        #[source]
        source: ParseFloatError,
    },
    /// A value is NaN or infinite.
    #[error("bound {value} is not finite")]
    NotFinite {
        /// Offending value.
        value: String,
    },
}

/// Errors raised by a [`CampsiteSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with an error status.
    #[error("request to {url} failed with HTTP status {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request failed before a response arrived.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Error description.
        message: String,
    },
    /// The campsite response is not a GeoJSON feature collection.
    #[error("failed to decode campsites from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder message.
        message: String,
    },
    /// The sitemap could not be parsed.
    #[error("failed to read sitemap {url}: {source}")]
    Sitemap {
        /// Requested URL.
        url: String,
        /// Parser error.
        #[source]
        source: SitemapError,
    },
}

/// Supplier of campsite records.
pub trait CampsiteSource {
    /// Fetch every campsite within `area`.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the data cannot be retrieved or decoded.
    fn fetch(&self, area: &Area) -> Result<FeatureCollection, SourceError>;

    /// List the country codes the service publishes data for.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the country list cannot be retrieved.
    fn countries(&self) -> Result<Vec<String>, SourceError>;
}
