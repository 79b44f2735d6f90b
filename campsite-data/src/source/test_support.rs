//! Test utilities for campsite sources.
//!
//! [`StubSource`] is a deterministic [`CampsiteSource`] returning canned
//! collections without making HTTP requests.

use std::cell::RefCell;
use std::collections::BTreeMap;

use campsite_core::{CampsiteRecord, FeatureCollection};

use super::{Area, CampsiteSource, SourceError};

/// Stub `CampsiteSource` for testing.
///
/// Areas without canned data yield an empty collection. Every fetched area is
/// recorded so tests can assert on the request sequence.
///
/// # Example
///
/// ```
/// use campsite_core::{CampsiteRecord, Tags};
/// use campsite_data::source::test_support::StubSource;
/// use campsite_data::{Area, CampsiteSource};
///
/// let record = CampsiteRecord::new("node/1", None, Tags::from([("category", "standard")]));
/// let source = StubSource::default()
///     .with_area(Area::Country("lu".to_owned()), vec![record])
///     .with_countries(["lu"]);
///
/// assert_eq!(source.countries()?, ["lu"]);
/// assert_eq!(source.fetch(&Area::Country("lu".to_owned()))?.features.len(), 1);
/// assert!(source.fetch(&Area::Country("be".to_owned()))?.features.is_empty());
/// # Ok::<(), campsite_data::SourceError>(())
/// ```
#[derive(Debug, Default)]
pub struct StubSource {
    collections: BTreeMap<String, FeatureCollection>,
    countries: Vec<String>,
    error: Option<SourceError>,
    requests: RefCell<Vec<Area>>,
}

impl StubSource {
    /// Serve `records` for `area`.
    #[must_use]
    pub fn with_area(mut self, area: Area, records: Vec<CampsiteRecord>) -> Self {
        self.collections
            .insert(area.to_string(), FeatureCollection { features: records });
        self
    }

    /// Publish the given country codes.
    #[must_use]
    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Fail every request with `error`.
    #[must_use]
    pub fn with_error(mut self, error: SourceError) -> Self {
        self.error = Some(error);
        self
    }

    /// Areas fetched so far, in request order.
    #[must_use]
    pub fn requests(&self) -> Vec<Area> {
        self.requests.borrow().clone()
    }
}

impl CampsiteSource for StubSource {
    fn fetch(&self, area: &Area) -> Result<FeatureCollection, SourceError> {
        self.requests.borrow_mut().push(area.clone());
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self
            .collections
            .get(&area.to_string())
            .cloned()
            .unwrap_or_default())
    }

    fn countries(&self) -> Result<Vec<String>, SourceError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self.countries.clone())
    }
}
