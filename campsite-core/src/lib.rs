//! Core domain logic for the campsite POI exporter.
//!
//! Responsibilities:
//! - Model campsite records as delivered by the campsite service.
//! - Turn a record's free-form tags into a localised description.
//! - Route records into per-category GPX buckets and manage their lifecycle.
//!
//! Boundaries:
//! - No network access; records arrive from the `campsite-data` adapters.
//! - Output streams are obtained through [`SinkProvider`], so this crate never
//!   touches the filesystem directly.
#![forbid(unsafe_code)]

pub mod address;
pub mod category;
pub mod countries;
pub mod description;
pub mod features;
pub mod gpx;
pub mod locale;
pub mod record;
pub mod router;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use address::PostalAddress;
pub use category::{BucketKey, Category, ClassifyError, PRIVATE_ACCESS_VALUES, Visibility};
pub use countries::{UnknownCountryCode, country_name};
pub use description::{contact_block, describe, facilities, sports};
pub use features::{FeatureRule, ValuePattern, feature_rules, sport_name};
pub use gpx::{GpxError, GpxWriter, Waypoint};
pub use locale::{Locale, UnknownLocale};
pub use record::{CampsiteRecord, FeatureCollection, Geometry, Position, TagValue, Tags};
pub use router::{CategoryRouter, RouteSummary, Routed, RouterError, SinkProvider};
