//! Facade crate for the campsite POI exporter.
//!
//! This crate re-exports the core description and routing types and exposes
//! the HTTP source and export pipeline behind the `data` feature.

#![forbid(unsafe_code)]

pub use campsite_core::{
    BucketKey, CampsiteRecord, Category, CategoryRouter, ClassifyError, FeatureCollection,
    GpxError, GpxWriter, Locale, PostalAddress, Position, RouteSummary, Routed, RouterError,
    SinkProvider, Tags, Visibility, contact_block, describe, facilities, sports,
};

#[cfg(feature = "data")]
pub use campsite_data::{
    Area, BoundingBox, CampsiteSource, DirectorySinks, ExportError, ExportReport,
    HttpCampsiteSource, HttpSourceConfig, SourceError, export_all_countries, export_area,
};

#[cfg(feature = "test-support")]
pub use campsite_core::test_support;
