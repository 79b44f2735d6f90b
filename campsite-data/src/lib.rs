//! Data access and export plumbing for the campsite POI exporter.
//!
//! Responsibilities:
//! - Define the campsite source trait and its HTTP adapter.
//! - Enumerate countries from the service sitemap.
//! - Provide directory-backed bucket sinks and the per-area export pipeline.
//!
//! Boundaries:
//! - Do not encode description or routing rules (live in `campsite-core`).
//! - Keep async confined to the HTTP adapter; the public API is synchronous.
//!
//! Invariants:
//! - Output files are only opened inside an already existing directory.
//! - No global mutable state.
#![forbid(unsafe_code)]

mod export;
mod sinks;
pub mod source;

pub use export::{ExportError, ExportReport, export_all_countries, export_area};
pub use sinks::DirectorySinks;
pub use source::{
    Area, BoundingBox, BoundingBoxError, CampsiteSource, DEFAULT_CAMPSITES_URL,
    DEFAULT_SITEMAP_URL, DEFAULT_USER_AGENT, HttpCampsiteSource, HttpSourceConfig, SitemapError,
    SourceError, TransportError, parse_sitemap,
};
