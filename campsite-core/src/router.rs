//! Category routing of campsite records into GPX buckets.
//!
//! The router owns one [`GpxWriter`] per materialised bucket. Buckets are
//! opened on the first record routed to them and closed exactly once by
//! [`CategoryRouter::finish`]. Records without geometry or without a known
//! category are reported and skipped; they never open a bucket.

use std::collections::BTreeMap;
use std::io::{self, Write};

use log::{debug, warn};
use thiserror::Error;

use crate::{
    BucketKey, CampsiteRecord, ClassifyError, GpxError, GpxWriter, Locale, Waypoint, describe,
};

const NAME_KEY: &str = "name";

/// Opens the output stream backing a bucket.
pub trait SinkProvider {
    /// Stream type produced for each bucket.
    type Sink: Write;

    /// Open a fresh stream for the named bucket file.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the stream cannot be created.
    fn open(&mut self, file_name: &str) -> io::Result<Self::Sink>;
}

/// Errors raised while routing records.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A bucket's output stream could not be opened.
    #[error("failed to open bucket file {file_name}: {source}")]
    Open {
        /// File name of the bucket.
        file_name: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Writing to a bucket failed.
    #[error("failed to write bucket file {file_name}: {source}")]
    Write {
        /// File name of the bucket.
        file_name: String,
        /// Underlying GPX error.
        #[source]
        source: GpxError,
    },
}

/// Outcome of routing a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    /// The record was written to the bucket.
    Written(BucketKey),
    /// The record has no usable geometry and was skipped.
    MissingGeometry,
    /// The record could not be classified and was skipped.
    Unclassified(ClassifyError),
}

/// Totals reported once all buckets are closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSummary {
    /// Waypoints written across all buckets.
    pub written: usize,
    /// Records skipped for lack of geometry.
    pub missing_geometry: usize,
    /// Records skipped for a missing or unknown category.
    pub unclassified: usize,
    /// Bucket files that were written, in bucket order.
    pub files: Vec<String>,
}

struct Bucket<S: Write> {
    file_name: String,
    writer: GpxWriter<S>,
}

/// Routes records into per-category GPX buckets.
///
/// # Examples
/// ```
/// use std::io;
///
/// use campsite_core::{CampsiteRecord, CategoryRouter, Locale, Position, SinkProvider, Tags};
///
/// struct Discard;
///
/// impl SinkProvider for Discard {
///     type Sink = io::Sink;
///
///     fn open(&mut self, _file_name: &str) -> io::Result<io::Sink> {
///         Ok(io::sink())
///     }
/// }
///
/// let mut router = CategoryRouter::new(Discard, Locale::En).with_prefix(Some("de"));
/// let record = CampsiteRecord::new(
///     "node/1",
///     Position::from_degrees(10.0, 50.0),
///     Tags::from([("category", "standard"), ("name", "Lakeside")]),
/// );
/// router.route(&record)?;
/// let summary = router.finish()?;
/// assert_eq!(summary.files, ["de_standard.gpx"]);
/// assert_eq!(summary.written, 1);
/// # Ok::<(), campsite_core::RouterError>(())
/// ```
pub struct CategoryRouter<P: SinkProvider> {
    sinks: P,
    locale: Locale,
    prefix: Option<String>,
    buckets: BTreeMap<BucketKey, Bucket<P::Sink>>,
    summary: RouteSummary,
}

impl<P: SinkProvider> CategoryRouter<P> {
    /// Create a router writing bucket files through `sinks`.
    #[must_use]
    pub fn new(sinks: P, locale: Locale) -> Self {
        Self {
            sinks,
            locale,
            prefix: None,
            buckets: BTreeMap::new(),
            summary: RouteSummary::default(),
        }
    }

    /// Prefix bucket file names, typically with a country code.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Option<&str>) -> Self {
        self.prefix = prefix.map(str::to_owned);
        self
    }

    /// Route one record.
    ///
    /// # Errors
    /// Returns [`RouterError`] when a bucket cannot be opened or written.
    /// Skipped records are reported through [`Routed`] instead.
    pub fn route(&mut self, record: &CampsiteRecord) -> Result<Routed, RouterError> {
        let key = match BucketKey::classify(record) {
            Ok(key) => key,
            Err(err) => {
                warn!("ignoring campsite {}: {err}", record.id);
                self.summary.unclassified += 1;
                return Ok(Routed::Unclassified(err));
            }
        };
        let Some(position) = record.position() else {
            warn!("ignoring campsite {} without geometry", record.id);
            self.summary.missing_geometry += 1;
            return Ok(Routed::MissingGeometry);
        };

        let description = describe(&record.properties, self.locale);
        let bucket = self.bucket(key)?;
        bucket
            .writer
            .write_waypoint(&Waypoint {
                position: &position,
                name: record.properties.text(NAME_KEY),
                description: &description,
            })
            .map_err(|source| RouterError::Write {
                file_name: bucket.file_name.clone(),
                source,
            })?;
        self.summary.written += 1;
        Ok(Routed::Written(key))
    }

    /// Close every materialised bucket and report totals.
    ///
    /// # Errors
    /// Returns [`RouterError::Write`] for the first bucket that cannot be
    /// closed. The remaining buckets are still closed on drop.
    pub fn finish(mut self) -> Result<RouteSummary, RouterError> {
        for (_, bucket) in std::mem::take(&mut self.buckets) {
            let Bucket { file_name, writer } = bucket;
            writer.finish().map_err(|source| RouterError::Write {
                file_name: file_name.clone(),
                source,
            })?;
            self.summary.files.push(file_name);
        }
        Ok(self.summary)
    }

    fn bucket(&mut self, key: BucketKey) -> Result<&mut Bucket<P::Sink>, RouterError> {
        use std::collections::btree_map::Entry;

        match self.buckets.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let file_name = key.file_name(self.prefix.as_deref());
                debug!("opening bucket file {file_name}");
                let sink = self
                    .sinks
                    .open(&file_name)
                    .map_err(|source| RouterError::Open {
                        file_name: file_name.clone(),
                        source,
                    })?;
                let writer = GpxWriter::start(sink).map_err(|source| RouterError::Write {
                    file_name: file_name.clone(),
                    source,
                })?;
                Ok(entry.insert(Bucket { file_name, writer }))
            }
        }
    }
}

#[cfg(test)]
mod tests;
