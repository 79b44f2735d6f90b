//! Export pipeline: fetch an area, route its campsites, close the buckets.

use campsite_core::{CategoryRouter, Locale, RouteSummary, RouterError, SinkProvider};
use log::info;
use thiserror::Error;

use crate::{Area, CampsiteSource, SourceError};

/// Outcome of exporting one area.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// Exported area.
    pub area: Area,
    /// Routing totals and written bucket files.
    pub summary: RouteSummary,
}

/// Errors raised while exporting campsites.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The campsite source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Writing a bucket file failed.
    #[error(transparent)]
    Route(#[from] RouterError),
}

/// Export every campsite of `area` into bucket files opened through `sinks`.
///
/// Country runs prefix file names with the country code; bounding-box runs
/// do not.
///
/// # Errors
/// Returns [`ExportError`] when the source fails or a bucket cannot be
/// written. Skipped records are counted in the report instead.
pub fn export_area<S, P>(
    source: &S,
    area: &Area,
    locale: Locale,
    sinks: P,
) -> Result<ExportReport, ExportError>
where
    S: CampsiteSource + ?Sized,
    P: SinkProvider,
{
    let collection = source.fetch(area)?;
    let mut router = CategoryRouter::new(sinks, locale).with_prefix(area.file_prefix());
    for record in &collection.features {
        router.route(record)?;
    }
    let summary = router.finish()?;
    info!(
        "{area}: wrote {} campsites to {} files, skipped {} without geometry and {} unclassified",
        summary.written,
        summary.files.len(),
        summary.missing_geometry,
        summary.unclassified
    );
    Ok(ExportReport {
        area: area.clone(),
        summary,
    })
}

/// Export every country the source lists, one area at a time.
///
/// # Errors
/// Returns [`ExportError`] for the first failing country list or area.
pub fn export_all_countries<S, P>(
    source: &S,
    locale: Locale,
    sinks: &P,
) -> Result<Vec<ExportReport>, ExportError>
where
    S: CampsiteSource + ?Sized,
    P: SinkProvider + Clone,
{
    let countries = source.countries()?;
    info!("exporting {} countries", countries.len());
    countries
        .into_iter()
        .map(|code| export_area(source, &Area::Country(code), locale, sinks.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::test_support::StubSource;
    use campsite_core::test_support::MemorySinks;
    use campsite_core::{CampsiteRecord, Position, Tags};
    use rstest::{fixture, rstest};

    fn campsite(id: &str, category: &str, lon: f64, lat: f64) -> CampsiteRecord {
        CampsiteRecord::new(
            id,
            Position::from_degrees(lon, lat),
            Tags::from([("category", category)]),
        )
    }

    #[fixture]
    fn sinks() -> MemorySinks {
        MemorySinks::default()
    }

    #[rstest]
    fn country_runs_prefix_their_files(sinks: MemorySinks) {
        let area = Area::Country("lu".to_owned());
        let source = StubSource::default().with_area(
            area.clone(),
            vec![
                campsite("node/1", "standard", 6.1, 49.6),
                campsite("node/2", "caravan", 6.2, 49.7),
            ],
        );

        let report = export_area(&source, &area, Locale::En, sinks.clone()).expect("export");

        assert_eq!(report.summary.written, 2);
        assert_eq!(report.summary.files, ["lu_standard.gpx", "lu_caravan.gpx"]);
        assert_eq!(sinks.file_names(), ["lu_caravan.gpx", "lu_standard.gpx"]);
    }

    #[rstest]
    fn empty_areas_write_no_files(sinks: MemorySinks) {
        let source = StubSource::default();
        let report = export_area(&source, &Area::Country("va".to_owned()), Locale::De, sinks.clone())
            .expect("export");
        assert_eq!(report.summary, RouteSummary::default());
        assert!(sinks.file_names().is_empty());
    }

    #[rstest]
    fn all_countries_are_exported_in_listing_order(sinks: MemorySinks) {
        let source = StubSource::default()
            .with_countries(["be", "nl"])
            .with_area(
                Area::Country("nl".to_owned()),
                vec![campsite("node/3", "nudist", 5.0, 52.0)],
            );

        let reports = export_all_countries(&source, Locale::En, &sinks).expect("export");

        let areas: Vec<Area> = reports.into_iter().map(|report| report.area).collect();
        assert_eq!(
            areas,
            [Area::Country("be".to_owned()), Area::Country("nl".to_owned())]
        );
        assert_eq!(source.requests(), areas);
        assert_eq!(sinks.file_names(), ["nl_nudist.gpx"]);
    }

    #[rstest]
    fn source_failures_abort_the_export(sinks: MemorySinks) {
        let source = StubSource::default().with_error(SourceError::Network {
            url: "https://opencampingmap.org/getcampsites?country=lu".to_owned(),
            message: "connection refused".to_owned(),
        });
        let err = export_area(&source, &Area::Country("lu".to_owned()), Locale::En, sinks.clone())
            .expect_err("source fails");
        assert!(matches!(err, ExportError::Source(SourceError::Network { .. })));
        assert!(sinks.file_names().is_empty());
    }
}
