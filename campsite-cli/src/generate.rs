//! Generate command implementation for the campsite CLI.

use camino::{Utf8Path, Utf8PathBuf};
use campsite_core::Locale;
use campsite_data::{
    Area, BoundingBox, CampsiteSource, DEFAULT_CAMPSITES_URL, DEFAULT_SITEMAP_URL,
    DirectorySinks, ExportReport, HttpCampsiteSource, HttpSourceConfig, export_all_countries,
    export_area,
};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io;

use crate::{
    ARG_BBOX, ARG_CAMPSITES_URL, ARG_COUNTRY, ARG_LANG, ARG_OUTPUT_DIR, ARG_SITEMAP_URL,
    CliError,
};

/// Output directory used when none is configured.
pub(crate) const DEFAULT_OUTPUT_DIR: &str = "gpx";

/// Country value selecting every country listed in the sitemap.
const ALL_COUNTRIES: &str = "all";

/// CLI arguments for the `generate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Download campsites for one country, a bounding box, or \
                 every country the service lists, and write them as GPX \
                 waypoints grouped by category and access level. Options \
                 can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Export campsites as GPX files"
)]
#[ortho_config(prefix = "CAMPSITE_POI")]
pub(crate) struct GenerateArgs {
    /// Country code to export, or "all" for every listed country.
    #[arg(long = ARG_COUNTRY, value_name = "code", conflicts_with = "bbox")]
    #[serde(default)]
    pub(crate) country: Option<String>,
    /// Bounding box to export as `west,south,east,north`.
    #[arg(long = ARG_BBOX, value_name = "bounds", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) bbox: Option<String>,
    /// Existing directory receiving the GPX files (default: `gpx`).
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Language of the waypoint descriptions.
    #[arg(long = ARG_LANG, value_name = "lang", value_parser = ["en", "de"])]
    #[serde(default)]
    pub(crate) lang: Option<String>,
    /// Campsite endpoint of the service.
    #[arg(long = ARG_CAMPSITES_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) campsites_url: Option<String>,
    /// Sitemap index listing the available countries.
    #[arg(long = ARG_SITEMAP_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) sitemap_url: Option<String>,
}

impl GenerateArgs {
    pub(crate) fn into_config(self) -> Result<GenerateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GenerateConfig::try_from(merged)
    }
}

/// Which campsites a run exports.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Selection {
    /// A single area.
    Area(Area),
    /// Every country listed in the sitemap.
    AllCountries,
}

/// Resolved `generate` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GenerateConfig {
    pub(crate) selection: Selection,
    pub(crate) output_dir: Utf8PathBuf,
    pub(crate) locale: Locale,
    pub(crate) campsites_url: String,
    pub(crate) sitemap_url: String,
}

impl GenerateConfig {
    /// Check that the output directory exists and is a directory.
    pub(crate) fn validate_output_dir(&self) -> Result<(), CliError> {
        require_directory(&self.output_dir)
    }

    pub(crate) fn source_config(&self) -> HttpSourceConfig {
        HttpSourceConfig::new(self.campsites_url.clone(), self.sitemap_url.clone())
    }
}

impl TryFrom<GenerateArgs> for GenerateConfig {
    type Error = CliError;

    fn try_from(args: GenerateArgs) -> Result<Self, Self::Error> {
        let selection = match (args.country, args.bbox) {
            (Some(_), Some(_)) => return Err(CliError::ConflictingArea),
            (None, Some(bbox)) => Selection::Area(Area::BoundingBox(parse_bbox(bbox)?)),
            (Some(country), None) if !country.trim().eq_ignore_ascii_case(ALL_COUNTRIES) => {
                Selection::Area(Area::Country(country.trim().to_ascii_lowercase()))
            }
            (Some(_) | None, None) => Selection::AllCountries,
        };
        let locale = args
            .lang
            .as_deref()
            .map(str::parse::<Locale>)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            selection,
            output_dir: args
                .output_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_DIR)),
            locale,
            campsites_url: args
                .campsites_url
                .unwrap_or_else(|| DEFAULT_CAMPSITES_URL.to_owned()),
            sitemap_url: args
                .sitemap_url
                .unwrap_or_else(|| DEFAULT_SITEMAP_URL.to_owned()),
        })
    }
}

fn parse_bbox(value: String) -> Result<BoundingBox, CliError> {
    value
        .parse()
        .map_err(|source| CliError::InvalidBoundingBox { value, source })
}

fn require_directory(path: &Utf8Path) -> Result<(), CliError> {
    match campsite_fs::dir_is_dir(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::OutputDirectoryNotDirectory {
            path: path.to_path_buf(),
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(CliError::OutputDirectoryMissing {
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::OpenOutputDirectory {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn run_generate(args: GenerateArgs) -> Result<Vec<ExportReport>, CliError> {
    let config = args.into_config()?;
    config.validate_output_dir()?;
    let source = HttpCampsiteSource::with_config(config.source_config())?;
    export(&config, &source)
}

/// Export the configured selection from `source` into the output directory.
pub(crate) fn export<S>(config: &GenerateConfig, source: &S) -> Result<Vec<ExportReport>, CliError>
where
    S: CampsiteSource + ?Sized,
{
    let sinks =
        DirectorySinks::new(&config.output_dir).map_err(|source| CliError::OpenOutputDirectory {
            path: config.output_dir.clone(),
            source,
        })?;
    let reports = match &config.selection {
        Selection::Area(area) => vec![export_area(source, area, config.locale, sinks)?],
        Selection::AllCountries => export_all_countries(source, config.locale, &sinks)?,
    };
    let files: usize = reports.iter().map(|report| report.summary.files.len()).sum();
    info!("wrote {files} GPX files to {}", config.output_dir);
    Ok(reports)
}
