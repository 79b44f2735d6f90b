//! Error types emitted by the campsite CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use campsite_core::UnknownLocale;
use campsite_data::{BoundingBoxError, ExportError, TransportError};
use thiserror::Error;

/// Errors emitted by the campsite CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// Both a country and a bounding box were selected.
    #[error("--country and --bbox cannot be combined")]
    ConflictingArea,
    /// The bounding box could not be parsed.
    #[error("invalid --bbox value {value:?}: {source}")]
    InvalidBoundingBox {
        value: String,
        #[source]
        source: BoundingBoxError,
    },
    /// The language is not supported.
    #[error(transparent)]
    UnsupportedLanguage(#[from] UnknownLocale),
    /// The output directory does not exist.
    #[error("output directory {path:?} does not exist")]
    OutputDirectoryMissing { path: Utf8PathBuf },
    /// The output directory exists but is not a directory.
    #[error("output directory {path:?} is not a directory")]
    OutputDirectoryNotDirectory { path: Utf8PathBuf },
    /// The output directory could not be inspected or opened.
    #[error("failed to open output directory {path:?}: {source}")]
    OpenOutputDirectory {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Constructing the HTTP campsite source failed.
    #[error("failed to set up the campsite service client: {0}")]
    BuildSource(#[from] TransportError),
    /// Fetching or writing campsites failed.
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}
