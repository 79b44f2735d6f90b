//! Command-line interface for the campsite POI exporter.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod generate;

pub use error::CliError;

use generate::{GenerateArgs, run_generate};

const ARG_COUNTRY: &str = "country";
const ARG_BBOX: &str = "bbox";
const ARG_OUTPUT_DIR: &str = "output-dir";
const ARG_LANG: &str = "lang";
const ARG_CAMPSITES_URL: &str = "campsites-url";
const ARG_SITEMAP_URL: &str = "sitemap-url";

/// Run the campsite CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// output directory is unusable, or the export fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Generate(args) => run_generate(args).map(|_| ()),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "campsite-poi",
    about = "Export OpenCampingMap campsites as per-category GPX files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch campsites and write one GPX file per category and access level.
    Generate(GenerateArgs),
}

#[cfg(test)]
mod tests;
