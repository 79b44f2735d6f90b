//! Country enumeration from the service's sitemap index.
//!
//! The index lists one `<sitemap><loc>` entry per country; the file stem of
//! each location (`.../sitemap/de.xml`) is the country code.

use camino::Utf8Path;
use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

const SITEMAP: &[u8] = b"sitemap";
const LOCATION: &[u8] = b"loc";

/// Errors raised while parsing a sitemap index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SitemapError {
    /// The document is not well-formed XML.
    #[error("malformed sitemap XML at byte {position}: {message}")]
    Xml {
        /// Byte offset reported by the parser.
        position: usize,
        /// Parser message.
        message: String,
    },
    /// A `<sitemap>` entry has no `<loc>` child.
    #[error("sitemap entry without a location")]
    MissingLocation,
    /// A location does not end in a file name.
    #[error("sitemap location {location:?} does not name a country file")]
    InvalidLocation {
        /// Offending location.
        location: String,
    },
}

/// Extract the country codes listed in a sitemap index, in document order.
///
/// Element names are matched without their namespace prefix.
///
/// # Errors
/// Returns [`SitemapError`] for malformed XML or unusable entries.
///
/// # Examples
/// ```
/// use campsite_data::parse_sitemap;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <sitemap><loc>https://opencampingmap.org/sitemaps/de.xml</loc></sitemap>
///   <sitemap><loc>https://opencampingmap.org/sitemaps/fr.xml</loc></sitemap>
/// </sitemapindex>"#;
/// assert_eq!(parse_sitemap(xml)?, ["de", "fr"]);
/// # Ok::<(), campsite_data::SitemapError>(())
/// ```
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>, SitemapError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut countries = Vec::new();
    let mut in_sitemap = false;
    let mut in_location = false;
    let mut location: Option<String> = None;
    loop {
        let event = reader.read_event().map_err(|err| SitemapError::Xml {
            position: reader.buffer_position(),
            message: err.to_string(),
        })?;
        match event {
            Event::Start(start) => match start.local_name().as_ref() {
                SITEMAP => {
                    in_sitemap = true;
                    location = None;
                }
                LOCATION if in_sitemap => in_location = true,
                _ => {}
            },
            Event::Text(text) if in_location => {
                let value = text.unescape().map_err(|err| SitemapError::Xml {
                    position: reader.buffer_position(),
                    message: err.to_string(),
                })?;
                location.get_or_insert_with(String::new).push_str(&value);
            }
            Event::CData(data) if in_location => {
                location
                    .get_or_insert_with(String::new)
                    .push_str(&String::from_utf8_lossy(&data));
            }
            Event::End(end) => match end.local_name().as_ref() {
                LOCATION => in_location = false,
                SITEMAP => {
                    in_sitemap = false;
                    let loc = location.take().ok_or(SitemapError::MissingLocation)?;
                    countries.push(country_code(&loc)?);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(countries)
}

fn country_code(location: &str) -> Result<String, SitemapError> {
    Utf8Path::new(location.trim())
        .file_stem()
        .filter(|stem| !stem.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| SitemapError::InvalidLocation {
            location: location.to_owned(),
        })
}
