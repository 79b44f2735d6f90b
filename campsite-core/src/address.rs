//! Postal address blocks assembled from `addr:*` tags.
//!
//! An address is only rendered when the record carries more than two `addr:*`
//! tags; sparser data rarely yields a useful block. Line order follows the
//! postal convention of the address's country.

use log::warn;

use crate::{Tags, country_name};

const ADDRESS_PREFIX: &str = "addr:";
/// An address block needs strictly more `addr:*` tags than this.
const ADDRESS_KEY_THRESHOLD: usize = 2;

/// Structured postal address of a campsite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalAddress {
    /// House number (`addr:housenumber`).
    pub house_number: Option<String>,
    /// Street (`addr:street`), falling back to `addr:place`.
    pub road: Option<String>,
    /// City (`addr:city`).
    pub city: Option<String>,
    /// Postcode (`addr:postcode`).
    pub postcode: Option<String>,
    /// Upper-cased country name resolved from `addr:country`.
    pub country: Option<String>,
    /// Upper-cased ISO code from `addr:country`; selects the line layout.
    pub country_code: Option<String>,
}

impl PostalAddress {
    /// Build an address from campsite tags.
    ///
    /// Returns `None` unless more than two `addr:*` tags are present. A country
    /// code missing from the name table is logged and the country line is
    /// omitted.
    ///
    /// # Examples
    /// ```
    /// use campsite_core::{PostalAddress, Tags};
    ///
    /// let tags = Tags::from([
    ///     ("addr:street", "Seeweg"),
    ///     ("addr:housenumber", "4"),
    ///     ("addr:city", "Plön"),
    ///     ("addr:country", "de"),
    /// ]);
    /// let address = PostalAddress::from_tags(&tags).ok_or("expected an address")?;
    /// assert_eq!(address.format(), "Seeweg 4\nPlön\nGERMANY");
    ///
    /// let sparse = Tags::from([("addr:street", "Seeweg"), ("addr:city", "Plön")]);
    /// assert!(PostalAddress::from_tags(&sparse).is_none());
    /// # Ok::<(), &str>(())
    /// ```
    #[must_use]
    pub fn from_tags(tags: &Tags) -> Option<Self> {
        let address_keys = tags
            .keys()
            .filter(|key| key.starts_with(ADDRESS_PREFIX))
            .count();
        if address_keys <= ADDRESS_KEY_THRESHOLD {
            return None;
        }

        let text = |key: &str| tags.text(key).map(str::to_owned);
        let country_code = tags
            .text("addr:country")
            .map(|code| code.trim().to_ascii_uppercase());
        let country = country_code
            .as_deref()
            .and_then(|code| match country_name(code) {
                Ok(name) => Some(name.to_uppercase()),
                Err(err) => {
                    warn!("{err}; omitting the country from the address");
                    None
                }
            });

        Some(Self {
            house_number: text("addr:housenumber"),
            road: text("addr:street").or_else(|| text("addr:place")),
            city: text("addr:city"),
            postcode: text("addr:postcode"),
            country,
            country_code,
        })
    }

    /// Render the address as newline-separated lines without blank lines.
    #[must_use]
    pub fn format(&self) -> String {
        let layout = Layout::for_country(self.country_code.as_deref());
        let road = self.road.as_deref();
        let number = self.house_number.as_deref();
        let city = self.city.as_deref();
        let postcode = self.postcode.as_deref();

        let street = match layout {
            Layout::RoadFirst => words([road, number]),
            Layout::NumberFirst | Layout::PostcodeLast => words([number, road]),
        };
        let locality = match layout {
            Layout::RoadFirst | Layout::NumberFirst => words([postcode, city]),
            Layout::PostcodeLast => words([city, postcode]),
        };
        let country = words([self.country.as_deref()]);

        [street, locality, country]
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Line layout of a postal address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// `road number` / `postcode city`.
    RoadFirst,
    /// `number road` / `postcode city`.
    NumberFirst,
    /// `number road` / `city postcode`.
    PostcodeLast,
}

impl Layout {
    fn for_country(code: Option<&str>) -> Self {
        match code {
            Some("FR" | "LU" | "MC" | "IL" | "MY" | "SG" | "PH") => Self::NumberFirst,
            Some("GB" | "IE" | "US" | "CA" | "AU" | "NZ" | "ZA" | "IN") => Self::PostcodeLast,
            _ => Self::RoadFirst,
        }
    }
}

fn words<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
