//! Output languages supported by the description generator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Language of generated descriptions.
///
/// The locale only affects description text; routing and coordinates are
/// locale independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// German.
    De,
}

impl Locale {
    /// Every supported locale.
    pub const ALL: [Self; 2] = [Self::En, Self::De];

    /// Two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unsupported locale code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported locale {0:?} (expected one of: en, de)")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownLocale(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en", Locale::En)]
    #[case("DE", Locale::De)]
    #[case(" de ", Locale::De)]
    fn parses_codes(#[case] input: &str, #[case] expected: Locale) {
        assert_eq!(input.parse::<Locale>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_codes() {
        let err = "fr".parse::<Locale>().expect_err("fr is not supported");
        assert_eq!(err, UnknownLocale("fr".to_owned()));
    }

    #[rstest]
    fn displays_code() {
        assert_eq!(Locale::De.to_string(), "de");
        assert_eq!(Locale::default(), Locale::En);
    }
}
