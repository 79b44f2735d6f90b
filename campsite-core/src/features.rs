//! Localised facility and sport tables.
//!
//! Feature keys are listed in display order. Within a key, value patterns are
//! tried top to bottom and the first match supplies the text.

use crate::Locale;
use ValuePattern::{NotPrefixed, Prefix};

/// How a tag value is matched against a feature rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePattern {
    /// The value equals the literal.
    Prefix(&'static str),
    /// The value is non-empty and does not start with the prefix.
    NotPrefixed(&'static str),
}

impl ValuePattern {
    /// Test a raw tag value against the pattern.
    ///
    /// # Examples
    /// ```
    /// use campsite_core::ValuePattern;
    ///
    /// assert!(ValuePattern::Prefix("yes").matches("yes;fee"));
    /// assert!(!ValuePattern::Prefix("yes").matches("fee;yes"));
    /// assert!(ValuePattern::NotPrefixed("no").matches("16A"));
    /// assert!(!ValuePattern::NotPrefixed("no").matches("none"));
    /// ```
    #[must_use]
    pub fn matches(self, value: &str) -> bool {
        match self {
            Prefix(literal) => value.starts_with(literal),
            NotPrefixed(prefix) => !value.is_empty() && !value.starts_with(prefix),
        }
    }
}

/// Text fragments for one feature key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRule {
    /// Tag key the rule applies to.
    pub key: &'static str,
    /// Ordered value patterns with their text.
    pub values: &'static [(ValuePattern, &'static str)],
}

impl FeatureRule {
    /// Text of the first pattern matching `value`.
    #[must_use]
    pub fn resolve(&self, value: &str) -> Option<&'static str> {
        self.values
            .iter()
            .find(|(pattern, _)| pattern.matches(value))
            .map(|&(_, text)| text)
    }
}

/// Feature rules for `locale`, in display order.
#[must_use]
pub fn feature_rules(locale: Locale) -> &'static [FeatureRule] {
    match locale {
        Locale::En => FEATURES_EN,
        Locale::De => FEATURES_DE,
    }
}

/// Localised display name of a sport, if the sport is known.
///
/// # Examples
/// ```
/// use campsite_core::{Locale, sport_name};
///
/// assert_eq!(sport_name(Locale::De, "swimming"), Some("Schwimmbad"));
/// assert_eq!(sport_name(Locale::En, "curling"), None);
/// ```
#[must_use]
pub fn sport_name(locale: Locale, sport: &str) -> Option<&'static str> {
    let table = match locale {
        Locale::En => SPORTS_EN,
        Locale::De => SPORTS_DE,
    };
    table
        .iter()
        .find(|(id, _)| *id == sport)
        .map(|&(_, name)| name)
}

const fn rule(
    key: &'static str,
    values: &'static [(ValuePattern, &'static str)],
) -> FeatureRule {
    FeatureRule { key, values }
}

static FEATURES_EN: &[FeatureRule] = &[
    rule("tents", &[(Prefix("yes"), "tents"), (Prefix("no"), "no tents")]),
    rule("caravans", &[(Prefix("yes"), "caravans"), (Prefix("no"), "no caravans")]),
    rule("static_caravans", &[(Prefix("yes"), "static caravans")]),
    rule("cabins", &[(Prefix("yes"), "cabins")]),
    rule(
        "permanent_camping",
        &[
            (Prefix("yes"), "permanent camping"),
            (Prefix("only"), "permanent camping only"),
        ],
    ),
    rule("toilets", &[(Prefix("yes"), "toilets"), (Prefix("no"), "no toilets")]),
    rule("shower", &[(Prefix("yes"), "showers"), (Prefix("no"), "no showers")]),
    rule(
        "drinking_water",
        &[
            (Prefix("yes"), "drinking water"),
            (Prefix("no"), "no drinking water"),
        ],
    ),
    rule(
        "power_supply",
        &[
            (NotPrefixed("no"), "power supply"),
            (Prefix("no"), "no power supply"),
        ],
    ),
    rule(
        "sanitary_dump_station",
        &[(NotPrefixed("no"), "sanitary dump station")],
    ),
    rule("shop", &[(Prefix("yes"), "shop")]),
    rule("laundry", &[(Prefix("yes"), "laundry")]),
    rule("washing_machine", &[(Prefix("yes"), "washing machine")]),
    rule("pub", &[(Prefix("yes"), "pub")]),
    rule("bar", &[(Prefix("yes"), "bar")]),
    rule("restaurant", &[(Prefix("yes"), "restaurant")]),
    rule("fast_food", &[(Prefix("yes"), "fast food")]),
    rule("telephone", &[(Prefix("yes"), "public telephone")]),
    rule("post_box", &[(Prefix("yes"), "post box")]),
    rule("playground", &[(Prefix("yes"), "playground")]),
    rule(
        "internet_access",
        &[
            (Prefix("yes"), "internet"),
            (Prefix("no"), "no internet"),
            (Prefix("wifi"), "wifi"),
            (Prefix("wlan"), "wifi"),
        ],
    ),
    rule("bbq", &[(Prefix("yes"), "barbeque")]),
    rule(
        "dog",
        &[
            (Prefix("yes"), "dogs allowed"),
            (Prefix("no"), "dogs not allowed"),
            (Prefix("leashed"), "dogs leashed only"),
        ],
    ),
    rule(
        "motor_vehicle",
        &[
            (Prefix("yes"), "motor vehicles"),
            (Prefix("no"), "no motor vehicles"),
        ],
    ),
    rule(
        "openfire",
        &[
            (Prefix("yes"), "open fire allowed"),
            (Prefix("no"), "open fire prohibited"),
        ],
    ),
    rule("sauna", &[(Prefix("yes"), "sauna")]),
    rule("miniature_golf", &[(Prefix("yes"), "miniature golf")]),
];

static FEATURES_DE: &[FeatureRule] = &[
    rule("tents", &[(Prefix("yes"), "Zelte"), (Prefix("no"), "keine Zelte")]),
    rule(
        "caravans",
        &[(Prefix("yes"), "Wohnwagen"), (Prefix("no"), "keine Wohnwagen")],
    ),
    rule("static_caravans", &[(Prefix("yes"), "ortsfeste Wohnwagen")]),
    rule("cabins", &[(Prefix("yes"), "Hütten")]),
    rule(
        "permanent_camping",
        &[(Prefix("yes"), "Dauercamper"), (Prefix("only"), "nur Dauercamper")],
    ),
    rule(
        "toilets",
        &[(Prefix("yes"), "Toiletten"), (Prefix("no"), "keine Toiletten")],
    ),
    rule("shower", &[(Prefix("yes"), "Duschen"), (Prefix("no"), "keine Duschen")]),
    rule(
        "drinking_water",
        &[(Prefix("yes"), "Trinkwasser"), (Prefix("no"), "kein Trinkwasser")],
    ),
    rule(
        "power_supply",
        &[
            (NotPrefixed("no"), "Stromanschluss"),
            (Prefix("no"), "kein Stromanschluss"),
        ],
    ),
    rule(
        "sanitary_dump_station",
        &[(NotPrefixed("no"), "Sanitäre Entsorgungsstation")],
    ),
    rule("shop", &[(Prefix("yes"), "Laden")]),
    rule("laundry", &[(Prefix("yes"), "Waschsalon")]),
    rule("washing_machine", &[(Prefix("yes"), "Waschmaschine")]),
    rule("pub", &[(Prefix("yes"), "Kneipe")]),
    rule("bar", &[(Prefix("yes"), "Bar")]),
    rule("restaurant", &[(Prefix("yes"), "Restaurant")]),
    rule("fast_food", &[(Prefix("yes"), "Schnellimbiss")]),
    rule("telephone", &[(Prefix("yes"), "Fernsprecher")]),
    rule("post_box", &[(Prefix("yes"), "Briefkasten")]),
    rule("playground", &[(Prefix("yes"), "Spielplatz")]),
    rule(
        "internet_access",
        &[
            (Prefix("yes"), "Internetzugang"),
            (Prefix("no"), "kein Internetzugang"),
            (Prefix("wifi"), "WLAN"),
            (Prefix("wlan"), "WLAN"),
        ],
    ),
    rule("bbq", &[(Prefix("yes"), "Grill")]),
    rule(
        "dog",
        &[
            (Prefix("yes"), "Hunde erlaubt"),
            (Prefix("no"), "Hunde verboten"),
            (Prefix("leashed"), "Hunde angeleint"),
        ],
    ),
    rule("motor_vehicle", &[(Prefix("yes"), "Kfz"), (Prefix("no"), "keine Kfz")]),
    rule(
        "openfire",
        &[
            (Prefix("yes"), "Feuer machen erlaubt"),
            (Prefix("no"), "Feuer machen verboten"),
        ],
    ),
    rule("sauna", &[(Prefix("yes"), "Sauna")]),
    rule("miniature_golf", &[(Prefix("yes"), "Minigolf")]),
];

static SPORTS_EN: &[(&str, &str)] = &[
    ("swimming", "pool"),
    ("golf", "golf"),
    ("tennis", "tennis"),
    ("soccer", "soccer"),
    ("archery", "archery"),
    ("baseball", "baseball"),
    ("basketball", "basketball"),
    ("beachvolleyball", "beach volleyball"),
    ("equestrian", "riding arena"),
    ("table_tennis", "table tennis"),
    ("volleyball", "volleyball"),
];

static SPORTS_DE: &[(&str, &str)] = &[
    ("swimming", "Schwimmbad"),
    ("golf", "Golfplatz"),
    ("tennis", "Tennis"),
    ("soccer", "Fußball"),
    ("archery", "Bogensport"),
    ("baseball", "Baseball"),
    ("basketball", "Basketball"),
    ("beachvolleyball", "Beach Volleyball"),
    ("equestrian", "Reitplatz"),
    ("table_tennis", "Tischtennis"),
    ("volleyball", "Volleyball"),
];
