//! Human-readable campsite descriptions.
//!
//! A description has up to three sections separated by a blank line:
//! contact details, the postal address and a comma-separated list of
//! facilities and sports. Empty sections are left out entirely.

use quick_xml::escape::partial_escape;

use crate::{Locale, PostalAddress, TagValue, Tags, feature_rules, sport_name};

const SECTION_SEPARATOR: &str = "\n\n";
const FRAGMENT_SEPARATOR: &str = ", ";
const OPERATOR_KEY: &str = "operator";
/// Contact keys in display order. Fax numbers are of little use outdoors.
const CONTACT_KEYS: [&str; 3] = ["website", "email", "phone"];
const SPORT_KEY: &str = "sport";
const SPORT_LIST_SEPARATOR: char = ';';

/// Build the XML-escaped description text of a campsite.
///
/// The output depends only on `tags` and `locale`.
///
/// # Examples
/// ```
/// use campsite_core::{Locale, Tags, describe};
///
/// let tags = Tags::from([
///     ("operator", "Fish & Co"),
///     ("toilets", "yes"),
///     ("dog", "leashed"),
/// ]);
/// assert_eq!(
///     describe(&tags, Locale::En),
///     "Fish &amp; Co\n\ntoilets, dogs leashed only"
/// );
/// ```
#[must_use]
pub fn describe(tags: &Tags, locale: Locale) -> String {
    let address = PostalAddress::from_tags(tags)
        .map(|address| address.format())
        .unwrap_or_default();
    let facilities = facilities(tags, locale).join(FRAGMENT_SEPARATOR);
    let text = [contact_block(tags), address, facilities]
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR);
    partial_escape(&text).into_owned()
}

/// Operator and contact lines, unescaped.
///
/// The operator comes first, separated by a blank line from the website, email
/// and phone lines that follow.
#[must_use]
pub fn contact_block(tags: &Tags) -> String {
    let contacts: Vec<&str> = CONTACT_KEYS
        .iter()
        .filter_map(|key| tags.text(key))
        .collect();
    let mut lines: Vec<&str> = tags.text(OPERATOR_KEY).into_iter().collect();
    if !lines.is_empty() && !contacts.is_empty() {
        lines.push("");
    }
    lines.extend(contacts);
    lines.join("\n")
}

/// Localised facility and sport fragments in display order.
///
/// Feature rules contribute at most one fragment per key, taken from the first
/// matching value pattern. Sports follow the features; unknown sports keep
/// their raw identifier. Repeated fragments are only listed once.
#[must_use]
pub fn facilities(tags: &Tags, locale: Locale) -> Vec<&str> {
    let mut fragments = Vec::new();
    for rule in feature_rules(locale) {
        if let Some(text) = tags.text(rule.key).and_then(|value| rule.resolve(value)) {
            push_unique(&mut fragments, text);
        }
    }
    for sport in sports(tags) {
        push_unique(&mut fragments, sport_name(locale, sport).unwrap_or(sport));
    }
    fragments
}

/// Sport identifiers of a campsite.
///
/// Combines the `sport` tag with `swimming` for `swimming_pool=yes` and `golf`
/// for `golf_course=yes`. A plain-text `sport` tag is split on `;`. The
/// catch-all `multi` value is kept like any other sport.
#[must_use]
pub fn sports(tags: &Tags) -> Vec<&str> {
    let mut sports: Vec<&str> = match tags.get(SPORT_KEY) {
        Some(TagValue::List(values)) => values.iter().map(String::as_str).collect(),
        Some(TagValue::Text(value)) => value.split(SPORT_LIST_SEPARATOR).map(str::trim).collect(),
        Some(TagValue::Other(_)) | None => Vec::new(),
    };
    if tags.text("swimming_pool") == Some("yes") {
        sports.push("swimming");
    }
    if tags.text("golf_course") == Some("yes") {
        sports.push("golf");
    }
    sports.retain(|sport| !sport.is_empty());
    sports
}

fn push_unique<'a>(fragments: &mut Vec<&'a str>, fragment: &'a str) {
    if !fragments.contains(&fragment) {
        fragments.push(fragment);
    }
}

#[cfg(test)]
mod tests;
