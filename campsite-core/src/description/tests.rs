//! Tests for description assembly.

use super::*;
use rstest::{fixture, rstest};

fn tags(entries: &[(&str, &str)]) -> Tags {
    entries.iter().copied().collect()
}

#[fixture]
fn lakeside() -> Tags {
    tags(&[
        ("name", "Lakeside"),
        ("category", "standard"),
        ("toilets", "yes"),
        ("shower", "no"),
        ("dog", "leashed"),
    ])
}

#[rstest]
fn identical_tags_describe_identically(lakeside: Tags) {
    let copy = lakeside.clone();
    for locale in Locale::ALL {
        assert_eq!(describe(&lakeside, locale), describe(&copy, locale));
    }
}

#[rstest]
fn fragments_follow_declared_key_order(lakeside: Tags) {
    assert_eq!(
        facilities(&lakeside, Locale::En),
        ["toilets", "no showers", "dogs leashed only"]
    );
}

#[rstest]
fn order_ignores_tag_insertion_order() {
    let mut later = Tags::new();
    later.insert("miniature_golf", "yes");
    later.insert("tents", "yes");
    assert_eq!(facilities(&later, Locale::En), ["tents", "miniature golf"]);
}

#[rstest]
#[case("16A", "power supply")]
#[case("no", "no power supply")]
fn first_matching_pattern_wins(#[case] value: &str, #[case] expected: &str) {
    let campsite = tags(&[("power_supply", value)]);
    assert_eq!(facilities(&campsite, Locale::En), [expected]);
}

#[rstest]
#[case("toilets", "yes;fee", "toilets")]
#[case("internet_access", "wlan;yes", "wifi")]
#[case("power_supply", "none", "no power supply")]
fn patterns_match_the_start_of_the_value(
    #[case] key: &str,
    #[case] value: &str,
    #[case] expected: &str,
) {
    assert_eq!(facilities(&tags(&[(key, value)]), Locale::En), [expected]);
}

#[rstest]
fn multi_valued_tags_keep_declared_order() {
    let campsite = tags(&[
        ("power_supply", "none"),
        ("internet_access", "wlan;yes"),
        ("toilets", "yes;fee"),
    ]);
    assert_eq!(
        facilities(&campsite, Locale::En),
        ["toilets", "no power supply", "wifi"]
    );
}

#[rstest]
fn unmatched_values_contribute_nothing() {
    let campsite = tags(&[("toilets", "maybe"), ("power_supply", "")]);
    assert!(facilities(&campsite, Locale::En).is_empty());
}

#[rstest]
fn unrecognised_tags_leave_the_description_empty() {
    let campsite = tags(&[("name", "Quiet Field"), ("fee", "yes")]);
    assert_eq!(describe(&campsite, Locale::En), "");
}

#[rstest]
fn sport_lists_resolve_in_the_active_locale() {
    let mut campsite = tags(&[("swimming_pool", "yes"), ("golf_course", "yes")]);
    campsite.insert(
        "sport",
        vec!["tennis".to_owned(), "curling".to_owned(), "multi".to_owned()],
    );
    assert_eq!(sports(&campsite), ["tennis", "curling", "multi", "swimming", "golf"]);
    assert_eq!(
        facilities(&campsite, Locale::De),
        ["Tennis", "curling", "multi", "Schwimmbad", "Golfplatz"]
    );
}

#[rstest]
fn text_sport_tags_split_on_semicolons() {
    let campsite = tags(&[("sport", "soccer; volleyball;;")]);
    assert_eq!(sports(&campsite), ["soccer", "volleyball"]);
}

#[rstest]
fn repeated_fragments_are_listed_once() {
    let mut campsite = tags(&[("internet_access", "wlan")]);
    campsite.insert("sport", vec!["golf".to_owned(), "golf".to_owned()]);
    assert_eq!(facilities(&campsite, Locale::En), ["wifi", "golf"]);
}

#[rstest]
#[case(&[], "")]
#[case(&[("operator", "Camp GmbH")], "Camp GmbH")]
#[case(&[("phone", "+49 1"), ("website", "https://camp.example")], "https://camp.example\n+49 1")]
#[case(
    &[("operator", "Camp GmbH"), ("email", "info@camp.example")],
    "Camp GmbH\n\ninfo@camp.example"
)]
fn contact_lines_follow_a_fixed_order(
    #[case] entries: &[(&str, &str)],
    #[case] expected: &str,
) {
    assert_eq!(contact_block(&tags(entries)), expected);
}

#[rstest]
fn sections_are_separated_by_blank_lines() {
    let campsite = tags(&[
        ("operator", "Seeblick <GmbH>"),
        ("addr:street", "Seeweg"),
        ("addr:postcode", "24306"),
        ("addr:city", "Plön"),
        ("toilets", "yes"),
    ]);
    assert_eq!(
        describe(&campsite, Locale::En),
        "Seeblick &lt;GmbH&gt;\n\nSeeweg\n24306 Plön\n\ntoilets"
    );
}

#[rstest]
fn facilities_alone_have_no_stray_separators(lakeside: Tags) {
    let text = describe(&lakeside, Locale::En);
    assert_eq!(text, "toilets, no showers, dogs leashed only");
    assert!(!text.starts_with([',', '\n']));
    assert!(!text.ends_with([',', ' ', '\n']));
}

#[rstest]
fn german_descriptions_use_german_fragments(lakeside: Tags) {
    assert_eq!(
        describe(&lakeside, Locale::De),
        "Toiletten, keine Duschen, Hunde angeleint"
    );
}
