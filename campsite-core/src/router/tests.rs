//! Tests for bucket routing and lifecycle.

use super::*;
use crate::test_support::MemorySinks;
use crate::{Category, Position, Tags, Visibility};
use rstest::{fixture, rstest};

fn record(id: &str, position: Option<Position>, entries: &[(&str, &str)]) -> CampsiteRecord {
    CampsiteRecord::new(id, position, entries.iter().copied().collect::<Tags>())
}

fn at(lon: f64, lat: f64) -> Option<Position> {
    Position::from_degrees(lon, lat)
}

#[fixture]
fn sinks() -> MemorySinks {
    MemorySinks::default()
}

struct ReadOnlySinks;

impl SinkProvider for ReadOnlySinks {
    type Sink = io::Sink;

    fn open(&mut self, _file_name: &str) -> io::Result<io::Sink> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

#[rstest]
fn distinct_buckets_each_receive_one_waypoint(sinks: MemorySinks) {
    let records = [
        record("node/1", at(1.0, 2.0), &[("category", "standard")]),
        record("node/2", at(1.0, 2.0), &[("category", "standard"), ("access", "private")]),
        record("node/3", at(1.0, 2.0), &[("category", "caravan")]),
        record("node/4", at(1.0, 2.0), &[("category", "group_only"), ("access", "members")]),
    ];
    let mut router = CategoryRouter::new(sinks.clone(), Locale::En).with_prefix(Some("it"));
    for campsite in &records {
        assert!(matches!(router.route(campsite), Ok(Routed::Written(_))));
    }
    let summary = router.finish().expect("buckets close");

    assert_eq!(summary.written, records.len());
    assert_eq!(
        sinks.file_names(),
        [
            "it_caravan.gpx",
            "it_group_only_private.gpx",
            "it_standard.gpx",
            "it_standard_private.gpx",
        ]
    );
    for file_name in sinks.file_names() {
        let gpx = sinks.contents(&file_name).expect("file contents");
        assert_eq!(gpx.matches("<wpt ").count(), 1, "{file_name}");
        assert!(gpx.starts_with("<?xml"), "{file_name}");
        assert!(gpx.ends_with("</gpx>\n"), "{file_name}");
    }
}

#[rstest]
fn summary_lists_files_in_bucket_order(sinks: MemorySinks) {
    let mut router = CategoryRouter::new(sinks, Locale::En);
    router
        .route(&record("node/1", at(0.0, 0.0), &[("category", "caravan")]))
        .expect("route caravan");
    router
        .route(&record("node/2", at(0.0, 0.0), &[("category", "standard")]))
        .expect("route standard");
    let summary = router.finish().expect("buckets close");
    assert_eq!(summary.files, ["standard.gpx", "caravan.gpx"]);
}

#[rstest]
fn public_buckets_are_listed_before_private_ones(sinks: MemorySinks) {
    let mut router = CategoryRouter::new(sinks, Locale::En).with_prefix(Some("nl"));
    router
        .route(&record(
            "node/1",
            at(5.0, 52.0),
            &[("category", "camping"), ("access", "members")],
        ))
        .expect("route private camping");
    router
        .route(&record("node/2", at(5.0, 52.0), &[("category", "camping")]))
        .expect("route public camping");
    let summary = router.finish().expect("buckets close");
    assert_eq!(summary.files, ["nl_camping.gpx", "nl_camping_private.gpx"]);
}

#[rstest]
fn records_share_an_open_bucket(sinks: MemorySinks) {
    let mut router = CategoryRouter::new(sinks.clone(), Locale::De);
    for id in ["node/1", "node/2", "node/3"] {
        router
            .route(&record(id, at(9.5, 47.25), &[("category", "nudist")]))
            .expect("route nudist");
    }
    router.finish().expect("buckets close");

    let gpx = sinks.contents("nudist.gpx").expect("nudist bucket");
    assert_eq!(gpx.matches("<wpt lat=\"47.25\" lon=\"9.5\">").count(), 3);
    assert_eq!(gpx.matches("<gpx ").count(), 1);
    assert_eq!(gpx.matches("</gpx>").count(), 1);
}

#[rstest]
fn records_without_geometry_open_no_bucket(sinks: MemorySinks) {
    let mut router = CategoryRouter::new(sinks.clone(), Locale::En);
    let campsite = record(
        "node/9",
        None,
        &[("category", "standard"), ("access", "private"), ("name", "A&B"), ("toilets", "yes")],
    );
    assert!(matches!(router.route(&campsite), Ok(Routed::MissingGeometry)));
    let summary = router.finish().expect("buckets close");

    assert_eq!(summary.missing_geometry, 1);
    assert_eq!(summary.written, 0);
    assert!(sinks.file_names().is_empty());
}

#[rstest]
#[case(&[("category", "glamping")])]
#[case(&[("name", "No Category")])]
fn unclassified_records_are_skipped(sinks: MemorySinks, #[case] entries: &[(&str, &str)]) {
    let mut router = CategoryRouter::new(sinks.clone(), Locale::En);
    let outcome = router
        .route(&record("way/5", at(3.0, 4.0), entries))
        .expect("route");
    assert!(matches!(outcome, Routed::Unclassified(_)));
    let summary = router.finish().expect("buckets close");
    assert_eq!(summary.unclassified, 1);
    assert!(sinks.file_names().is_empty());
}

#[rstest]
fn lakeside_waypoint_carries_name_and_description(sinks: MemorySinks) {
    let mut router = CategoryRouter::new(sinks.clone(), Locale::En);
    let campsite = CampsiteRecord::new(
        "node/1",
        Some(Position {
            lon: serde_json::Number::from_f64(10.0).expect("finite"),
            lat: serde_json::Number::from_f64(50.0).expect("finite"),
        }),
        Tags::from([("category", "standard"), ("name", "Lakeside"), ("toilets", "yes")]),
    );
    assert_eq!(
        router.route(&campsite).expect("route"),
        Routed::Written(BucketKey::new(Category::Standard, Visibility::Public))
    );
    router.finish().expect("buckets close");

    let gpx = sinks.contents("standard.gpx").expect("standard bucket");
    assert!(gpx.contains(
        "  <wpt lat=\"50.0\" lon=\"10.0\">\n    <name>Lakeside</name>\n    <desc>toilets</desc>\n  </wpt>\n"
    ));
}

#[rstest]
fn open_failures_name_the_bucket_file() {
    let mut router = CategoryRouter::new(ReadOnlySinks, Locale::En).with_prefix(Some("pl"));
    let err = router
        .route(&record("node/1", at(0.0, 0.0), &[("category", "backcountry")]))
        .expect_err("sinks refuse to open");
    assert!(matches!(
        err,
        RouterError::Open { ref file_name, .. } if file_name == "pl_backcountry.gpx"
    ));
}

#[rstest]
fn dropped_router_still_closes_its_buckets(sinks: MemorySinks) {
    {
        let mut router = CategoryRouter::new(sinks.clone(), Locale::En);
        router
            .route(&record("node/1", at(0.0, 0.0), &[("category", "camping")]))
            .expect("route camping");
    }
    let gpx = sinks.contents("camping.gpx").expect("camping bucket");
    assert!(gpx.ends_with("</gpx>\n"));
}
