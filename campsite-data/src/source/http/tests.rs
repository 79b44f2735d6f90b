//! Tests for the HTTP campsite source against a local one-shot server.

use super::*;
use crate::BoundingBox;
use rstest::rstest;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

const CAMPSITES: &str = r#"{"type": "FeatureCollection", "features": [
    {"type": "Feature", "id": "node/1",
     "geometry": {"type": "Point", "coordinates": [6.1, 49.6]},
     "properties": {"category": "standard", "name": "Kockelscheuer"}},
    {"type": "Feature", "id": "way/2", "geometry": null,
     "properties": {"category": "caravan"}}
]}"#;

/// Serve one canned response and hand back the request line once answered.
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let base = format!("http://{}", listener.local_addr().expect("local address"));
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("read request line");
        loop {
            let mut header = String::new();
            let read = reader.read_line(&mut header).expect("read header");
            if read == 0 || header == "\r\n" {
                break;
            }
        }
        stream
            .write_all(response.as_bytes())
            .expect("write response");
        request_line.trim_end().to_owned()
    });
    (base, handle)
}

fn source_for(base: &str) -> HttpCampsiteSource {
    let config = HttpSourceConfig::new(format!("{base}/getcampsites"), format!("{base}/sitemap.xml"))
        .with_timeout(Duration::from_secs(10));
    HttpCampsiteSource::with_config(config).expect("source should build")
}

#[rstest]
fn builds_country_and_bounding_box_queries() {
    let source = HttpCampsiteSource::new().expect("source should build");
    let bbox: BoundingBox = "9.5,47.25,10,48".parse().expect("valid bounding box");

    assert_eq!(
        source.campsites_url(&Area::Country("de".to_owned())),
        "https://opencampingmap.org/getcampsites?country=de"
    );
    assert_eq!(
        source.campsites_url(&Area::BoundingBox(bbox)),
        "https://opencampingmap.org/getcampsites?bbox=9.5,47.25,10,48"
    );
}

#[rstest]
fn default_config_points_at_open_camping_map() {
    let config = HttpSourceConfig::default();
    assert_eq!(config.campsites_url, DEFAULT_CAMPSITES_URL);
    assert_eq!(config.sitemap_url, DEFAULT_SITEMAP_URL);
    assert!(config.user_agent.starts_with("campsite-poi/"));
}

#[rstest]
fn fetch_decodes_the_feature_collection() {
    let (base, server) = serve_once("200 OK", CAMPSITES);
    let collection = source_for(&base)
        .fetch(&Area::Country("lu".to_owned()))
        .expect("campsites decode");

    assert_eq!(server.join().expect("server thread"), "GET /getcampsites?country=lu HTTP/1.1");
    assert_eq!(collection.features.len(), 2);
    let first = collection.features.first().expect("first campsite");
    assert_eq!(first.properties.text("name"), Some("Kockelscheuer"));
    assert!(collection.features.get(1).is_some_and(|second| second.position().is_none()));
}

#[rstest]
fn error_statuses_are_reported() {
    let (base, server) = serve_once("404 Not Found", "");
    let err = source_for(&base)
        .fetch(&Area::Country("zz".to_owned()))
        .expect_err("service reports missing country");
    server.join().expect("server thread");

    assert!(matches!(err, SourceError::Http { status: 404, .. }));
}

#[rstest]
fn invalid_json_is_a_decode_error() {
    let (base, server) = serve_once("200 OK", "<html>maintenance</html>");
    let err = source_for(&base)
        .fetch(&Area::Country("lu".to_owned()))
        .expect_err("body is not JSON");
    server.join().expect("server thread");

    assert!(matches!(err, SourceError::Decode { ref url, .. } if url.ends_with("?country=lu")));
}

#[rstest]
fn countries_come_from_the_sitemap() {
    let sitemap = "<sitemapindex>\
        <sitemap><loc>https://example.org/sitemaps/be.xml</loc></sitemap>\
        <sitemap><loc>https://example.org/sitemaps/nl.xml</loc></sitemap>\
        </sitemapindex>";
    let (base, server) = serve_once("200 OK", sitemap);
    let countries = source_for(&base).countries().expect("sitemap parses");

    assert_eq!(server.join().expect("server thread"), "GET /sitemap.xml HTTP/1.1");
    assert_eq!(countries, ["be", "nl"]);
}

#[rstest]
fn refused_connections_are_network_errors() {
    let base = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        format!("http://{}", listener.local_addr().expect("local address"))
    };
    let err = source_for(&base)
        .countries()
        .expect_err("nothing listens on the port");

    assert!(matches!(err, SourceError::Network { .. }));
}
