//! Campsite records as delivered by the campsite service.
//!
//! The service answers with a GeoJSON feature collection. Each feature carries
//! an identifier, an optional point geometry and a property map mirroring
//! OpenStreetMap's free-form key/value tags. Values are usually strings; a few
//! keys (notably `sport`) arrive as lists.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// A single tag value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Plain string value, the common case.
    Text(String),
    /// List of strings, e.g. the `sport` tag.
    List(Vec<String>),
    /// Any other JSON value. Kept for completeness but never rendered.
    Other(Value),
}

impl TagValue {
    /// Return the value when it is plain text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) | Self::Other(_) => None,
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for TagValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

/// Free-form campsite tags keyed by tag name.
///
/// # Examples
/// ```
/// use campsite_core::Tags;
///
/// let tags = Tags::from([("toilets", "yes"), ("name", "Lakeside")]);
/// assert_eq!(tags.text("toilets"), Some("yes"));
/// assert!(tags.text("shower").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<String, TagValue>);

impl Tags {
    /// Create an empty tag map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a tag, returning the previous value for `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TagValue>) -> Option<TagValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up the raw value of a tag.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.0.get(key)
    }

    /// Look up a tag whose value is plain text.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(TagValue::as_text)
    }

    /// Whether the tag is present, regardless of its value type.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate over tag keys in lexical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no tags are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Tags
where
    K: Into<String>,
    V: Into<TagValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Tags
where
    K: Into<String>,
    V: Into<TagValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// A WGS84 point taken verbatim from the service response.
///
/// Coordinates stay as JSON numbers so they can be written back out without
/// any rounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Longitude in decimal degrees.
    pub lon: Number,
    /// Latitude in decimal degrees.
    pub lat: Number,
}

impl Position {
    /// Build a position from floating-point degrees.
    ///
    /// Returns `None` when either value is not finite.
    #[must_use]
    pub fn from_degrees(lon: f64, lat: f64) -> Option<Self> {
        Some(Self {
            lon: Number::from_f64(lon)?,
            lat: Number::from_f64(lat)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

/// GeoJSON geometry of a campsite.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    /// GeoJSON geometry type, usually `Point`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Raw GeoJSON coordinates.
    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    /// Extract the `[lon, lat]` position of a point geometry.
    ///
    /// Returns `None` when the coordinate array does not start with two
    /// numbers.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        let Value::Array(values) = &self.coordinates else {
            return None;
        };
        match values.as_slice() {
            [Value::Number(lon), Value::Number(lat), ..] => Some(Position {
                lon: lon.clone(),
                lat: lat.clone(),
            }),
            _ => None,
        }
    }
}

impl From<Position> for Geometry {
    fn from(position: Position) -> Self {
        Self {
            kind: Some("Point".to_owned()),
            coordinates: Value::Array(vec![
                Value::Number(position.lon),
                Value::Number(position.lat),
            ]),
        }
    }
}

/// One campsite feature.
///
/// # Examples
/// ```
/// use campsite_core::CampsiteRecord;
///
/// let record: CampsiteRecord = serde_json::from_str(
///     r#"{"id": "node/1", "geometry": {"type": "Point", "coordinates": [10.0, 50.0]},
///        "properties": {"name": "Lakeside", "category": "standard"}}"#,
/// )?;
/// let position = record.position().ok_or("missing geometry")?;
/// assert_eq!(position.lat.to_string(), "50.0");
/// assert_eq!(record.properties.text("name"), Some("Lakeside"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CampsiteRecord {
    /// Identifier assigned by the service, rendered as text.
    #[serde(default, deserialize_with = "id_as_text")]
    pub id: String,
    /// Point geometry; `None` marks an invalid record.
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// Campsite tags.
    #[serde(default)]
    pub properties: Tags,
}

impl CampsiteRecord {
    /// Construct a record from its parts.
    #[must_use]
    pub fn new(id: impl Into<String>, position: Option<Position>, properties: Tags) -> Self {
        Self {
            id: id.into(),
            geometry: position.map(Geometry::from),
            properties,
        }
    }

    /// Position of the campsite, if the record carries a usable geometry.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.geometry.as_ref().and_then(Geometry::position)
    }
}

/// GeoJSON feature collection returned by the campsite service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeatureCollection {
    /// Campsites in service order.
    #[serde(default)]
    pub features: Vec<CampsiteRecord>,
}

fn id_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
