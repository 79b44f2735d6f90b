//! Streaming GPX 1.1 waypoint writer.
//!
//! A [`GpxWriter`] writes the document header on creation, one `<wpt>` per
//! call to [`GpxWriter::write_waypoint`], and the closing `</gpx>` footer in
//! [`GpxWriter::finish`]. A writer dropped without being finished still
//! attempts to write the footer so an aborted run leaves well-formed files
//! where possible.

use std::fmt;
use std::io::{self, Write};

use log::warn;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use thiserror::Error;

use crate::Position;

const GPX: &str = "gpx";
const WAYPOINT: &str = "wpt";
const NAME: &str = "name";
const DESCRIPTION: &str = "desc";
const INDENT_WIDTH: usize = 2;

const GPX_ATTRIBUTES: [(&str, &str); 5] = [
    ("xmlns", "http://www.topografix.com/GPX/1/1"),
    ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    (
        "xsi:schemaLocation",
        "http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd",
    ),
    ("creator", "campsite-poi"),
    ("version", "1.1"),
];

/// Errors raised while writing GPX output.
#[derive(Debug, Error)]
pub enum GpxError {
    /// The XML writer rejected an event.
    #[error("failed to write GPX element: {0}")]
    Write(#[from] quick_xml::Error),
    /// Flushing or finalising the underlying stream failed.
    #[error("failed to write GPX stream: {0}")]
    Io(#[from] io::Error),
    /// The document has already been closed.
    #[error("GPX document already finished")]
    Finished,
}

/// One waypoint entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waypoint<'a> {
    /// Location written as the `lat` and `lon` attributes.
    pub position: &'a Position,
    /// Raw waypoint name; escaped on output and omitted when `None`.
    pub name: Option<&'a str>,
    /// Description text that is already XML-escaped; omitted when empty.
    pub description: &'a str,
}

/// GPX document being written to `W`.
///
/// # Examples
/// ```
/// use campsite_core::{GpxWriter, Position, Waypoint};
///
/// let position = Position::from_degrees(10.0, 50.0).ok_or("finite degrees")?;
/// let mut gpx = GpxWriter::start(Vec::new())?;
/// gpx.write_waypoint(&Waypoint {
///     position: &position,
///     name: Some("Lakeside"),
///     description: "toilets",
/// })?;
/// let bytes = gpx.finish()?;
/// let text = String::from_utf8(bytes)?;
/// assert!(text.contains("<wpt lat=\"50.0\" lon=\"10.0\">"));
/// assert!(text.ends_with("</gpx>\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct GpxWriter<W: Write> {
    writer: Option<Writer<W>>,
}

impl<W: Write> fmt::Debug for GpxWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpxWriter")
            .field("finished", &self.writer.is_none())
            .finish_non_exhaustive()
    }
}

impl<W: Write> GpxWriter<W> {
    /// Write the XML declaration and the opening `<gpx>` element.
    ///
    /// # Errors
    /// Returns [`GpxError`] when the header cannot be written.
    pub fn start(inner: W) -> Result<Self, GpxError> {
        let mut writer = Writer::new_with_indent(inner, b' ', INDENT_WIDTH);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new(GPX).with_attributes(GPX_ATTRIBUTES),
        ))?;
        Ok(Self {
            writer: Some(writer),
        })
    }

    /// Append one `<wpt>` element.
    ///
    /// Coordinates are written exactly as carried by `position`.
    ///
    /// # Errors
    /// Returns [`GpxError`] when the element cannot be written.
    pub fn write_waypoint(&mut self, waypoint: &Waypoint<'_>) -> Result<(), GpxError> {
        let writer = self.writer.as_mut().ok_or(GpxError::Finished)?;
        let lat = waypoint.position.lat.to_string();
        let lon = waypoint.position.lon.to_string();
        writer.write_event(Event::Start(
            BytesStart::new(WAYPOINT).with_attributes([("lat", lat.as_str()), ("lon", lon.as_str())]),
        ))?;
        if let Some(name) = waypoint.name {
            write_text_element(writer, NAME, &partial_escape(name))?;
        }
        if !waypoint.description.is_empty() {
            write_text_element(writer, DESCRIPTION, waypoint.description)?;
        }
        writer.write_event(Event::End(BytesEnd::new(WAYPOINT)))?;
        Ok(())
    }

    /// Close the document, flush the stream and hand it back.
    ///
    /// # Errors
    /// Returns [`GpxError`] when the footer cannot be written or flushed.
    pub fn finish(mut self) -> Result<W, GpxError> {
        let writer = self.writer.take().ok_or(GpxError::Finished)?;
        close(writer)
    }
}

impl<W: Write> Drop for GpxWriter<W> {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.take()
            && let Err(err) = close(writer)
        {
            warn!("failed to close unfinished GPX document: {err}");
        }
    }
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    escaped: &str,
) -> Result<(), GpxError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn close<W: Write>(mut writer: Writer<W>) -> Result<W, GpxError> {
    writer.write_event(Event::End(BytesEnd::new(GPX)))?;
    let mut inner = writer.into_inner();
    inner.write_all(b"\n")?;
    inner.flush()?;
    Ok(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const HEADER: &str = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<gpx xmlns=\"http://www.topografix.com/GPX/1/1\" ",
        "xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" ",
        "xsi:schemaLocation=\"http://www.topografix.com/GPX/1/1 ",
        "http://www.topografix.com/GPX/1/1/gpx.xsd\" ",
        "creator=\"campsite-poi\" version=\"1.1\">",
    );

    #[fixture]
    fn position() -> Position {
        Position::from_degrees(10.0, 50.0).expect("finite degrees")
    }

    fn render(waypoints: &[Waypoint<'_>]) -> String {
        let mut gpx = GpxWriter::start(Vec::new()).expect("header");
        for waypoint in waypoints {
            gpx.write_waypoint(waypoint).expect("waypoint");
        }
        String::from_utf8(gpx.finish().expect("footer")).expect("utf-8 output")
    }

    #[rstest]
    fn empty_document_has_header_and_footer() {
        assert_eq!(render(&[]), format!("{HEADER}\n</gpx>\n"));
    }

    #[rstest]
    fn writes_name_and_description(position: Position) {
        let text = render(&[Waypoint {
            position: &position,
            name: Some("A&B <Camp>"),
            description: "toilets, dogs leashed only",
        }]);
        let expected = format!(
            "{HEADER}\n  <wpt lat=\"50.0\" lon=\"10.0\">\n    <name>A&amp;B &lt;Camp&gt;</name>\n    \
             <desc>toilets, dogs leashed only</desc>\n  </wpt>\n</gpx>\n"
        );
        assert_eq!(text, expected);
    }

    #[rstest]
    fn omits_missing_name_and_empty_description(position: Position) {
        let text = render(&[Waypoint {
            position: &position,
            name: None,
            description: "",
        }]);
        assert!(!text.contains("<name>"));
        assert!(!text.contains("<desc>"));
        assert!(text.contains("  <wpt lat=\"50.0\" lon=\"10.0\">\n  </wpt>\n"));
    }

    #[rstest]
    fn dropping_an_unfinished_writer_writes_the_footer(position: Position) {
        let mut buffer = Vec::new();
        {
            let mut gpx = GpxWriter::start(&mut buffer).expect("header");
            gpx.write_waypoint(&Waypoint {
                position: &position,
                name: Some("Lakeside"),
                description: "",
            })
            .expect("waypoint");
        }
        let text = String::from_utf8(buffer).expect("utf-8 output");
        assert!(text.ends_with("  </wpt>\n</gpx>\n"));
    }
}
