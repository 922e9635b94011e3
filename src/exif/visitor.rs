use std::io;
use std::sync::Arc;

use quick_xml::Reader;
use quick_xml::errors::IllFormedError;
use quick_xml::events::Event;

use crate::error::Error;

/// Receives one `(tag name, value)` pair per tag found in a dump.
///
/// Returning an error stops the dump; [`ExifTool::read_tags`](super::ExifTool::read_tags)
/// returns that same error to its caller. Any closure of the shape
/// `FnMut(&str, &str) -> Result<(), E>` is a visitor.
///
/// # Example
///
/// ```rust
/// use exif_bridge::exif::TagVisitor;
///
/// #[derive(Default)]
/// struct Collect(Vec<(String, String)>);
///
/// impl TagVisitor<exif_bridge::Error> for Collect {
///     fn handle_tag(&mut self, name: &str, value: &str) -> exif_bridge::Result<()> {
///         self.0.push((name.to_string(), value.to_string()));
///         Ok(())
///     }
/// }
/// ```
pub trait TagVisitor<E> {
    fn handle_tag(&mut self, name: &str, value: &str) -> Result<(), E>;
}

impl<F, E> TagVisitor<E> for F
where
    F: FnMut(&str, &str) -> Result<(), E>,
{
    fn handle_tag(&mut self, name: &str, value: &str) -> Result<(), E> {
        self(name, value)
    }
}

/// Walk the XML produced by `exif -x` and hand every non-empty element
/// value to the visitor, in document order.
///
/// Only text is forwarded: start and end tags just track which element the
/// text belongs to. An element's text and CDATA pieces are joined and
/// reported once, when the element closes. Whitespace between elements is
/// skipped. Output without a root element, or cut off before every element
/// is closed, is a parse error.
pub(crate) fn relay_tags<V, E>(program: &str, xml: &str, visitor: &mut V) -> Result<(), E>
where
    V: TagVisitor<E> + ?Sized,
    E: From<Error>,
{
    let parse_error = |source: quick_xml::Error| Error::Parse {
        program: program.to_string(),
        source,
    };

    let mut reader = Reader::from_str(xml);
    // (element name, text collected so far)
    let mut open: Vec<(String, String)> = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Start(e) => {
                seen_root = true;
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                open.push((name, String::new()));
            }
            Event::Empty(_) => seen_root = true,
            Event::End(_) => {
                if let Some((name, value)) = open.pop() {
                    if !value.trim().is_empty() {
                        visitor.handle_tag(&name, &value)?;
                    }
                }
            }
            Event::Text(t) => {
                let value = t.unescape().map_err(parse_error)?;
                if let Some((_, text)) = open.last_mut() {
                    text.push_str(&value);
                }
            }
            Event::CData(c) => {
                if let Some((_, text)) = open.last_mut() {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((name, _)) = open.pop() {
        return Err(parse_error(quick_xml::Error::IllFormed(
            IllFormedError::MissingEndTag(name),
        ))
        .into());
    }
    if !seen_root {
        return Err(parse_error(quick_xml::Error::Io(Arc::new(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no root element",
        ))))
        .into());
    }

    Ok(())
}
