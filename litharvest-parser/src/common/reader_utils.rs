//! Reader-based XML helpers for article XML
//!
//! Thin wrappers around `quick_xml::Reader` patterns used by
//! [`crate::article::ArticleText`].

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::{resolve_html5_entity, resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesText, Event};
use tracing::debug;

use crate::error::{ParseError, Result};

/// Create a configured `Reader` from a string slice.
///
/// Configuration:
/// - `expand_empty_elements(true)`: turns `<p/>` into `Start` + `End` events so
///   empty paragraphs are still counted
/// - `check_end_names(false)`: publisher XML is occasionally sloppy about
///   closing tags; nesting is tracked by the caller instead
///
/// Text is never trimmed; callers get the document's whitespace as-is.
pub fn make_reader(content: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(content);
    let config = reader.config_mut();
    config.expand_empty_elements = true;
    config.check_end_names = false;
    reader
}

/// Unescape a text node entity by entity.
///
/// XML predefined entities, character references and HTML named entities
/// (`&nbsp;`, `&trade;`, ...) are resolved. An entity that is still unknown
/// is kept verbatim without affecting the rest of the node.
pub fn unescape_lossy<'a>(text: &'a BytesText<'a>) -> Cow<'a, str> {
    let raw = String::from_utf8_lossy(text);
    if !raw.contains('&') {
        return raw;
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest: &str = &raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let Some(end) = candidate.find(';') else {
            out.push_str(candidate);
            rest = "";
            break;
        };

        let entity = &candidate[..=end];
        match unescape_with(entity, resolve_entity) {
            Ok(resolved) => out.push_str(&resolved),
            Err(err) => {
                debug!(error = %err, entity = %entity, "Keeping unknown entity as-is");
                out.push_str(entity);
            }
        }
        rest = &candidate[end + 1..];
    }
    out.push_str(rest);

    Cow::Owned(out)
}

fn resolve_entity(name: &str) -> Option<&'static str> {
    resolve_predefined_entity(name).or_else(|| resolve_html5_entity(name))
}

/// Character data carried by an event, if any.
///
/// Returns the unescaped content of `Text` events and the verbatim content of
/// `CData` sections; every other event yields `None`.
pub fn event_text<'a>(event: &'a Event<'a>) -> Option<Cow<'a, str>> {
    match event {
        Event::Text(text) => Some(unescape_lossy(text)),
        Event::CData(cdata) => Some(String::from_utf8_lossy(cdata)),
        _ => None,
    }
}

/// Read all text content inside the current element, ignoring child tags.
///
/// The reader must have just consumed `Event::Start` for `parent_tag`. Reads
/// until the matching `Event::End`, concatenating every text node in between.
/// Nested elements with the same name are balanced.
pub fn read_text_content(
    reader: &mut Reader<&[u8]>,
    parent_tag: &[u8],
    buf: &mut Vec<u8>,
) -> Result<String> {
    let mut text = String::new();
    let mut depth: u32 = 1;

    loop {
        match reader
            .read_event_into(buf)
            .map_err(|e| ParseError::XmlError(e.to_string()))?
        {
            Event::Start(e) if e.local_name().as_ref() == parent_tag => depth += 1,
            Event::End(e) if e.local_name().as_ref() == parent_tag => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => break,
            other => {
                if let Some(chunk) = event_text(&other) {
                    text.push_str(&chunk);
                }
            }
        }
        buf.clear();
    }

    Ok(text)
}
