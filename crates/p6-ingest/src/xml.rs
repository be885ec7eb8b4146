//! Event-level XML tokenizer
//!
//! Wraps `quick_xml` and reduces its event set to the three structural
//! events the tree builder cares about. Element and attribute names are
//! reported by local name, so `p6:Activity` and `Activity` are the same tag.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{IngestError, Result};

/// Structural event in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    Open {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    Close {
        name: String,
    },
}

/// Pull parser over any buffered byte source
///
/// Only one event is held in memory at a time. Text split across read
/// boundaries (including entity references) is reassembled by `quick_xml`
/// before it is unescaped.
pub struct StreamParser<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    pending_close: Option<String>,
}

impl<R: BufRead> StreamParser<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = true;

        Self {
            reader,
            buf: Vec::with_capacity(8192),
            pending_close: None,
        }
    }

    /// Byte offset of the tokenizer in the decoded stream
    pub fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    /// Next structural event, or `None` at end of input
    pub fn next_event(&mut self) -> Result<Option<XmlEvent>> {
        if let Some(name) = self.pending_close.take() {
            return Ok(Some(XmlEvent::Close { name }));
        }

        loop {
            self.buf.clear();
            let position = self.reader.buffer_position() as u64;
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|source| IngestError::Xml { position, source })?;

            match event {
                Event::Start(ref e) => {
                    let (name, attributes) = open_element(e, position)?;
                    return Ok(Some(XmlEvent::Open { name, attributes }));
                },
                Event::Empty(ref e) => {
                    let (name, attributes) = open_element(e, position)?;
                    self.pending_close = Some(name.clone());
                    return Ok(Some(XmlEvent::Open { name, attributes }));
                },
                Event::End(ref e) => {
                    let name = std::str::from_utf8(e.local_name().as_ref())?.to_string();
                    return Ok(Some(XmlEvent::Close { name }));
                },
                Event::Text(ref e) => {
                    let text = e
                        .unescape()
                        .map_err(|source| IngestError::Xml { position, source })?;
                    if !text.is_empty() {
                        return Ok(Some(XmlEvent::Text(text.into_owned())));
                    }
                },
                Event::CData(ref e) => {
                    let text = std::str::from_utf8(e)?;
                    if !text.is_empty() {
                        return Ok(Some(XmlEvent::Text(text.to_string())));
                    }
                },
                Event::Eof => return Ok(None),
                // Declarations, comments, processing instructions, doctype
                _ => {},
            }
        }
    }
}

fn open_element(e: &BytesStart<'_>, position: u64) -> Result<(String, Vec<(String, String)>)> {
    let name = std::str::from_utf8(e.local_name().as_ref())?.to_string();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|source| IngestError::Attribute { position, source })?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|source| IngestError::Xml { position, source })?;
        attributes.push((key, value.into_owned()));
    }

    Ok((name, attributes))
}
