//! Streaming token source/sink adapters over quick-xml
//!
//! The binding combinators never touch quick-xml types directly; they consume
//! [`TokenSource`] and produce into [`TokenSink`]. Both traits are object safe
//! so field specifications can be stored and driven without generics.

use crate::error::{BindError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::{BufRead, Write};
use std::sync::Arc;

/// One event of the streaming XML wire form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlToken {
    /// Start of an element, with its attributes in document order
    Start {
        /// Element name
        name: String,
        /// Attribute name/value pairs, already unescaped
        attributes: Vec<(String, String)>,
    },

    /// End of an element
    End {
        /// Element name
        name: String,
    },

    /// Character data between elements, already unescaped
    Text(String),

    /// End of the document
    Eof,
}

/// Pull-based source of [`XmlToken`]s
///
/// The engine consumes tokens strictly in order and looks ahead at most one
/// token via [`peek`](TokenSource::peek).
pub trait TokenSource {
    /// Consumes and returns the next token.
    fn next_token(&mut self) -> Result<XmlToken>;

    /// Returns the next token without consuming it.
    fn peek(&mut self) -> Result<&XmlToken>;
}

/// Push-based sink of XML events
pub trait TokenSink {
    /// Writes a start tag with the given attributes.
    fn start_element(&mut self, name: &str, attributes: &[(&str, String)]) -> Result<()>;

    /// Writes character data (escaped as needed).
    fn text(&mut self, content: &str) -> Result<()>;

    /// Writes an end tag.
    fn end_element(&mut self, name: &str) -> Result<()>;

    /// Flushes the underlying writer.
    fn flush(&mut self) -> Result<()>;
}

/// [`TokenSource`] over a `quick_xml::Reader`
///
/// Whitespace-only text is dropped, comments/processing instructions/doctype
/// are skipped, CDATA surfaces as text, and self-closing elements surface as
/// a start token followed by an end token.
pub struct XmlTokenReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    peeked: Option<XmlToken>,
    // synthesized end token for a self-closing element
    pending_end: Option<XmlToken>,
}

impl<'a> XmlTokenReader<&'a [u8]> {
    /// Creates a token reader over an in-memory document.
    #[must_use = "the reader must be consumed to produce tokens"]
    pub fn from_str(content: &'a str) -> Self {
        Self::new(content.as_bytes())
    }
}

impl<R: BufRead> XmlTokenReader<R> {
    /// Creates a token reader over any buffered byte source.
    #[must_use = "the reader must be consumed to produce tokens"]
    pub fn new(inner: R) -> Self {
        Self::configure(Reader::from_reader(inner))
    }

    fn configure(mut reader: Reader<R>) -> Self {
        reader.trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
            peeked: None,
            pending_end: None,
        }
    }

    fn pull(&mut self) -> Result<XmlToken> {
        if let Some(end) = self.pending_end.take() {
            return Ok(end);
        }

        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(e)) => return start_token(&e),
                Ok(Event::Empty(e)) => {
                    let token = start_token(&e)?;
                    if let XmlToken::Start { name, .. } = &token {
                        self.pending_end = Some(XmlToken::End { name: name.clone() });
                    }
                    return Ok(token);
                }
                Ok(Event::End(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Ok(XmlToken::End { name });
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(BindError::Source)?.into_owned();
                    return Ok(XmlToken::Text(text));
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    return Ok(XmlToken::Text(text));
                }
                Ok(Event::Eof) => return Ok(XmlToken::Eof),
                // Prolog and non-content events carry no bound data
                Ok(Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => {}
                Err(e) => return Err(BindError::Source(e)),
            }
        }
    }
}

impl<R: BufRead> TokenSource for XmlTokenReader<R> {
    fn next_token(&mut self) -> Result<XmlToken> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.pull(),
        }
    }

    fn peek(&mut self) -> Result<&XmlToken> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.pull()?,
        };
        Ok(self.peeked.insert(token))
    }
}

fn start_token(e: &BytesStart<'_>) -> Result<XmlToken> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| BindError::Source(quick_xml::Error::InvalidAttr(e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(BindError::Source)?.into_owned();
        attributes.push((key, value));
    }
    Ok(XmlToken::Start { name, attributes })
}

/// [`TokenSink`] over a `quick_xml::Writer`
pub struct XmlTokenWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlTokenWriter<W> {
    /// Creates a compact (no extra whitespace) token writer.
    #[must_use = "the writer must receive events to produce output"]
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
        }
    }

    /// Creates a token writer that indents nested elements.
    #[must_use = "the writer must receive events to produce output"]
    pub fn with_indent(inner: W) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b' ', 2),
        }
    }

    /// Writes the `<?xml version="1.0" encoding="UTF-8"?>` prolog.
    pub fn write_declaration(&mut self) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(BindError::Sink)
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> TokenSink for XmlTokenWriter<W> {
    fn start_element(&mut self, name: &str, attributes: &[(&str, String)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for (key, value) in attributes {
            start.push_attribute((*key, value.as_str()));
        }
        self.writer
            .write_event(Event::Start(start))
            .map_err(BindError::Sink)
    }

    fn text(&mut self, content: &str) -> Result<()> {
        self.writer
            .write_event(Event::Text(BytesText::new(content)))
            .map_err(BindError::Sink)
    }

    fn end_element(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(BindError::Sink)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .get_mut()
            .flush()
            .map_err(|e| BindError::Sink(quick_xml::Error::Io(Arc::new(e))))
    }
}
