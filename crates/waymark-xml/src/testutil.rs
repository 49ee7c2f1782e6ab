//! Toy bound entities shared by the reader and writer test modules

use crate::element::XmlElement;
use crate::error::{BindError, Result};
use crate::reader::{
    read_element, AttributeField, ConvertedField, ListField, NestedField, ScalarField,
    skip_element,
};
use crate::token::{TokenSink, TokenSource, XmlToken};
use crate::writer::{emit_display, emit_list, emit_nested, emit_scalar, write_element};

/// A bare text element, `<note>content</note>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub text: String,
}

impl Note {
    pub fn of(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl XmlElement for Note {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
        match source.next_token()? {
            XmlToken::Start { name, .. } if name == tag => {}
            XmlToken::Eof => {
                return Err(BindError::UnexpectedEof {
                    tag: tag.to_string(),
                })
            }
            other => {
                return Err(BindError::UnexpectedElement {
                    expected: tag.to_string(),
                    found: format!("{other:?}"),
                });
            }
        }

        let mut text = String::new();
        loop {
            match source.peek()? {
                XmlToken::Text(_) => {
                    if let XmlToken::Text(chunk) = source.next_token()? {
                        text.push_str(&chunk);
                    }
                }
                XmlToken::Start { .. } => skip_element(source)?,
                XmlToken::End { .. } => {
                    source.next_token()?;
                    return Ok(Self { text });
                }
                XmlToken::Eof => {
                    return Err(BindError::UnexpectedEof {
                        tag: tag.to_string(),
                    });
                }
            }
        }
    }

    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()> {
        write_element(sink, tag, &[], |sink| {
            if self.text.is_empty() {
                Ok(())
            } else {
                sink.text(&self.text)
            }
        })
    }
}

/// A nested sub-entity with one scalar child
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detail {
    pub kind: Option<String>,
}

impl XmlElement for Detail {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
        let mut kind = ScalarField::new("kind");
        read_element(source, tag, &mut [], &mut [&mut kind])?;
        Ok(Self { kind: kind.take() })
    }

    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()> {
        write_element(sink, tag, &[], |sink| {
            emit_scalar(sink, "kind", self.kind.as_deref())
        })
    }
}

/// The full fixture: attribute, scalar, converted, list and nested fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub id: Option<String>,
    pub name: Option<String>,
    pub count: Option<u32>,
    pub notes: Vec<Note>,
    pub detail: Option<Detail>,
}

impl XmlElement for Item {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
        let mut id = AttributeField::new("id");
        let mut name = ScalarField::new("name");
        let mut count = ConvertedField::<u32>::new("count");
        let mut notes = ListField::<Note>::new("note");
        let mut detail = NestedField::<Detail>::new("detail");

        read_element(
            source,
            tag,
            &mut [&mut id],
            &mut [&mut name, &mut count, &mut notes, &mut detail],
        )?;

        Ok(Self {
            id: id.take(),
            name: name.take(),
            count: count.take(),
            notes: notes.take(),
            detail: detail.take(),
        })
    }

    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()> {
        let mut attributes = Vec::new();
        if let Some(id) = &self.id {
            attributes.push(("id", id.clone()));
        }
        write_element(sink, tag, &attributes, |sink| {
            emit_scalar(sink, "name", self.name.as_deref())?;
            emit_display(sink, "count", self.count.as_ref())?;
            emit_list(sink, "note", &self.notes)?;
            emit_nested(sink, "detail", self.detail.as_ref())
        })
    }
}
