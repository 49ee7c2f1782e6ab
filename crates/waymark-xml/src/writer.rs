//! Field writer combinators, the dual of the reader side
//!
//! An entity's `write_as` wraps its body in [`write_element`] and emits its
//! fields in declared order with the combinators below. Absent fields and
//! empty lists emit nothing; element order in the output is the declaration
//! order, which is part of the wire contract.

use crate::element::XmlElement;
use crate::error::Result;
use crate::token::TokenSink;
use std::fmt::Display;

/// Writes one `<tag ...>...</tag>` element around the body closure.
///
/// # Errors
///
/// Propagates sink failures and any error returned by the body.
pub fn write_element<F>(
    sink: &mut dyn TokenSink,
    tag: &str,
    attributes: &[(&str, String)],
    body: F,
) -> Result<()>
where
    F: FnOnce(&mut dyn TokenSink) -> Result<()>,
{
    sink.start_element(tag, attributes)?;
    body(sink)?;
    sink.end_element(tag)
}

/// Writes a `<tag>text</tag>` triple only if the value is present.
///
/// # Errors
///
/// Propagates sink failures.
pub fn emit_scalar(sink: &mut dyn TokenSink, tag: &str, value: Option<&str>) -> Result<()> {
    if let Some(text) = value {
        sink.start_element(tag, &[])?;
        if !text.is_empty() {
            sink.text(text)?;
        }
        sink.end_element(tag)?;
    }
    Ok(())
}

/// Writes a converted scalar through its `Display` form if present.
///
/// The `Display` form must be the left inverse of the field's parse, so a
/// written value reads back equal.
///
/// # Errors
///
/// Propagates sink failures.
pub fn emit_display<V: Display>(
    sink: &mut dyn TokenSink,
    tag: &str,
    value: Option<&V>,
) -> Result<()> {
    match value {
        Some(v) => emit_scalar(sink, tag, Some(&v.to_string())),
        None => Ok(()),
    }
}

/// Writes one `<tag>` element per item, in sequence order.
///
/// # Errors
///
/// Propagates sink failures.
pub fn emit_list<T: XmlElement>(sink: &mut dyn TokenSink, tag: &str, items: &[T]) -> Result<()> {
    for item in items {
        item.write_as(tag, sink)?;
    }
    Ok(())
}

/// Delegates to the nested entity's writer if present.
///
/// # Errors
///
/// Propagates sink failures.
pub fn emit_nested<T: XmlElement>(
    sink: &mut dyn TokenSink,
    tag: &str,
    value: Option<&T>,
) -> Result<()> {
    match value {
        Some(nested) => nested.write_as(tag, sink),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Detail, Item, Note};
    use crate::token::{XmlTokenReader, XmlTokenWriter};

    fn write_item(item: &Item) -> String {
        let mut sink = XmlTokenWriter::new(Vec::new());
        item.write_as("item", &mut sink).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_absent_fields_emit_nothing() {
        let item = Item::default();
        assert_eq!(write_item(&item), "<item></item>");
    }

    #[test]
    fn test_field_order_is_declaration_order() {
        let item = Item {
            id: Some("3".to_string()),
            name: Some("n".to_string()),
            count: Some(9),
            notes: vec![Note::of("t")],
            detail: Some(Detail {
                kind: Some("k".to_string()),
            }),
        };
        assert_eq!(
            write_item(&item),
            "<item id=\"3\"><name>n</name><count>9</count>\
             <note>t</note><detail><kind>k</kind></detail></item>"
        );
    }

    #[test]
    fn test_empty_list_emits_nothing() {
        let item = Item {
            name: Some("n".to_string()),
            ..Item::default()
        };
        assert_eq!(write_item(&item), "<item><name>n</name></item>");
    }

    #[test]
    fn test_list_items_in_sequence_order() {
        let item = Item {
            notes: vec![Note::of("a"), Note::of("b")],
            ..Item::default()
        };
        assert_eq!(
            write_item(&item),
            "<item><note>a</note><note>b</note></item>"
        );
    }

    #[test]
    fn test_present_empty_scalar_round_trips() {
        let item = Item {
            name: Some(String::new()),
            ..Item::default()
        };
        let xml = write_item(&item);
        assert_eq!(xml, "<item><name></name></item>");

        let mut source = XmlTokenReader::from_str(&xml);
        let back = Item::read_as("item", &mut source).unwrap();
        assert_eq!(back.name, Some(String::new()));
    }

    #[test]
    fn test_round_trip_equality() {
        let item = Item {
            id: Some("12".to_string()),
            name: Some("alpha & beta".to_string()),
            count: Some(7),
            notes: vec![Note::of("one"), Note::of("")],
            detail: Some(Detail {
                kind: Some("<odd>".to_string()),
            }),
        };

        let xml = write_item(&item);
        let mut source = XmlTokenReader::from_str(&xml);
        let back = Item::read_as("item", &mut source).unwrap();
        assert_eq!(back, item);
    }
}
