//! Field reader combinators and the recursive-descent element reader
//!
//! An entity's `read_as` declares one field specification per bound field,
//! hands them to [`read_element`], then assembles the immutable entity from
//! the collected values. Matching is driven entirely by the declarations:
//! scalar and nested fields claim at most one child each, list fields claim
//! every occurrence of their tag, and children no specification claims are
//! skipped whole (forward compatibility, not an error).

use crate::element::XmlElement;
use crate::error::{BindError, Result};
use crate::token::{TokenSource, XmlToken};
use std::str::FromStr;

/// A field specification that claims child elements by name
pub trait ChildField {
    /// Whether this specification claims the next child named `name`.
    fn wants(&self, name: &str) -> bool;

    /// Consumes one child element (the source is positioned on its start
    /// token) into this specification's value.
    fn consume(&mut self, source: &mut dyn TokenSource) -> Result<()>;
}

/// A specification that claims an attribute of the start tag
pub trait AttributeSlot {
    /// Attribute name this slot claims.
    fn name(&self) -> &str;

    /// Stores the raw attribute value, converting if required.
    fn fill(&mut self, owner: &str, raw: &str) -> Result<()>;
}

/// Reads one `<tag ...>...</tag>` element, distributing its attributes and
/// children to the given specifications in declaration order.
///
/// Each child start tag is offered to the field specifications in order;
/// the first non-exhausted match consumes it. Unrecognized children are
/// skipped in full. Text directly inside the element that no scalar claims
/// is ignored.
///
/// # Errors
///
/// Returns [`BindError::UnexpectedElement`] if the stream is not positioned
/// on `<tag>`, [`BindError::UnexpectedEof`] if the document ends before
/// `</tag>`, and propagates any conversion or source failure unchanged.
pub fn read_element(
    source: &mut dyn TokenSource,
    tag: &str,
    attributes: &mut [&mut dyn AttributeSlot],
    children: &mut [&mut dyn ChildField],
) -> Result<()> {
    let attrs = expect_start(source, tag)?;
    for (key, raw) in &attrs {
        if let Some(slot) = attributes.iter_mut().find(|s| s.name() == key) {
            slot.fill(tag, raw)?;
        }
    }

    loop {
        match source.peek()? {
            XmlToken::Start { name, .. } => {
                let name = name.clone();
                match children.iter_mut().find(|f| f.wants(&name)) {
                    Some(field) => field.consume(source)?,
                    None => {
                        log::debug!("skipping unrecognized element <{name}> in <{tag}>");
                        skip_element(source)?;
                    }
                }
            }
            XmlToken::Text(_) => {
                source.next_token()?;
            }
            XmlToken::End { name } if name == tag => {
                source.next_token()?;
                return Ok(());
            }
            XmlToken::End { name } => {
                return Err(BindError::UnexpectedElement {
                    expected: tag.to_string(),
                    found: format!("/{name}"),
                });
            }
            XmlToken::Eof => {
                return Err(BindError::UnexpectedEof {
                    tag: tag.to_string(),
                });
            }
        }
    }
}

/// Consumes one whole element subtree without interpreting it.
pub fn skip_element(source: &mut dyn TokenSource) -> Result<()> {
    let root = match source.next_token()? {
        XmlToken::Start { name, .. } => name,
        other => {
            return Err(BindError::UnexpectedElement {
                expected: "*".to_string(),
                found: token_label(&other),
            });
        }
    };

    let mut depth = 1usize;
    while depth > 0 {
        match source.next_token()? {
            XmlToken::Start { .. } => depth += 1,
            XmlToken::End { .. } => depth -= 1,
            XmlToken::Text(_) => {}
            XmlToken::Eof => return Err(BindError::UnexpectedEof { tag: root }),
        }
    }
    Ok(())
}

/// Consumes a start token named `tag` and returns its attributes.
fn expect_start(source: &mut dyn TokenSource, tag: &str) -> Result<Vec<(String, String)>> {
    match source.next_token()? {
        XmlToken::Start { name, attributes } if name == tag => Ok(attributes),
        XmlToken::Eof => Err(BindError::UnexpectedEof {
            tag: tag.to_string(),
        }),
        other => Err(BindError::UnexpectedElement {
            expected: tag.to_string(),
            found: token_label(&other),
        }),
    }
}

fn token_label(token: &XmlToken) -> String {
    match token {
        XmlToken::Start { name, .. } => name.clone(),
        XmlToken::End { name } => format!("/{name}"),
        XmlToken::Text(_) => "#text".to_string(),
        XmlToken::Eof => "#eof".to_string(),
    }
}

/// Reads the text content of a child element, skipping any markup inside it.
fn consume_text(source: &mut dyn TokenSource, tag: &str) -> Result<String> {
    expect_start(source, tag)?;
    let mut text = String::new();
    loop {
        match source.peek()? {
            XmlToken::Text(_) => {
                if let XmlToken::Text(chunk) = source.next_token()? {
                    text.push_str(&chunk);
                }
            }
            XmlToken::Start { name, .. } => {
                log::debug!("skipping markup <{name}> inside scalar <{tag}>");
                skip_element(source)?;
            }
            XmlToken::End { name } if name == tag => {
                source.next_token()?;
                return Ok(text);
            }
            XmlToken::End { name } => {
                return Err(BindError::UnexpectedElement {
                    expected: tag.to_string(),
                    found: format!("/{name}"),
                });
            }
            XmlToken::Eof => {
                return Err(BindError::UnexpectedEof {
                    tag: tag.to_string(),
                });
            }
        }
    }
}

type ParseFn<V> = fn(&str) -> std::result::Result<V, String>;

/// Expects at most one child element with text content
#[derive(Debug, Clone)]
pub struct ScalarField {
    tag: &'static str,
    value: Option<String>,
}

impl ScalarField {
    /// Declares an optional scalar bound to `<tag>`.
    #[must_use = "field specifications must be passed to read_element"]
    pub fn new(tag: &'static str) -> Self {
        Self { tag, value: None }
    }

    /// Returns the collected text, or `None` if the child was absent.
    pub fn take(&mut self) -> Option<String> {
        self.value.take()
    }
}

impl ChildField for ScalarField {
    fn wants(&self, name: &str) -> bool {
        self.value.is_none() && name == self.tag
    }

    fn consume(&mut self, source: &mut dyn TokenSource) -> Result<()> {
        self.value = Some(consume_text(source, self.tag)?);
        Ok(())
    }
}

/// Like [`ScalarField`], with conversion into a domain type
///
/// A failed conversion is a [`BindError::Validation`] carrying the tag and
/// the raw text, and aborts the whole read.
pub struct ConvertedField<V> {
    tag: &'static str,
    parse: ParseFn<V>,
    value: Option<V>,
}

impl<V> ConvertedField<V> {
    /// Declares a converted scalar with an explicit parse function.
    #[must_use = "field specifications must be passed to read_element"]
    pub fn with_parser(tag: &'static str, parse: ParseFn<V>) -> Self {
        Self {
            tag,
            parse,
            value: None,
        }
    }

    /// Returns the converted value, or `None` if the child was absent.
    pub fn take(&mut self) -> Option<V> {
        self.value.take()
    }
}

impl<V> ConvertedField<V>
where
    V: FromStr,
    V::Err: std::fmt::Display,
{
    /// Declares a converted scalar parsed through the type's `FromStr`.
    #[must_use = "field specifications must be passed to read_element"]
    pub fn new(tag: &'static str) -> Self {
        Self::with_parser(tag, |s| V::from_str(s).map_err(|e| e.to_string()))
    }
}

impl<V> ChildField for ConvertedField<V> {
    fn wants(&self, name: &str) -> bool {
        self.value.is_none() && name == self.tag
    }

    fn consume(&mut self, source: &mut dyn TokenSource) -> Result<()> {
        let text = consume_text(source, self.tag)?;
        let value = (self.parse)(&text).map_err(|reason| BindError::Validation {
            tag: self.tag.to_string(),
            text,
            reason,
        })?;
        self.value = Some(value);
        Ok(())
    }
}

/// Collects zero or more child elements in document order
pub struct ListField<T: XmlElement> {
    tag: &'static str,
    items: Vec<T>,
}

impl<T: XmlElement> ListField<T> {
    /// Declares a repeated child element bound to `<tag>`.
    #[must_use = "field specifications must be passed to read_element"]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            items: Vec::new(),
        }
    }

    /// Returns the collected items; zero matches yields an empty sequence.
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }
}

impl<T: XmlElement> ChildField for ListField<T> {
    fn wants(&self, name: &str) -> bool {
        name == self.tag
    }

    fn consume(&mut self, source: &mut dyn TokenSource) -> Result<()> {
        self.items.push(T::read_as(self.tag, source)?);
        Ok(())
    }
}

/// Expects at most one nested sub-entity
pub struct NestedField<T: XmlElement> {
    tag: &'static str,
    value: Option<T>,
}

impl<T: XmlElement> NestedField<T> {
    /// Declares an optional nested entity bound to `<tag>`.
    #[must_use = "field specifications must be passed to read_element"]
    pub fn new(tag: &'static str) -> Self {
        Self { tag, value: None }
    }

    /// Returns the nested entity, or `None` if the child was absent.
    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}

impl<T: XmlElement> ChildField for NestedField<T> {
    fn wants(&self, name: &str) -> bool {
        self.value.is_none() && name == self.tag
    }

    fn consume(&mut self, source: &mut dyn TokenSource) -> Result<()> {
        self.value = Some(T::read_as(self.tag, source)?);
        Ok(())
    }
}

/// An optional string attribute of the start tag
#[derive(Debug, Clone)]
pub struct AttributeField {
    name: &'static str,
    value: Option<String>,
}

impl AttributeField {
    /// Declares an attribute slot for `name`.
    #[must_use = "attribute slots must be passed to read_element"]
    pub fn new(name: &'static str) -> Self {
        Self { name, value: None }
    }

    /// Returns the attribute value, or `None` if it was absent.
    pub fn take(&mut self) -> Option<String> {
        self.value.take()
    }

    /// Returns the attribute value, failing if it was absent.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::MissingAttribute`] naming `tag` and the
    /// attribute.
    pub fn require(mut self, tag: &str) -> Result<String> {
        self.value.take().ok_or_else(|| BindError::MissingAttribute {
            tag: tag.to_string(),
            attribute: self.name.to_string(),
        })
    }
}

impl AttributeSlot for AttributeField {
    fn name(&self) -> &str {
        self.name
    }

    fn fill(&mut self, _owner: &str, raw: &str) -> Result<()> {
        self.value = Some(raw.to_string());
        Ok(())
    }
}

/// An attribute converted into a domain type at read time
pub struct ConvertedAttribute<V> {
    name: &'static str,
    parse: ParseFn<V>,
    value: Option<V>,
}

impl<V> ConvertedAttribute<V> {
    /// Declares a converted attribute with an explicit parse function.
    #[must_use = "attribute slots must be passed to read_element"]
    pub fn with_parser(name: &'static str, parse: ParseFn<V>) -> Self {
        Self {
            name,
            parse,
            value: None,
        }
    }

    /// Returns the converted value, or `None` if the attribute was absent.
    pub fn take(&mut self) -> Option<V> {
        self.value.take()
    }

    /// Returns the converted value, failing if the attribute was absent.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::MissingAttribute`] naming `tag` and the
    /// attribute.
    pub fn require(mut self, tag: &str) -> Result<V> {
        self.value.take().ok_or_else(|| BindError::MissingAttribute {
            tag: tag.to_string(),
            attribute: self.name.to_string(),
        })
    }
}

impl<V> ConvertedAttribute<V>
where
    V: FromStr,
    V::Err: std::fmt::Display,
{
    /// Declares a converted attribute parsed through the type's `FromStr`.
    #[must_use = "attribute slots must be passed to read_element"]
    pub fn new(name: &'static str) -> Self {
        Self::with_parser(name, |s| V::from_str(s).map_err(|e| e.to_string()))
    }
}

impl<V> AttributeSlot for ConvertedAttribute<V> {
    fn name(&self) -> &str {
        self.name
    }

    fn fill(&mut self, owner: &str, raw: &str) -> Result<()> {
        let value = (self.parse)(raw).map_err(|reason| BindError::Validation {
            tag: format!("{owner} {}", self.name),
            text: raw.to_string(),
            reason,
        })?;
        self.value = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Item, Note};
    use crate::token::XmlTokenReader;

    fn read_item(xml: &str) -> Result<Item> {
        let mut source = XmlTokenReader::from_str(xml);
        Item::read_as("item", &mut source)
    }

    #[test]
    fn test_all_fields_present() {
        let item = read_item(
            "<item id=\"7\"><name>alpha</name><count>42</count>\
             <note>first</note><note>second</note><detail><kind>x</kind></detail></item>",
        )
        .unwrap();

        assert_eq!(item.id, Some("7".to_string()));
        assert_eq!(item.name, Some("alpha".to_string()));
        assert_eq!(item.count, Some(42));
        assert_eq!(item.notes, vec![Note::of("first"), Note::of("second")]);
        assert_eq!(item.detail.unwrap().kind, Some("x".to_string()));
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let item = read_item("<item></item>").unwrap();
        assert_eq!(item.id, None);
        assert_eq!(item.name, None);
        assert_eq!(item.count, None);
        assert!(item.notes.is_empty());
        assert!(item.detail.is_none());
    }

    #[test]
    fn test_empty_scalar_is_present_empty_string() {
        let item = read_item("<item><name></name></item>").unwrap();
        assert_eq!(item.name, Some(String::new()));
    }

    #[test]
    fn test_list_preserves_document_order() {
        let item = read_item(
            "<item><note>a</note><name>n</name><note>b</note><note>c</note></item>",
        )
        .unwrap();
        let texts: Vec<_> = item.notes.iter().map(|n| n.text.clone()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unrecognized_children_skipped() {
        let item = read_item(
            "<item><mystery attr=\"1\"><inner>deep</inner></mystery><name>kept</name></item>",
        )
        .unwrap();
        assert_eq!(item.name, Some("kept".to_string()));
    }

    #[test]
    fn test_invalid_converted_scalar_fails() {
        let err = read_item("<item><count>-3</count></item>").unwrap_err();
        match err {
            BindError::Validation { tag, text, .. } => {
                assert_eq!(tag, "count");
                assert_eq!(text, "-3");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_start_tag_fails() {
        let err = read_item("<other></other>").unwrap_err();
        match err {
            BindError::UnexpectedElement { expected, found } => {
                assert_eq!(expected, "item");
                assert_eq!(found, "other");
            }
            other => panic!("expected structural error, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_document_fails() {
        let err = read_item("<item><name>x</name>").unwrap_err();
        assert!(matches!(err, BindError::UnexpectedEof { .. } | BindError::Source(_)));
    }

    #[test]
    fn test_duplicate_scalar_first_wins_rest_skipped() {
        let item = read_item("<item><name>first</name><name>second</name></item>").unwrap();
        assert_eq!(item.name, Some("first".to_string()));
    }

    #[test]
    fn test_scalar_with_inner_markup_keeps_text() {
        let item = read_item("<item><name>a<b>ignored</b>z</name></item>").unwrap();
        assert_eq!(item.name, Some("az".to_string()));
    }

    #[test]
    fn test_required_attribute_missing() {
        let mut source = XmlTokenReader::from_str("<item></item>");
        let mut id = AttributeField::new("id");
        read_element(&mut source, "item", &mut [&mut id], &mut []).unwrap();
        let err = id.require("item").unwrap_err();
        assert!(matches!(err, BindError::MissingAttribute { .. }));
    }

    #[test]
    fn test_converted_attribute() {
        let mut source = XmlTokenReader::from_str("<item id=\"19\"></item>");
        let mut id = ConvertedAttribute::<u32>::new("id");
        read_element(&mut source, "item", &mut [&mut id], &mut []).unwrap();
        assert_eq!(id.require("item").unwrap(), 19);
    }

    #[test]
    fn test_converted_attribute_invalid_fails() {
        let mut source = XmlTokenReader::from_str("<item id=\"x\"></item>");
        let mut id = ConvertedAttribute::<u32>::new("id");
        let err = read_element(&mut source, "item", &mut [&mut id], &mut []).unwrap_err();
        assert!(matches!(err, BindError::Validation { .. }));
    }

    #[test]
    fn test_skip_element_balances_same_named_nesting() {
        let item = read_item(
            "<item><mystery><mystery>deep</mystery></mystery><name>kept</name></item>",
        )
        .unwrap();
        assert_eq!(item.name, Some("kept".to_string()));
    }
}
