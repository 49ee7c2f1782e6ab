//! Link to external information about an entity

use serde::{Deserialize, Serialize};
use waymark_xml::{
    emit_scalar, read_element, write_element, AttributeField, Result, ScalarField, TokenSink,
    TokenSource, XmlElement,
};

/// A link to an external resource with optional display text and MIME type
///
/// The URL is carried as the `href` attribute and is the only required
/// field; `text` and `type` are optional child elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    href: String,
    text: Option<String>,
    kind: Option<String>,
}

impl Link {
    /// Canonical element name.
    pub const TAG: &'static str = "link";

    /// Creates a link with only the required URL.
    #[must_use = "creates a value that should be used"]
    pub fn of(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: None,
            kind: None,
        }
    }

    /// Returns a builder for the optional fields.
    #[must_use = "returns a builder that must be completed with build()"]
    pub fn builder() -> LinkBuilder {
        LinkBuilder::default()
    }

    /// Returns the URL of the link.
    #[must_use = "returns the link URL"]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Returns the display text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the MIME type of the target, if any.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

impl XmlElement for Link {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
        let mut href = AttributeField::new("href");
        let mut text = ScalarField::new("text");
        let mut kind = ScalarField::new("type");

        read_element(source, tag, &mut [&mut href], &mut [&mut text, &mut kind])?;

        Ok(Self {
            href: href.require(tag)?,
            text: text.take(),
            kind: kind.take(),
        })
    }

    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()> {
        write_element(sink, tag, &[("href", self.href.clone())], |sink| {
            emit_scalar(sink, "text", self.text.as_deref())?;
            emit_scalar(sink, "type", self.kind.as_deref())
        })
    }
}

/// Staging area for [`Link`] construction
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    text: Option<String>,
    kind: Option<String>,
}

impl LinkBuilder {
    /// Sets the display text.
    #[must_use = "builder setters return the builder"]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the MIME type of the target.
    #[must_use = "builder setters return the builder"]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Builds the link around the required URL.
    #[must_use = "builds the immutable link"]
    pub fn build(self, href: impl Into<String>) -> Link {
        Link {
            href: href.into(),
            text: self.text,
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_xml::{BindError, XmlTokenReader, XmlTokenWriter};

    fn read_link(xml: &str) -> Result<Link> {
        let mut source = XmlTokenReader::from_str(xml);
        Link::read_as(Link::TAG, &mut source)
    }

    fn write_link(link: &Link) -> String {
        let mut sink = XmlTokenWriter::new(Vec::new());
        link.write_as(Link::TAG, &mut sink).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_builder() {
        let link = Link::builder()
            .text("trail map")
            .kind("text/html")
            .build("http://example.com/map");

        assert_eq!(link.href(), "http://example.com/map");
        assert_eq!(link.text(), Some("trail map"));
        assert_eq!(link.kind(), Some("text/html"));
    }

    #[test]
    fn test_read_full_link() {
        let link = read_link(
            "<link href=\"http://example.com\"><text>site</text><type>text/html</type></link>",
        )
        .unwrap();
        assert_eq!(link.href(), "http://example.com");
        assert_eq!(link.text(), Some("site"));
        assert_eq!(link.kind(), Some("text/html"));
    }

    #[test]
    fn test_read_bare_link() {
        let link = read_link("<link href=\"http://example.com\"/>").unwrap();
        assert_eq!(link.href(), "http://example.com");
        assert_eq!(link.text(), None);
        assert_eq!(link.kind(), None);
    }

    #[test]
    fn test_missing_href_fails() {
        let err = read_link("<link><text>site</text></link>").unwrap_err();
        assert!(matches!(err, BindError::MissingAttribute { .. }));
    }

    #[test]
    fn test_write_minimal_link() {
        let link = Link::of("http://example.com");
        assert_eq!(write_link(&link), r#"<link href="http://example.com"></link>"#);
    }

    #[test]
    fn test_round_trip() {
        let link = Link::builder().text("a & b").build("http://example.com?q=1&r=2");
        let back = read_link(&write_link(&link)).unwrap();
        assert_eq!(back, link);
    }
}
