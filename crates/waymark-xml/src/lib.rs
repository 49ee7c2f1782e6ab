//! # waymark-xml
//!
//! Declarative XML element binding engine for waymark_rs.
//!
//! Each bound entity type declares, once, how its fields map to XML child
//! elements and attributes; this crate drives recursive-descent parsing of
//! a streaming XML source into immutable entity values and recursive
//! emission of those values back to a streaming XML sink. The declarations
//! are symmetric: the same field order that drives matching on the way in
//! fixes element order on the way out, so `read(write(e))` reproduces `e`.
//!
//! ## Binding an entity
//!
//! ```rust
//! use waymark_xml::{
//!     emit_display, emit_scalar, read_element, write_element, ConvertedField, Result,
//!     ScalarField, TokenSink, TokenSource, XmlElement, XmlTokenReader,
//! };
//!
//! #[derive(Debug, PartialEq)]
//! struct Station {
//!     name: Option<String>,
//!     platforms: Option<u32>,
//! }
//!
//! impl XmlElement for Station {
//!     fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
//!         let mut name = ScalarField::new("name");
//!         let mut platforms = ConvertedField::<u32>::new("platforms");
//!         read_element(source, tag, &mut [], &mut [&mut name, &mut platforms])?;
//!         Ok(Self {
//!             name: name.take(),
//!             platforms: platforms.take(),
//!         })
//!     }
//!
//!     fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()> {
//!         write_element(sink, tag, &[], |sink| {
//!             emit_scalar(sink, "name", self.name.as_deref())?;
//!             emit_display(sink, "platforms", self.platforms.as_ref())
//!         })
//!     }
//! }
//!
//! let mut source = XmlTokenReader::from_str("<station><name>Ostkreuz</name></station>");
//! let station = Station::read_as("station", &mut source)?;
//! assert_eq!(station.name.as_deref(), Some("Ostkreuz"));
//! assert_eq!(station.platforms, None);
//! # Ok::<(), waymark_xml::BindError>(())
//! ```
//!
//! ## Field specifications
//!
//! | Specification | Claims | Yields |
//! |---|---|---|
//! | [`ScalarField`] | at most one `<tag>` child | `Option<String>` |
//! | [`ConvertedField`] | at most one `<tag>` child | `Option<V>`, validated |
//! | [`ListField`] | every `<tag>` child, in order | `Vec<T>` |
//! | [`NestedField`] | at most one `<tag>` sub-entity | `Option<T>` |
//! | [`AttributeField`] | one start-tag attribute | `Option<String>` |
//! | [`ConvertedAttribute`] | one start-tag attribute | `Option<V>`, validated |
//!
//! Children that no specification claims are skipped whole — unknown
//! elements are forward compatibility, not errors. Everything else fails
//! fast: a malformed scalar or a structural mismatch aborts the read with
//! no partial value.
//!
//! ## Error handling
//!
//! One [`BindError`] enum covers the taxonomy: structural mismatches,
//! validation failures (carrying the offending tag and raw text), and
//! source/sink I/O failures propagated unmodified from quick-xml.

pub mod element;
pub mod error;
pub mod reader;
pub mod token;
pub mod writer;

#[cfg(test)]
mod testutil;

pub use element::XmlElement;
pub use error::{BindError, Result};
pub use reader::{
    read_element, skip_element, AttributeField, AttributeSlot, ChildField, ConvertedAttribute,
    ConvertedField, ListField, NestedField, ScalarField,
};
pub use token::{TokenSink, TokenSource, XmlToken, XmlTokenReader, XmlTokenWriter};
pub use writer::{emit_display, emit_list, emit_nested, emit_scalar, write_element};
