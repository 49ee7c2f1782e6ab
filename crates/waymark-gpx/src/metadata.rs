//! Document-level metadata

use crate::bounds::Bounds;
use crate::link::Link;
use crate::person::Person;
use crate::sequence;
use crate::types::{format_time, parse_time};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use waymark_xml::{
    emit_list, emit_nested, emit_scalar, read_element, write_element, ConvertedField, ListField,
    NestedField, Result, ScalarField, TokenSink, TokenSource, XmlElement,
};

/// Information about a document as a whole, distinct from its content
#[derive(Debug, Clone, Default, PartialEq, Hash, Serialize, Deserialize)]
pub struct Metadata {
    name: Option<String>,
    description: Option<String>,
    author: Option<Person>,
    links: Vec<Link>,
    time: Option<DateTime<Utc>>,
    keywords: Option<String>,
    bounds: Option<Bounds>,
}

impl Metadata {
    /// Canonical element name.
    pub const TAG: &'static str = "metadata";

    /// Returns a builder for all fields.
    #[must_use = "returns a builder that must be completed with build()"]
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder::default()
    }

    /// Returns the document name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the document description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the document author, if any.
    pub fn author(&self) -> Option<&Person> {
        self.author.as_ref()
    }

    /// Returns the document-level links.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the creation time of the document, if any.
    pub const fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    /// Returns the search keywords, if any.
    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref()
    }

    /// Returns the geographic extent of the content, if any.
    pub const fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

impl XmlElement for Metadata {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
        let mut name = ScalarField::new("name");
        let mut description = ScalarField::new("desc");
        let mut author = NestedField::<Person>::new(Person::TAG);
        let mut links = ListField::<Link>::new(Link::TAG);
        let mut time = ConvertedField::with_parser("time", parse_time);
        let mut keywords = ScalarField::new("keywords");
        let mut bounds = NestedField::<Bounds>::new(Bounds::TAG);

        read_element(
            source,
            tag,
            &mut [],
            &mut [
                &mut name,
                &mut description,
                &mut author,
                &mut links,
                &mut time,
                &mut keywords,
                &mut bounds,
            ],
        )?;

        Ok(Self {
            name: name.take(),
            description: description.take(),
            author: author.take(),
            links: links.take(),
            time: time.take(),
            keywords: keywords.take(),
            bounds: bounds.take(),
        })
    }

    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()> {
        write_element(sink, tag, &[], |sink| {
            emit_scalar(sink, "name", self.name.as_deref())?;
            emit_scalar(sink, "desc", self.description.as_deref())?;
            emit_nested(sink, Person::TAG, self.author.as_ref())?;
            emit_list(sink, Link::TAG, &self.links)?;
            emit_scalar(
                sink,
                "time",
                self.time.as_ref().map(format_time).as_deref(),
            )?;
            emit_scalar(sink, "keywords", self.keywords.as_deref())?;
            emit_nested(sink, Bounds::TAG, self.bounds.as_ref())
        })
    }
}

/// Staging area for [`Metadata`] construction
#[derive(Debug, Clone, Default)]
pub struct MetadataBuilder {
    name: Option<String>,
    description: Option<String>,
    author: Option<Person>,
    links: Option<Vec<Link>>,
    time: Option<DateTime<Utc>>,
    keywords: Option<String>,
    bounds: Option<Bounds>,
}

impl MetadataBuilder {
    /// Sets the document name.
    #[must_use = "builder setters return the builder"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the document description.
    #[must_use = "builder setters return the builder"]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the document author.
    #[must_use = "builder setters return the builder"]
    pub fn author(mut self, author: Person) -> Self {
        self.author = Some(author);
        self
    }

    /// Replaces the whole link sequence.
    #[must_use = "builder setters return the builder"]
    pub fn links(mut self, links: Vec<Link>) -> Self {
        self.links = Some(links);
        self
    }

    /// Appends one link, allocating backing storage on first use.
    #[must_use = "builder setters return the builder"]
    pub fn add_link(mut self, link: Link) -> Self {
        self.links.get_or_insert_with(Vec::new).push(link);
        self
    }

    /// Sets the creation time of the document.
    #[must_use = "builder setters return the builder"]
    pub fn time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Sets the search keywords.
    #[must_use = "builder setters return the builder"]
    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Sets the geographic extent of the content.
    #[must_use = "builder setters return the builder"]
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Builds the immutable metadata.
    #[must_use = "builds the immutable metadata"]
    pub fn build(self) -> Metadata {
        Metadata {
            name: self.name,
            description: self.description,
            author: self.author,
            links: sequence::freeze(self.links),
            time: self.time,
            keywords: self.keywords,
            bounds: self.bounds,
        }
    }
}
