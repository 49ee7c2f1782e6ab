//! A route: an ordered list of waypoints leading to a destination

use crate::link::Link;
use crate::sequence;
use crate::types::UInt;
use crate::waypoint::Waypoint;
use serde::{Deserialize, Serialize};
use waymark_xml::{
    emit_display, emit_list, emit_scalar, read_element, write_element, ConvertedField, ListField,
    Result, ScalarField, TokenSink, TokenSource, XmlElement,
};

/// A planned route, holding its points and descriptive metadata
///
/// Structurally a sibling of [`Track`](crate::track::Track): the same
/// descriptive fields, but with a flat point list instead of segments.
#[derive(Debug, Clone, Default, PartialEq, Hash, Serialize, Deserialize)]
pub struct Route {
    name: Option<String>,
    comment: Option<String>,
    description: Option<String>,
    source: Option<String>,
    links: Vec<Link>,
    number: Option<UInt>,
    kind: Option<String>,
    points: Vec<Waypoint>,
}

impl Route {
    /// Canonical element name.
    pub const TAG: &'static str = "rte";

    /// Element name of the contained points.
    pub const POINT_TAG: &'static str = "rtept";

    /// Returns a builder for all fields.
    #[must_use = "returns a builder that must be completed with build()"]
    pub fn builder() -> RouteBuilder {
        RouteBuilder::default()
    }

    /// Returns the GPS name of the route, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the GPS comment of the route, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the user description of the route, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the source of the data, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the links to external information about the route.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the GPS route number, if any.
    pub const fn number(&self) -> Option<UInt> {
        self.number
    }

    /// Returns the classification of the route, if any.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Returns the points of this route.
    pub fn points(&self) -> &[Waypoint] {
        &self.points
    }

    /// Returns an iterator over the points of this route.
    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl XmlElement for Route {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
        let mut name = ScalarField::new("name");
        let mut comment = ScalarField::new("cmt");
        let mut description = ScalarField::new("desc");
        let mut data_source = ScalarField::new("src");
        let mut links = ListField::<Link>::new(Link::TAG);
        let mut number = ConvertedField::<UInt>::new("number");
        let mut kind = ScalarField::new("type");
        let mut points = ListField::<Waypoint>::new(Self::POINT_TAG);

        read_element(
            source,
            tag,
            &mut [],
            &mut [
                &mut name,
                &mut comment,
                &mut description,
                &mut data_source,
                &mut links,
                &mut number,
                &mut kind,
                &mut points,
            ],
        )?;

        Ok(Self {
            name: name.take(),
            comment: comment.take(),
            description: description.take(),
            source: data_source.take(),
            links: links.take(),
            number: number.take(),
            kind: kind.take(),
            points: points.take(),
        })
    }

    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()> {
        write_element(sink, tag, &[], |sink| {
            emit_scalar(sink, "name", self.name.as_deref())?;
            emit_scalar(sink, "cmt", self.comment.as_deref())?;
            emit_scalar(sink, "desc", self.description.as_deref())?;
            emit_scalar(sink, "src", self.source.as_deref())?;
            emit_list(sink, Link::TAG, &self.links)?;
            emit_display(sink, "number", self.number.as_ref())?;
            emit_scalar(sink, "type", self.kind.as_deref())?;
            emit_list(sink, Self::POINT_TAG, &self.points)
        })
    }
}

/// Staging area for [`Route`] construction
#[derive(Debug, Clone, Default)]
pub struct RouteBuilder {
    name: Option<String>,
    comment: Option<String>,
    description: Option<String>,
    source: Option<String>,
    links: Option<Vec<Link>>,
    number: Option<UInt>,
    kind: Option<String>,
    points: Option<Vec<Waypoint>>,
}

impl RouteBuilder {
    /// Sets the GPS name of the route.
    #[must_use = "builder setters return the builder"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the GPS comment of the route.
    #[must_use = "builder setters return the builder"]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the user description of the route.
    #[must_use = "builder setters return the builder"]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the source of the data.
    #[must_use = "builder setters return the builder"]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
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

    /// Sets the GPS route number.
    #[must_use = "builder setters return the builder"]
    pub fn number(mut self, number: impl Into<UInt>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Sets the classification of the route.
    #[must_use = "builder setters return the builder"]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Replaces the whole point sequence.
    #[must_use = "builder setters return the builder"]
    pub fn points(mut self, points: Vec<Waypoint>) -> Self {
        self.points = Some(points);
        self
    }

    /// Appends one point, allocating backing storage on first use.
    #[must_use = "builder setters return the builder"]
    pub fn add_point(mut self, point: Waypoint) -> Self {
        self.points.get_or_insert_with(Vec::new).push(point);
        self
    }

    /// Builds the immutable route.
    #[must_use = "builds the immutable route"]
    pub fn build(self) -> Route {
        Route {
            name: self.name,
            comment: self.comment,
            description: self.description,
            source: self.source,
            links: sequence::freeze(self.links),
            number: self.number,
            kind: self.kind,
            points: sequence::freeze(self.points),
        }
    }
}
