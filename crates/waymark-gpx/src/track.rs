//! A track: an ordered list of points describing a path

use crate::link::Link;
use crate::segment::TrackSegment;
use crate::sequence;
use crate::types::UInt;
use serde::{Deserialize, Serialize};
use waymark_xml::{
    emit_display, emit_list, emit_scalar, read_element, write_element, ConvertedField, ListField,
    Result, ScalarField, TokenSink, TokenSource, XmlElement,
};

/// A recorded track, holding its segments and descriptive metadata
#[derive(Debug, Clone, Default, PartialEq, Hash, Serialize, Deserialize)]
pub struct Track {
    name: Option<String>,
    comment: Option<String>,
    description: Option<String>,
    source: Option<String>,
    links: Vec<Link>,
    number: Option<UInt>,
    kind: Option<String>,
    segments: Vec<TrackSegment>,
}

impl Track {
    /// Canonical element name.
    pub const TAG: &'static str = "trk";

    /// Creates a new track with the given parameters.
    #[allow(clippy::too_many_arguments)]
    #[must_use = "creates a value that should be used"]
    pub fn of(
        name: Option<String>,
        comment: Option<String>,
        description: Option<String>,
        source: Option<String>,
        links: Vec<Link>,
        number: Option<UInt>,
        kind: Option<String>,
        segments: Vec<TrackSegment>,
    ) -> Self {
        Self {
            name,
            comment,
            description,
            source,
            links,
            number,
            kind,
            segments,
        }
    }

    /// Returns a builder for all fields.
    #[must_use = "returns a builder that must be completed with build()"]
    pub fn builder() -> TrackBuilder {
        TrackBuilder::default()
    }

    /// Returns the GPS name of the track, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the GPS comment of the track, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the user description of the track, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the source of the data, if any. Included to give the user
    /// some idea of reliability and accuracy.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the links to external information about the track.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the GPS track number, if any.
    pub const fn number(&self) -> Option<UInt> {
        self.number
    }

    /// Returns the classification of the track, if any.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Returns the segments of this track.
    pub fn segments(&self) -> &[TrackSegment] {
        &self.segments
    }

    /// Returns an iterator over the segments of this track.
    pub fn iter(&self) -> std::slice::Iter<'_, TrackSegment> {
        self.segments.iter()
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a TrackSegment;
    type IntoIter = std::slice::Iter<'a, TrackSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl XmlElement for Track {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
        let mut name = ScalarField::new("name");
        let mut comment = ScalarField::new("cmt");
        let mut description = ScalarField::new("desc");
        let mut data_source = ScalarField::new("src");
        let mut links = ListField::<Link>::new(Link::TAG);
        let mut number = ConvertedField::<UInt>::new("number");
        let mut kind = ScalarField::new("type");
        let mut segments = ListField::<TrackSegment>::new(TrackSegment::TAG);

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
                &mut segments,
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
            segments: segments.take(),
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
            emit_list(sink, TrackSegment::TAG, &self.segments)
        })
    }
}

/// Staging area for [`Track`] construction
#[derive(Debug, Clone, Default)]
pub struct TrackBuilder {
    name: Option<String>,
    comment: Option<String>,
    description: Option<String>,
    source: Option<String>,
    links: Option<Vec<Link>>,
    number: Option<UInt>,
    kind: Option<String>,
    segments: Option<Vec<TrackSegment>>,
}

impl TrackBuilder {
    /// Sets the GPS name of the track.
    #[must_use = "builder setters return the builder"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the GPS comment of the track.
    #[must_use = "builder setters return the builder"]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the user description of the track.
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

    /// Sets the GPS track number.
    #[must_use = "builder setters return the builder"]
    pub fn number(mut self, number: impl Into<UInt>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Sets the classification of the track.
    #[must_use = "builder setters return the builder"]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Replaces the whole segment sequence.
    #[must_use = "builder setters return the builder"]
    pub fn segments(mut self, segments: Vec<TrackSegment>) -> Self {
        self.segments = Some(segments);
        self
    }

    /// Appends one segment, allocating backing storage on first use.
    #[must_use = "builder setters return the builder"]
    pub fn add_segment(mut self, segment: TrackSegment) -> Self {
        self.segments.get_or_insert_with(Vec::new).push(segment);
        self
    }

    /// Builds the immutable track.
    #[must_use = "builds the immutable track"]
    pub fn build(self) -> Track {
        Track {
            name: self.name,
            comment: self.comment,
            description: self.description,
            source: self.source,
            links: sequence::freeze(self.links),
            number: self.number,
            kind: self.kind,
            segments: sequence::freeze(self.segments),
        }
    }
}
