//! A continuous span of track points

use crate::sequence;
use crate::waypoint::Waypoint;
use serde::{Deserialize, Serialize};
use waymark_xml::{
    emit_list, read_element, write_element, ListField, Result, TokenSink, TokenSource, XmlElement,
};

/// A list of track points which are logically connected in order
///
/// To represent a single GPS track where reception was lost, or the
/// receiver was turned off, start a new segment for each continuous span
/// of track data.
#[derive(Debug, Clone, Default, PartialEq, Hash, Serialize, Deserialize)]
pub struct TrackSegment {
    points: Vec<Waypoint>,
}

impl TrackSegment {
    /// Canonical element name.
    pub const TAG: &'static str = "trkseg";

    /// Element name of the contained points.
    pub const POINT_TAG: &'static str = "trkpt";

    /// Creates a segment from a point sequence.
    #[must_use = "creates a value that should be used"]
    pub fn of(points: Vec<Waypoint>) -> Self {
        Self { points }
    }

    /// Returns a builder for the point sequence.
    #[must_use = "returns a builder that must be completed with build()"]
    pub fn builder() -> TrackSegmentBuilder {
        TrackSegmentBuilder::default()
    }

    /// Returns the points of this segment.
    pub fn points(&self) -> &[Waypoint] {
        &self.points
    }

    /// Returns the number of points in this segment.
    #[must_use = "returns the point count"]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether this segment has no points.
    #[must_use = "returns whether the segment is empty"]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns an iterator over the points of this segment.
    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a TrackSegment {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl XmlElement for TrackSegment {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
        let mut points = ListField::<Waypoint>::new(Self::POINT_TAG);
        read_element(source, tag, &mut [], &mut [&mut points])?;
        Ok(Self {
            points: points.take(),
        })
    }

    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()> {
        write_element(sink, tag, &[], |sink| {
            emit_list(sink, Self::POINT_TAG, &self.points)
        })
    }
}

/// Staging area for [`TrackSegment`] construction
#[derive(Debug, Clone, Default)]
pub struct TrackSegmentBuilder {
    points: Option<Vec<Waypoint>>,
}

impl TrackSegmentBuilder {
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

    /// Builds the immutable segment.
    #[must_use = "builds the immutable segment"]
    pub fn build(self) -> TrackSegment {
        TrackSegment {
            points: sequence::freeze(self.points),
        }
    }
}
