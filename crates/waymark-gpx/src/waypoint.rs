//! A single geographic point with optional per-point metadata

use crate::link::Link;
use crate::sequence;
use crate::types::{format_time, hash_f64, parse_decimal, parse_time, Latitude, Longitude};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use waymark_xml::{
    emit_display, emit_list, emit_scalar, read_element, write_element, ConvertedAttribute,
    ConvertedField, ListField, Result, ScalarField, TokenSink, TokenSource, XmlElement,
};

/// One point: a required coordinate pair plus optional metadata
///
/// The same shape serves three element names: `wpt` at document level,
/// `trkpt` inside a track segment and `rtept` inside a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    latitude: Latitude,
    longitude: Longitude,
    elevation: Option<f64>,
    time: Option<DateTime<Utc>>,
    name: Option<String>,
    comment: Option<String>,
    description: Option<String>,
    source: Option<String>,
    links: Vec<Link>,
    symbol: Option<String>,
    kind: Option<String>,
}

impl Waypoint {
    /// Element name at document level.
    pub const TAG: &'static str = "wpt";

    /// Creates a waypoint with only the required coordinates.
    #[must_use = "creates a value that should be used"]
    pub fn of(latitude: Latitude, longitude: Longitude) -> Self {
        Self::builder().build(latitude, longitude)
    }

    /// Returns a builder for the optional fields.
    #[must_use = "returns a builder that must be completed with build()"]
    pub fn builder() -> WaypointBuilder {
        WaypointBuilder::default()
    }

    /// Returns the latitude of the point.
    #[must_use = "returns the latitude"]
    pub const fn latitude(&self) -> Latitude {
        self.latitude
    }

    /// Returns the longitude of the point.
    #[must_use = "returns the longitude"]
    pub const fn longitude(&self) -> Longitude {
        self.longitude
    }

    /// Returns the elevation in meters, if any.
    pub const fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    /// Returns the UTC timestamp of the fix, if any.
    pub const fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    /// Returns the GPS name of the point, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the GPS comment, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the user description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the source of the data, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the links to external information about the point.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the GPS symbol name, if any.
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Returns the classification of the point, if any.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

impl Hash for Waypoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.hash(state);
        self.longitude.hash(state);
        match self.elevation {
            Some(elevation) => {
                state.write_u8(1);
                hash_f64(elevation, state);
            }
            None => state.write_u8(0),
        }
        self.time.hash(state);
        self.name.hash(state);
        self.comment.hash(state);
        self.description.hash(state);
        self.source.hash(state);
        self.links.hash(state);
        self.symbol.hash(state);
        self.kind.hash(state);
    }
}

impl XmlElement for Waypoint {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
        let mut lat = ConvertedAttribute::<Latitude>::new("lat");
        let mut lon = ConvertedAttribute::<Longitude>::new("lon");
        let mut elevation = ConvertedField::with_parser("ele", parse_decimal);
        let mut time = ConvertedField::with_parser("time", parse_time);
        let mut name = ScalarField::new("name");
        let mut comment = ScalarField::new("cmt");
        let mut description = ScalarField::new("desc");
        let mut data_source = ScalarField::new("src");
        let mut links = ListField::<Link>::new(Link::TAG);
        let mut symbol = ScalarField::new("sym");
        let mut kind = ScalarField::new("type");

        read_element(
            source,
            tag,
            &mut [&mut lat, &mut lon],
            &mut [
                &mut elevation,
                &mut time,
                &mut name,
                &mut comment,
                &mut description,
                &mut data_source,
                &mut links,
                &mut symbol,
                &mut kind,
            ],
        )?;

        Ok(Self {
            latitude: lat.require(tag)?,
            longitude: lon.require(tag)?,
            elevation: elevation.take(),
            time: time.take(),
            name: name.take(),
            comment: comment.take(),
            description: description.take(),
            source: data_source.take(),
            links: links.take(),
            symbol: symbol.take(),
            kind: kind.take(),
        })
    }

    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()> {
        write_element(
            sink,
            tag,
            &[
                ("lat", self.latitude.to_string()),
                ("lon", self.longitude.to_string()),
            ],
            |sink| {
                emit_display(sink, "ele", self.elevation.as_ref())?;
                emit_scalar(
                    sink,
                    "time",
                    self.time.as_ref().map(format_time).as_deref(),
                )?;
                emit_scalar(sink, "name", self.name.as_deref())?;
                emit_scalar(sink, "cmt", self.comment.as_deref())?;
                emit_scalar(sink, "desc", self.description.as_deref())?;
                emit_scalar(sink, "src", self.source.as_deref())?;
                emit_list(sink, Link::TAG, &self.links)?;
                emit_scalar(sink, "sym", self.symbol.as_deref())?;
                emit_scalar(sink, "type", self.kind.as_deref())
            },
        )
    }
}

/// Staging area for [`Waypoint`] construction
///
/// The coordinates are parameters of [`build`](WaypointBuilder::build)
/// rather than setters, so a built waypoint can never lack them.
#[derive(Debug, Clone, Default)]
pub struct WaypointBuilder {
    elevation: Option<f64>,
    time: Option<DateTime<Utc>>,
    name: Option<String>,
    comment: Option<String>,
    description: Option<String>,
    source: Option<String>,
    links: Option<Vec<Link>>,
    symbol: Option<String>,
    kind: Option<String>,
}

impl WaypointBuilder {
    /// Sets the elevation in meters.
    #[must_use = "builder setters return the builder"]
    pub fn elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    /// Sets the UTC timestamp of the fix.
    #[must_use = "builder setters return the builder"]
    pub fn time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Sets the GPS name of the point.
    #[must_use = "builder setters return the builder"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the GPS comment.
    #[must_use = "builder setters return the builder"]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the user description.
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

    /// Sets the GPS symbol name.
    #[must_use = "builder setters return the builder"]
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Sets the classification of the point.
    #[must_use = "builder setters return the builder"]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Builds the immutable waypoint around the required coordinates.
    #[must_use = "builds the immutable waypoint"]
    pub fn build(self, latitude: Latitude, longitude: Longitude) -> Waypoint {
        Waypoint {
            latitude,
            longitude,
            elevation: self.elevation,
            time: self.time,
            name: self.name,
            comment: self.comment,
            description: self.description,
            source: self.source,
            links: sequence::freeze(self.links),
            symbol: self.symbol,
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use waymark_xml::{BindError, XmlTokenReader, XmlTokenWriter};

    fn coords() -> (Latitude, Longitude) {
        (
            Latitude::new(47.644_548).unwrap(),
            Longitude::new(-122.326_897).unwrap(),
        )
    }

    fn read_waypoint(xml: &str) -> Result<Waypoint> {
        let mut source = XmlTokenReader::from_str(xml);
        Waypoint::read_as(Waypoint::TAG, &mut source)
    }

    fn write_waypoint(waypoint: &Waypoint) -> String {
        let mut sink = XmlTokenWriter::new(Vec::new());
        waypoint.write_as(Waypoint::TAG, &mut sink).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    fn hash_of(waypoint: &Waypoint) -> u64 {
        let mut hasher = DefaultHasher::new();
        waypoint.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_builder_keeps_all_fields() {
        let (lat, lon) = coords();
        let waypoint = Waypoint::builder()
            .elevation(184.0)
            .name("Space Needle")
            .comment("landmark")
            .add_link(Link::of("http://example.com"))
            .symbol("Flag")
            .build(lat, lon);

        assert_eq!(waypoint.latitude(), lat);
        assert_eq!(waypoint.longitude(), lon);
        assert_eq!(waypoint.elevation(), Some(184.0));
        assert_eq!(waypoint.name(), Some("Space Needle"));
        assert_eq!(waypoint.comment(), Some("landmark"));
        assert_eq!(waypoint.links().len(), 1);
        assert_eq!(waypoint.symbol(), Some("Flag"));
        assert!(waypoint.kind().is_none());
    }

    #[test]
    fn test_read_with_coordinates_and_elevation() {
        let waypoint = read_waypoint(
            "<wpt lat=\"47.644548\" lon=\"-122.326897\">\
             <ele>184.0</ele><name>Space Needle</name></wpt>",
        )
        .unwrap();
        assert!((waypoint.latitude().degrees() - 47.644_548).abs() < 1e-9);
        assert_eq!(waypoint.elevation(), Some(184.0));
        assert_eq!(waypoint.name(), Some("Space Needle"));
    }

    #[test]
    fn test_missing_coordinate_fails() {
        let err = read_waypoint("<wpt lat=\"47.0\"><name>x</name></wpt>").unwrap_err();
        assert!(matches!(err, BindError::MissingAttribute { .. }));
    }

    #[test]
    fn test_out_of_range_latitude_fails() {
        let err = read_waypoint("<wpt lat=\"91.0\" lon=\"0.0\"/>").unwrap_err();
        assert!(matches!(err, BindError::Validation { .. }));
    }

    #[test]
    fn test_non_finite_elevation_fails() {
        let err =
            read_waypoint("<wpt lat=\"1.0\" lon=\"2.0\"><ele>NaN</ele></wpt>").unwrap_err();
        assert!(matches!(err, BindError::Validation { .. }));
    }

    #[test]
    fn test_time_round_trips() {
        let (lat, lon) = coords();
        let time = parse_time("2009-10-17T18:37:26Z").unwrap();
        let waypoint = Waypoint::builder().time(time).build(lat, lon);

        let back = read_waypoint(&write_waypoint(&waypoint)).unwrap();
        assert_eq!(back.time(), Some(time));
    }

    #[test]
    fn test_full_round_trip() {
        let (lat, lon) = coords();
        let waypoint = Waypoint::builder()
            .elevation(12.5)
            .time(parse_time("2024-03-01T06:30:00Z").unwrap())
            .name("start")
            .comment("cold morning")
            .description("trailhead parking")
            .source("gps")
            .add_link(Link::builder().text("photos").build("http://example.com/p"))
            .symbol("Trail Head")
            .kind("crossing")
            .build(lat, lon);

        let back = read_waypoint(&write_waypoint(&waypoint)).unwrap();
        assert_eq!(back, waypoint);
        assert_eq!(hash_of(&back), hash_of(&waypoint));
    }

    #[test]
    fn test_equal_waypoints_hash_equal() {
        let (lat, lon) = coords();
        let a = Waypoint::builder().elevation(5.0).build(lat, lon);
        let b = Waypoint::builder().elevation(5.0).build(lat, lon);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_mutating_source_vector_does_not_affect_entity() {
        let (lat, lon) = coords();
        let mut links = vec![Link::of("http://example.com/a")];
        let waypoint = Waypoint::builder().links(links.clone()).build(lat, lon);

        links.push(Link::of("http://example.com/b"));
        links[0] = Link::of("http://example.com/changed");

        assert_eq!(waypoint.links().len(), 1);
        assert_eq!(waypoint.links()[0].href(), "http://example.com/a");
    }
}
