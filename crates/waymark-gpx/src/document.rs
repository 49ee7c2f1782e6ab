//! The document root and file-level framing

use crate::error::Result;
use crate::metadata::Metadata;
use crate::route::Route;
use crate::sequence;
use crate::track::Track;
use crate::waypoint::Waypoint;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use waymark_xml::{
    emit_list, emit_nested, read_element, write_element, AttributeField, ListField, NestedField,
    TokenSink, TokenSource, XmlElement, XmlTokenReader, XmlTokenWriter,
};

/// The default namespace written on the root element.
pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";

/// The schema version written when none is given.
pub const DEFAULT_VERSION: &str = "1.1";

/// The creator written when none is given.
pub const DEFAULT_CREATOR: &str = "waymark_rs - https://github.com/waymark-rs/waymark_rs";

/// A whole GPX document: metadata plus waypoints, routes and tracks
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct Gpx {
    version: String,
    creator: String,
    metadata: Option<Metadata>,
    waypoints: Vec<Waypoint>,
    routes: Vec<Route>,
    tracks: Vec<Track>,
}

impl Gpx {
    /// Canonical element name.
    pub const TAG: &'static str = "gpx";

    /// Returns a builder for all fields.
    #[must_use = "returns a builder that must be completed with build()"]
    pub fn builder() -> GpxBuilder {
        GpxBuilder::default()
    }

    /// Returns the schema version of the document.
    #[must_use = "returns the schema version"]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the name of the application that created the document.
    #[must_use = "returns the creator"]
    pub fn creator(&self) -> &str {
        &self.creator
    }

    /// Returns the document metadata, if any.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Returns the document-level waypoints.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Returns the routes of the document.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the tracks of the document.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Reads a document from a buffered byte source.
    ///
    /// # Errors
    ///
    /// Returns a binding error if the stream is not a well-formed GPX
    /// document. `version` and `creator` are required on the root element.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let mut source = XmlTokenReader::new(reader);
        Ok(Self::read_as(Self::TAG, &mut source)?)
    }

    /// Parses a document held in memory.
    ///
    /// # Errors
    ///
    /// See [`read_from`](Self::read_from).
    pub fn read_from_str(content: &str) -> Result<Self> {
        let mut source = XmlTokenReader::from_str(content);
        Ok(Self::read_as(Self::TAG, &mut source)?)
    }

    /// Reads a document from a file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be opened, or a binding
    /// error if its content is not a well-formed GPX document.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Writes the document, with XML prolog, to a byte sink.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        self.write_with(XmlTokenWriter::new(writer))
    }

    /// Like [`write_to`](Self::write_to), with indented output.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn write_pretty_to<W: Write>(&self, writer: W) -> Result<()> {
        self.write_with(XmlTokenWriter::with_indent(writer))
    }

    /// Writes the document to a file, indented.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be created, and propagates
    /// sink failures.
    pub fn to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_pretty_to(BufWriter::new(file))
    }

    fn write_with<W: Write>(&self, mut sink: XmlTokenWriter<W>) -> Result<()> {
        sink.write_declaration()?;
        self.write_as(Self::TAG, &mut sink)?;
        sink.flush()?;
        Ok(())
    }
}

impl Default for Gpx {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl XmlElement for Gpx {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> waymark_xml::Result<Self> {
        let mut version = AttributeField::new("version");
        let mut creator = AttributeField::new("creator");
        let mut metadata = NestedField::<Metadata>::new(Metadata::TAG);
        let mut waypoints = ListField::<Waypoint>::new(Waypoint::TAG);
        let mut routes = ListField::<Route>::new(Route::TAG);
        let mut tracks = ListField::<Track>::new(Track::TAG);

        read_element(
            source,
            tag,
            &mut [&mut version, &mut creator],
            &mut [&mut metadata, &mut waypoints, &mut routes, &mut tracks],
        )?;

        Ok(Self {
            version: version.require(tag)?,
            creator: creator.require(tag)?,
            metadata: metadata.take(),
            waypoints: waypoints.take(),
            routes: routes.take(),
            tracks: tracks.take(),
        })
    }

    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> waymark_xml::Result<()> {
        write_element(
            sink,
            tag,
            &[
                ("version", self.version.clone()),
                ("creator", self.creator.clone()),
                ("xmlns", GPX_NAMESPACE.to_string()),
            ],
            |sink| {
                emit_nested(sink, Metadata::TAG, self.metadata.as_ref())?;
                emit_list(sink, Waypoint::TAG, &self.waypoints)?;
                emit_list(sink, Route::TAG, &self.routes)?;
                emit_list(sink, Track::TAG, &self.tracks)
            },
        )
    }
}

/// Staging area for [`Gpx`] construction
#[derive(Debug, Clone, Default)]
pub struct GpxBuilder {
    version: Option<String>,
    creator: Option<String>,
    metadata: Option<Metadata>,
    waypoints: Option<Vec<Waypoint>>,
    routes: Option<Vec<Route>>,
    tracks: Option<Vec<Track>>,
}

impl GpxBuilder {
    /// Sets the schema version; defaults to [`DEFAULT_VERSION`].
    #[must_use = "builder setters return the builder"]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the creator; defaults to [`DEFAULT_CREATOR`].
    #[must_use = "builder setters return the builder"]
    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Sets the document metadata.
    #[must_use = "builder setters return the builder"]
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Replaces the whole waypoint sequence.
    #[must_use = "builder setters return the builder"]
    pub fn waypoints(mut self, waypoints: Vec<Waypoint>) -> Self {
        self.waypoints = Some(waypoints);
        self
    }

    /// Appends one waypoint, allocating backing storage on first use.
    #[must_use = "builder setters return the builder"]
    pub fn add_waypoint(mut self, waypoint: Waypoint) -> Self {
        self.waypoints.get_or_insert_with(Vec::new).push(waypoint);
        self
    }

    /// Replaces the whole route sequence.
    #[must_use = "builder setters return the builder"]
    pub fn routes(mut self, routes: Vec<Route>) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Appends one route, allocating backing storage on first use.
    #[must_use = "builder setters return the builder"]
    pub fn add_route(mut self, route: Route) -> Self {
        self.routes.get_or_insert_with(Vec::new).push(route);
        self
    }

    /// Replaces the whole track sequence.
    #[must_use = "builder setters return the builder"]
    pub fn tracks(mut self, tracks: Vec<Track>) -> Self {
        self.tracks = Some(tracks);
        self
    }

    /// Appends one track, allocating backing storage on first use.
    #[must_use = "builder setters return the builder"]
    pub fn add_track(mut self, track: Track) -> Self {
        self.tracks.get_or_insert_with(Vec::new).push(track);
        self
    }

    /// Builds the immutable document.
    #[must_use = "builds the immutable document"]
    pub fn build(self) -> Gpx {
        Gpx {
            version: self.version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            creator: self.creator.unwrap_or_else(|| DEFAULT_CREATOR.to_string()),
            metadata: self.metadata,
            waypoints: sequence::freeze(self.waypoints),
            routes: sequence::freeze(self.routes),
            tracks: sequence::freeze(self.tracks),
        }
    }
}
