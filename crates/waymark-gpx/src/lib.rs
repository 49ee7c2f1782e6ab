//! # waymark-gpx
//!
//! GPX (GPS Exchange Format) document model for waymark_rs.
//!
//! The model is a graph of immutable entities — [`Gpx`] at the root, then
//! [`Metadata`], [`Waypoint`], [`Route`], [`Track`] and [`TrackSegment`] —
//! each bound to its XML element through the declarative combinators of
//! [`waymark_xml`]. Entities are built through fluent builders (or `of`
//! factories), never mutated afterwards, and round-trip losslessly:
//! reading back a written document yields an equal value, including the
//! distinction between absent fields and empty sequences.
//!
//! ## Quick Start
//!
//! ```rust
//! use waymark_gpx::{Gpx, Latitude, Longitude, Track, TrackSegment, Waypoint};
//!
//! let track = Track::builder()
//!     .name("Morning Run")
//!     .add_segment(
//!         TrackSegment::builder()
//!             .add_point(Waypoint::of(
//!                 Latitude::new(47.644548)?,
//!                 Longitude::new(-122.326897)?,
//!             ))
//!             .build(),
//!     )
//!     .build();
//!
//! let gpx = Gpx::builder().creator("ExampleApp").add_track(track).build();
//!
//! let mut out = Vec::new();
//! gpx.write_to(&mut out).expect("write");
//! let back = Gpx::read_from(out.as_slice()).expect("read");
//! assert_eq!(back, gpx);
//! # Ok::<(), waymark_gpx::InvalidValue>(())
//! ```
//!
//! ## Validation
//!
//! Scalar constraints are enforced at construction, never deferred:
//! [`Latitude`] and [`Longitude`] reject out-of-range degrees, [`UInt`]
//! rejects signs and non-digits, and a document whose text violates a
//! constraint fails parsing as a whole — no partial document is returned.
//! Unknown elements, on the other hand, are skipped silently so documents
//! from newer producers keep parsing.

pub mod bounds;
pub mod document;
pub mod error;
pub mod link;
pub mod metadata;
pub mod person;
pub mod route;
pub mod segment;
mod sequence;
pub mod track;
pub mod types;
pub mod waypoint;

pub use bounds::Bounds;
pub use document::{Gpx, GpxBuilder, DEFAULT_CREATOR, DEFAULT_VERSION, GPX_NAMESPACE};
pub use error::{GpxError, Result};
pub use link::{Link, LinkBuilder};
pub use metadata::{Metadata, MetadataBuilder};
pub use person::{Email, Person, PersonBuilder};
pub use route::{Route, RouteBuilder};
pub use segment::{TrackSegment, TrackSegmentBuilder};
pub use track::{Track, TrackBuilder};
pub use types::{InvalidValue, Latitude, Longitude, UInt};
pub use waypoint::{Waypoint, WaypointBuilder};
