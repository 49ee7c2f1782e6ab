//! The binding seam implemented by every bound entity type

use crate::error::Result;
use crate::token::{TokenSink, TokenSource};

/// A type with a declarative XML element binding
///
/// Implementors declare, once, how their fields map to child elements and
/// attributes; the reader/writer combinators drive the rest. The engine is
/// generic over implementors and knows nothing about concrete shapes.
///
/// The element name is passed per use rather than fixed per type, so one
/// shape can serve several tag names (a GPX waypoint appears as `wpt`,
/// `trkpt` and `rtept`).
pub trait XmlElement: Sized {
    /// Reads one `<tag>...</tag>` element from the source.
    ///
    /// # Errors
    ///
    /// Returns a structural error if the stream is not positioned on a
    /// `<tag>` start token, and a validation error if any scalar fails
    /// conversion. No partial value is ever produced.
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self>;

    /// Writes this value as one `<tag>...</tag>` element to the sink.
    ///
    /// # Errors
    ///
    /// Propagates sink failures unmodified.
    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()>;
}
