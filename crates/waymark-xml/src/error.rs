//! Error types for XML element binding

use thiserror::Error;

/// Errors that can occur while reading or writing bound XML elements
#[derive(Debug, Error)]
pub enum BindError {
    /// The token stream does not start with the expected element
    #[error("unexpected element <{found}> where <{expected}> was required")]
    UnexpectedElement {
        /// Tag name the binding expected
        expected: String,
        /// Tag name (or token kind) actually found
        found: String,
    },

    /// The document ended before the element was closed
    #[error("document ended inside <{tag}>")]
    UnexpectedEof {
        /// Tag name of the element still open
        tag: String,
    },

    /// A scalar's text failed conversion or a domain constraint
    #[error("invalid value {text:?} for <{tag}>: {reason}")]
    Validation {
        /// Tag (or attribute) name the value belongs to
        tag: String,
        /// Raw text as it appeared in the document
        text: String,
        /// Why the conversion rejected it
        reason: String,
    },

    /// A required attribute was not present on the start tag
    #[error("missing required attribute {attribute:?} on <{tag}>")]
    MissingAttribute {
        /// Element the attribute belongs to
        tag: String,
        /// Attribute name
        attribute: String,
    },

    /// The underlying token source failed
    #[error("XML read error: {0}")]
    Source(#[source] quick_xml::Error),

    /// The underlying token sink failed
    #[error("XML write error: {0}")]
    Sink(#[source] quick_xml::Error),
}

/// Result type for binding operations
pub type Result<T> = std::result::Result<T, BindError>;
