//! Error types for GPX document reading and writing

use std::io;
use thiserror::Error;
use waymark_xml::BindError;

/// Errors that can occur while reading or writing GPX documents
#[derive(Debug, Error)]
pub enum GpxError {
    /// The XML binding layer rejected the document
    #[error("GPX binding error: {0}")]
    Bind(#[from] BindError),

    /// File-level IO failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for GPX operations
pub type Result<T> = std::result::Result<T, GpxError>;
