//! Error types for svgscribe library.

use std::io;
use thiserror::Error;

/// Result type alias for svgscribe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around a render pass.
///
/// The render pass itself never fails: unresolvable fonts and references
/// surface as warnings or omitted calls. These errors come from reading
/// input and writing output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not well-formed XML.
    #[error("SVG parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document has no usable root element.
    #[error("Empty document: no root element")]
    EmptyDocument,

    /// Page bounds or document dimensions are unusable.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Error while serializing render output.
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyDocument;
        assert_eq!(err.to_string(), "Empty document: no root element");

        let err = Error::InvalidDimensions("width must be positive".into());
        assert_eq!(err.to_string(), "Invalid dimensions: width must be positive");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_xml_error_conversion() {
        let xml_err = roxmltree::Document::parse("<svg>").unwrap_err();
        let err: Error = xml_err.into();
        assert!(matches!(err, Error::Xml(_)));
        assert!(err.to_string().starts_with("SVG parsing error"));
    }
}
