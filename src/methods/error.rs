//! Errors raised while building or parsing rename methods
//!
//! Methods themselves never fail while renaming: a transform that cannot apply
//! leaves the name unchanged. Errors only surface when a pipeline is built
//! (invalid regular expressions) or when a method is parsed from text.

use thiserror::Error;

/// Method construction and parsing errors
#[derive(Debug, Error)]
pub enum MethodError {
    /// Regular expression failed to compile
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Textual method definition is malformed
    #[error("Invalid method format: {0}")]
    InvalidFormat(String),

    /// Unknown method kind in a textual definition
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// A method argument could not be parsed
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}
