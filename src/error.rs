//! Error types shared by every conversion module.
//!
//! The original utilities this crate grew out of mixed their failure
//! conventions: some returned a null sentinel, some threw, some let NaN leak
//! through. This crate normalizes all of that to a single [`Error`] enum and
//! a crate-wide [`Result`] alias. Every fallible operation returns `Result`;
//! nothing panics on bad input.
//!
//! The one deliberate exception is numeric unit conversion: a non-finite
//! input magnitude (NaN, ±infinity) is not an error and propagates through
//! the arithmetic unchanged. See [`crate::units`].
//!
//! ## Examples
//!
//! ```rust
//! use omniconv::color::Rgb;
//!
//! let err = Rgb::from_hex("#zzzzzz").unwrap_err();
//! assert!(err.to_string().contains("invalid color"));
//! ```

use std::fmt;
use thiserror::Error;

/// Every failure a conversion in this crate can produce.
///
/// Each variant carries enough context to render a message fit for direct
/// display to an end user (the transforms were built for interactive tools).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A unit key that no unit of the dimension recognizes
    #[error("unsupported {dimension} unit: {key:?}")]
    UnsupportedUnit { dimension: &'static str, key: String },

    /// A color string that is not a 3- or 6-digit hex color
    #[error("invalid color {input:?}: expected a hex color like #rrggbb")]
    InvalidColor { input: String },

    /// A case-mode, sort-order, or similar selector key nobody recognizes
    #[error("unsupported {what}: {key:?}")]
    UnsupportedMode { what: &'static str, key: String },

    /// A user-supplied search pattern that failed to compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// Input that is not syntactically valid JSON
    #[error("invalid JSON at line {line}, column {col}: {msg}")]
    InvalidJson { line: usize, col: usize, msg: String },

    /// Structurally valid input of the wrong shape for the target format
    /// (e.g. JSON-to-CSV on anything but an array of objects)
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),

    /// A JSONPath expression outside the supported subset
    #[error("invalid path {path:?}: {msg}")]
    InvalidPath { path: String, msg: String },

    /// A schema document the schema validator cannot interpret
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// Failure while rendering an output format
    #[error("{format} output error: {msg}")]
    Output { format: &'static str, msg: String },

    /// Catch-all with a display message
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported-unit error for an unknown unit key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use omniconv::Error;
    ///
    /// let err = Error::unsupported_unit("length", "parsec");
    /// assert!(err.to_string().contains("parsec"));
    /// ```
    pub fn unsupported_unit(dimension: &'static str, key: &str) -> Self {
        Error::UnsupportedUnit {
            dimension,
            key: key.to_string(),
        }
    }

    /// Creates an invalid-color error for a malformed hex string.
    pub fn invalid_color(input: &str) -> Self {
        Error::InvalidColor {
            input: input.to_string(),
        }
    }

    /// Creates an unsupported-mode error for an unknown selector key.
    pub fn unsupported_mode(what: &'static str, key: &str) -> Self {
        Error::UnsupportedMode {
            what,
            key: key.to_string(),
        }
    }

    /// Creates an invalid-pattern error from a regex compilation failure.
    pub fn invalid_pattern<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidPattern(msg.to_string())
    }

    /// Creates an invalid-JSON error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use omniconv::Error;
    ///
    /// let err = Error::invalid_json(3, 14, "expected value");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn invalid_json(line: usize, col: usize, msg: &str) -> Self {
        Error::InvalidJson {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an unsupported-shape error with a user-facing description.
    pub fn unsupported_shape<T: fmt::Display>(msg: T) -> Self {
        Error::UnsupportedShape(msg.to_string())
    }

    /// Creates an invalid-path error for a JSONPath expression.
    pub fn invalid_path(path: &str, msg: &str) -> Self {
        Error::InvalidPath {
            path: path.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an output error for a rendering failure in a target format.
    pub fn output<T: fmt::Display>(format: &'static str, msg: T) -> Self {
        Error::Output {
            format,
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidJson {
            line: err.line(),
            col: err.column(),
            msg: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = Error::unsupported_unit("speed", "warp");
        assert_eq!(err.to_string(), "unsupported speed unit: \"warp\"");

        let err = Error::invalid_color("not-a-color");
        assert!(err.to_string().contains("not-a-color"));

        let err = Error::invalid_path("$..x", "recursive descent is not supported");
        assert!(err.to_string().contains("recursive descent"));
    }

    #[test]
    fn test_from_serde_json_keeps_position() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        let err = Error::from(parse_err);
        match err {
            Error::InvalidJson { line, .. } => assert_eq!(line, 2),
            other => panic!("expected InvalidJson, got {other:?}"),
        }
    }
}
