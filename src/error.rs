// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the Athena value conversion layer.
//!
//! Row-local failures (`Conversion`) abort only the row being decoded.
//! `UnsupportedType` and `ColumnCountMismatch` mean the result set itself
//! cannot be represented, and callers should fail the query.

use arrow_schema::ArrowError;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while converting Athena values.
#[derive(Debug, Error)]
pub enum Error {
    /// A literal could not be parsed as its declared type.
    #[error("cannot parse '{value}' as {type_tag}")]
    Conversion {
        type_tag: String,
        value: String,
        #[source]
        source: ParseFailure,
    },

    /// The server reported a type name with no decoding rule.
    #[error("unknown type `{type_name}` with value {value}")]
    UnsupportedType { type_name: String, value: String },

    /// Column descriptors and cells disagree on the row width.
    #[error("row has {cells} cells but {columns} columns were declared")]
    ColumnCountMismatch { columns: usize, cells: usize },

    /// An option was set with a value it does not accept.
    #[error("invalid value for option '{key}': {value}")]
    InvalidOption { key: String, value: String },

    /// An option key that the converter does not know.
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The configured log file could not be opened for appending.
    #[error("failed to open log file {path}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Arrow(#[from] ArrowError),
}

impl Error {
    /// Builds a conversion error for `value` declared as `type_tag`.
    pub(crate) fn conversion(
        type_tag: &str,
        value: &str,
        source: impl Into<ParseFailure>,
    ) -> Self {
        Error::Conversion {
            type_tag: type_tag.to_string(),
            value: value.to_string(),
            source: source.into(),
        }
    }

    /// Returns true when the error invalidates the whole result set rather
    /// than a single row.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedType { .. } | Error::ColumnCountMismatch { .. }
        )
    }
}

/// The underlying diagnostic of a [`Error::Conversion`].
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error("value out of range")]
    OutOfRange,

    #[error("expected 'true' or 'false'")]
    Boolean,

    #[error(transparent)]
    Temporal(#[from] chrono::ParseError),

    #[error("unrecognized time zone '{0}'")]
    TimeZone(String),

    #[error("does not match layout {0}")]
    Layout(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_message() {
        let err = Error::conversion("boolean", "yes", ParseFailure::Boolean);
        assert_eq!(err.to_string(), "cannot parse 'yes' as boolean");
        assert!(!err.is_fatal());

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "expected 'true' or 'false'");
    }

    #[test]
    fn test_fatal_errors() {
        let err = Error::UnsupportedType {
            type_name: "hyperloglog".to_string(),
            value: "abc".to_string(),
        };
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "unknown type `hyperloglog` with value abc");

        let err = Error::ColumnCountMismatch {
            columns: 3,
            cells: 2,
        };
        assert!(err.is_fatal());
        assert!(!Error::UnknownOption("x".into()).is_fatal());
    }

    #[test]
    fn test_int_parse_failure_is_attached() {
        let parse_err = "abc".parse::<i32>().unwrap_err();
        let err = Error::conversion("integer", "abc", parse_err);
        match err {
            Error::Conversion {
                source: ParseFailure::Int(_),
                ..
            } => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
