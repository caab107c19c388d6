//! Error handling for parameter edits and parameter extractors

use std::io;

/// Unified error to report rejected parameter edits and failures while reading
/// chains, leg geometry or status reports.
#[derive(Debug)]
pub enum ParameterError {
    IoError(io::Error),
    ParseError(String),
    NonFiniteValue { field: String, value: f64 },
    InvalidLength { expected: usize, found: usize },
    UnknownField(String),
    UnknownLeg(String),
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ParameterError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            ParameterError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            ParameterError::NonFiniteValue { ref field, value } =>
                write!(f, "Non-finite value for {}: {}", field, value),
            ParameterError::InvalidLength { expected, found } =>
                write!(f, "Invalid Length: expected {}, found {}", expected, found),
            ParameterError::UnknownField(ref field) =>
                write!(f, "Unknown DH field: {}", field),
            ParameterError::UnknownLeg(ref leg) =>
                write!(f, "Unknown leg: {}", leg),
        }
    }
}

impl std::error::Error for ParameterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParameterError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ParameterError {
    fn from(err: io::Error) -> Self {
        ParameterError::IoError(err)
    }
}

impl From<serde_json::Error> for ParameterError {
    fn from(err: serde_json::Error) -> Self {
        ParameterError::ParseError(format!("{}", err))
    }
}
