//! Error types for the Strata SDK.

use std::fmt;

/// Errors produced by the state blob codec.
///
/// A decode failure means the buffer is corrupt or belongs to a different
/// module; the caller must leave its parameters untouched in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// One of the integrity tags (head name, version, tail name) did not
    /// match byte-for-byte.
    Format(&'static str),
    /// The buffer length does not match the fixed record layout.
    Length { expected: usize, actual: usize },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(tag) => write!(f, "state format error: {}", tag),
            Self::Length { expected, actual } => {
                write!(f, "state length error: expected {} bytes, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for StateError {}
