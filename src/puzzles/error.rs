//! Errors raised while building a puzzle from its definition

use thiserror::Error;

/// Malformed puzzle input. A puzzle without solutions is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("{what} cannot be empty")]
    EmptyInput { what: &'static str },

    #[error("row {row} has length {found}, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },

    #[error("invalid character '{found}' at position {position} in {what}")]
    InvalidCharacter {
        what: &'static str,
        found: char,
        position: usize,
    },

    #[error("vertex {vertex} is out of range for a graph with {vertices} vertices")]
    VertexOutOfRange { vertex: usize, vertices: usize },

    #[error("{what} must be between {min} and {max}, got {found}")]
    OutOfRange {
        what: &'static str,
        found: i64,
        min: i64,
        max: i64,
    },
}
