use thiserror::Error;

/// Errors produced by [`crate::PieceTable`] operations.
///
/// `insert` is the only operation that can report [`PieceTableError::OutOfRange`] to a
/// caller; `delete` and `substr` clamp instead of erroring (see their doc comments).
/// [`PieceTableError::InvariantViolation`] should never surface outside of debug
/// assertions, since it indicates a bug in this crate, not a caller mistake.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PieceTableError {
    /// `insert` was asked to address a location past the end of a non-empty document.
    #[error("offset {offset} is out of range for a document of length {doc_len}")]
    OutOfRange {
        /// The offset the caller requested.
        offset: usize,
        /// The document length at the time of the call.
        doc_len: usize,
    },

    /// An internal consistency check failed. Implementation bug; not caller-recoverable.
    #[error("piece table invariant violated: {0}")]
    InvariantViolation(String),
}

/// Convenience alias used throughout this crate's public API.
pub type Result<T> = std::result::Result<T, PieceTableError>;
