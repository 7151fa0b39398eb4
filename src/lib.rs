//! A piece-table text buffer core.
//!
//! [`PieceTable`] holds a document as two append-only backing buffers (the
//! original text supplied at construction, and a change buffer that grows
//! with every insert) sliced by an ordered sequence of [`Piece`]s. Editing
//! never copies or shifts document bytes in place; it splices the piece
//! sequence, splitting pieces at edit boundaries as needed. Offset and
//! line/column addressing are backed by [`PrefixSumComputer`], a lazily
//! rebuilt prefix-sum array, both per piece (for in-piece line lookups) and
//! at the table level (for piece lookups).
//!
//! Lines and columns are 1-based throughout. Offsets are UTF-8 byte offsets;
//! `\n` is the only recognized line separator.

mod config;
mod error;
mod piece;
mod prefix_sum;
mod table;

pub mod position;

pub use config::PieceTableConfig;
pub use error::{PieceTableError, Result};
pub use piece::{BufferKind, Piece};
pub use position::{Position, Range};
pub use prefix_sum::PrefixSumComputer;
pub use table::PieceTable;
