use serde::{Deserialize, Serialize};

/// A location in a document, addressed by 1-based line and column.
///
/// Both fields are 1-based: the first line is `1`, the first column of a
/// line is `1`. A line feed belongs to the line it terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Line number, 1-based.
    pub line: usize,
    /// Column number, 1-based.
    pub column: usize,
}

impl Position {
    /// Builds a position from 1-based `line`/`column`.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A span between two [`Position`]s: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Inclusive start of the range.
    pub start: Position,
    /// Exclusive end of the range.
    pub end: Position,
}

impl Range {
    /// Builds a range from a start and an end position.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_round_trips_through_json() {
        let pos = Position::new(4, 12);
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(serde_json::from_str::<Position>(&json).unwrap(), pos);
    }

    #[test]
    fn range_round_trips_through_json() {
        let range = Range::new(Position::new(2, 1), Position::new(3, 1));
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(serde_json::from_str::<Range>(&json).unwrap(), range);
    }
}
