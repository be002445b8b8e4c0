//! Coordinate structures used to reference specific locations within parser input
use std::fmt::{Display, Formatter};

/// A [Coords] represents a single location within the parser input.
///
/// The lexer itself only tracks a byte offset; line and column are derived
/// on demand via [Coords::locate], since they are only ever needed on the
/// (cold) error path.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Coords {
    /// The absolute byte offset
    pub absolute: usize,
    /// The 1-based line number
    pub line: usize,
    /// The 1-based column (in bytes)
    pub column: usize,
}

impl Coords {
    /// Compute full coordinates for a byte offset by scanning the input up
    /// to that offset.
    pub fn locate(input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let mut line = 1;
        let mut line_start = 0;
        for (index, byte) in input[..offset].iter().enumerate() {
            if *byte == b'\n' {
                line += 1;
                line_start = index + 1;
            }
        }
        Coords {
            absolute: offset,
            line,
            column: offset - line_start + 1,
        }
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[abs: {}, line: {}, column: {}]",
            self.absolute, self.line, self.column
        )
    }
}

impl Default for Coords {
    fn default() -> Self {
        Coords {
            absolute: 0,
            line: 1,
            column: 1,
        }
    }
}

/// A [Span] is the byte interval covered by a single token.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    /// Offset of the first byte of the token
    pub start: usize,
    /// Offset just past the last byte of the token
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "start: {}, end: {}", self.start, self.end)
    }
}
