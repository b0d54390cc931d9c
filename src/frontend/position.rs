//! Recovering human readable line/column pairs from byte offsets.

use std::fmt::{Display, Formatter, Result};

/// 1-based position of a byte in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Rescans `source` from the start up to `offset`. Nothing is cached, so the cost grows
    /// with the offset; only ever used when reporting errors.
    pub fn locate(source: &str, offset: usize) -> Self {
        let end = offset.min(source.len());
        let mut pos = Position::default();
        for byte in source.as_bytes()[..end].iter() {
            match byte {
                b'\n' => pos.next_line(),
                _ => pos.next_column(),
            }
        }
        pos
    }

    fn next_column(&mut self) {
        self.column += 1;
    }

    fn next_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }
}
