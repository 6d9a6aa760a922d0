/*!
# Source position

Line/column location used by syntax diagnostics.
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in source code (1-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Converts a zero-based tree-sitter point
    pub fn from_point(point: tree_sitter::Point) -> Self {
        Self::new(point.row + 1, point.column + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
