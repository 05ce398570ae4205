//! Source line ranges.

use serde::{Deserialize, Serialize};

/// Inclusive, 1-based range of source lines.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    schemars::JsonSchema,
)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// A range covering one line.
    pub fn line(line: usize) -> Self {
        Self::new(line, line)
    }

    /// Grow the range so it also covers `other`.
    pub fn extend_to(&mut self, other: LineRange) {
        if self.start == 0 || other.start < self.start {
            self.start = other.start;
        }
        self.end = self.end.max(other.end);
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start..=self.end).contains(&line)
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
