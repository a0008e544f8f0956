//! Ranges between two positions
//!
//! A [`Range`] always satisfies `start <= end`: both constructors swap their
//! endpoints when given in reverse order, and every derived range goes back
//! through them.
//!
//! ## Operations
//!
//! - containment of positions and ranges ([`Range::contains`])
//! - [`Range::intersection`], absent when the spans do not overlap
//! - [`Range::union`], the smallest range covering both
//! - [`Range::with`], a copy with one or both endpoints replaced
//!
//! Ranges serialize as a two-element array `[start, end]`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::text::position::Position;

/// A contiguous span between two positions, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(Position, Position)", into = "(Position, Position)")]
pub struct Range {
    start: Position,
    end: Position,
}

/// Replacement endpoints applied by [`Range::with`]. Omitted fields keep the
/// current endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeChange {
    pub start: Option<Position>,
    pub end: Option<Position>,
}

/// Things a [`Range`] can contain.
pub trait Containable {
    fn is_contained_in(&self, range: &Range) -> bool;
}

impl Containable for Position {
    fn is_contained_in(&self, range: &Range) -> bool {
        !self.is_before(&range.start) && !range.end.is_before(self)
    }
}

impl Containable for Range {
    fn is_contained_in(&self, range: &Range) -> bool {
        range.contains(&self.start) && range.contains(&self.end)
    }
}

impl Range {
    /// Create a range, swapping the endpoints if `end` comes before `start`.
    pub fn new(start: Position, end: Position) -> Self {
        if start.is_before(&end) {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn from_coords(start_line: u32, start_character: u32, end_line: u32, end_character: u32) -> Self {
        Self::new(
            Position::new(start_line, start_character),
            Position::new(end_line, end_character),
        )
    }

    /// Signed variant of [`Range::from_coords`]; negative coordinates are
    /// rejected.
    pub fn try_from_coords(
        start_line: i64,
        start_character: i64,
        end_line: i64,
        end_character: i64,
    ) -> Result<Self> {
        Ok(Self::new(
            Position::try_new(start_line, start_character)?,
            Position::try_new(end_line, end_character)?,
        ))
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_equal(&self.end)
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Check whether a position or a whole range lies within this range
    /// (endpoints inclusive).
    pub fn contains<T: Containable + ?Sized>(&self, item: &T) -> bool {
        item.is_contained_in(self)
    }

    pub fn is_equal(&self, other: &Range) -> bool {
        self.start.is_equal(&other.start) && self.end.is_equal(&other.end)
    }

    /// The overlapping part of both ranges, or `None` when they do not overlap.
    ///
    /// Ranges that only touch at one position intersect in an empty range.
    pub fn intersection(&self, other: &Range) -> Option<Range> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start.is_after(&end) {
            return None;
        }
        Some(Range::new(start, end))
    }

    /// The smallest range covering both. When one range already contains the
    /// other, the containing one is returned as is.
    pub fn union(&self, other: &Range) -> Range {
        if self.contains(other) {
            return *self;
        }
        if other.contains(self) {
            return *other;
        }
        Range::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn with(&self, change: RangeChange) -> Range {
        let start = change.start.unwrap_or(self.start);
        let end = change.end.unwrap_or(self.end);
        if start.is_equal(&self.start) && end.is_equal(&self.end) {
            return *self;
        }
        Range::new(start, end)
    }

    pub fn with_start(&self, start: Position) -> Range {
        self.with(RangeChange {
            start: Some(start),
            end: None,
        })
    }

    pub fn with_end(&self, end: Position) -> Range {
        self.with(RangeChange {
            start: None,
            end: Some(end),
        })
    }
}

impl From<(Position, Position)> for Range {
    fn from((start, end): (Position, Position)) -> Self {
        Range::new(start, end)
    }
}

impl From<Range> for (Position, Position) {
    fn from(range: Range) -> Self {
        (range.start, range.end)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
