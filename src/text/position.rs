//! Line/character positions
//!
//! A [`Position`] is a zero-based `(line, character)` coordinate. Positions are
//! plain `Copy` values; every "modifying" operation returns a new position and
//! leaves the receiver as it was.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SemanticTokensError};

/// A position in a text document (line and character, both zero-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// Relative movement applied by [`Position::translate_by`]. Omitted deltas are 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionDelta {
    pub line_delta: Option<i64>,
    pub character_delta: Option<i64>,
}

/// Replacement values applied by [`Position::with`]. Omitted fields keep the
/// current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionChange {
    pub line: Option<u32>,
    pub character: Option<u32>,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Build a position from signed coordinates, rejecting negative or
    /// oversized values.
    pub fn try_new(line: i64, character: i64) -> Result<Self> {
        Ok(Self::new(
            to_coordinate(line, "line")?,
            to_coordinate(character, "character")?,
        ))
    }

    /// The earliest of `positions`. Ties keep the first one seen.
    pub fn min_of<I>(positions: I) -> Result<Position>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut iter = positions.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| SemanticTokensError::invalid_argument("no positions given"))?;
        Ok(iter.fold(first, |result, p| if p.is_before(&result) { p } else { result }))
    }

    /// The latest of `positions`. Ties keep the first one seen.
    pub fn max_of<I>(positions: I) -> Result<Position>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut iter = positions.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| SemanticTokensError::invalid_argument("no positions given"))?;
        Ok(iter.fold(first, |result, p| if p.is_after(&result) { p } else { result }))
    }

    /// Lexicographic comparison, line first.
    pub fn compare_to(&self, other: &Position) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.character.cmp(&other.character))
    }

    pub fn is_before(&self, other: &Position) -> bool {
        self.compare_to(other) == Ordering::Less
    }

    pub fn is_before_or_equal(&self, other: &Position) -> bool {
        self.compare_to(other) != Ordering::Greater
    }

    pub fn is_after(&self, other: &Position) -> bool {
        !self.is_before_or_equal(other)
    }

    pub fn is_after_or_equal(&self, other: &Position) -> bool {
        !self.is_before(other)
    }

    pub fn is_equal(&self, other: &Position) -> bool {
        self.compare_to(other) == Ordering::Equal
    }

    /// Move by the given (possibly negative) deltas.
    ///
    /// A zero delta returns `self` unchanged. Fails if the result would be
    /// negative or does not fit in a `u32`.
    pub fn translate(&self, line_delta: i64, character_delta: i64) -> Result<Position> {
        if line_delta == 0 && character_delta == 0 {
            return Ok(*self);
        }
        let overflow = || SemanticTokensError::invalid_argument("translation overflows");
        Position::try_new(
            i64::from(self.line).checked_add(line_delta).ok_or_else(overflow)?,
            i64::from(self.character)
                .checked_add(character_delta)
                .ok_or_else(overflow)?,
        )
    }

    pub fn translate_by(&self, delta: PositionDelta) -> Result<Position> {
        self.translate(
            delta.line_delta.unwrap_or(0),
            delta.character_delta.unwrap_or(0),
        )
    }

    pub fn with(&self, change: PositionChange) -> Position {
        Position::new(
            change.line.unwrap_or(self.line),
            change.character.unwrap_or(self.character),
        )
    }

    pub fn with_line(&self, line: u32) -> Position {
        self.with(PositionChange {
            line: Some(line),
            ..PositionChange::default()
        })
    }

    pub fn with_character(&self, character: u32) -> Position {
        self.with(PositionChange {
            character: Some(character),
            ..PositionChange::default()
        })
    }
}

fn to_coordinate(value: i64, name: &str) -> Result<u32> {
    if value < 0 {
        return Err(SemanticTokensError::invalid_argument(format!(
            "{name} must be non-negative"
        )));
    }
    u32::try_from(value)
        .map_err(|_| SemanticTokensError::invalid_argument(format!("{name} is out of range")))
}

impl From<(u32, u32)> for Position {
    fn from((line, character): (u32, u32)) -> Self {
        Position::new(line, character)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}
