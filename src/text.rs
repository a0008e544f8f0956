//! Position and range algebra for text documents
//!
//! Coordinates are zero-based `(line, character)` pairs. Both types are small
//! `Copy` values with a total order, so they can be shared freely and compared
//! without allocation.

pub mod position;
pub mod range;

pub use position::{Position, PositionChange, PositionDelta};
pub use range::{Containable, Range, RangeChange};
