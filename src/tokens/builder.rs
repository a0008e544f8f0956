//! Incremental semantic token encoder
//!
//! Callers push classified tokens in any order; [`SemanticTokensBuilder::build`]
//! always produces a stream sorted by `(line, character)` and delta-encoded
//! against the previous token.
//!
//! Token producers almost always walk a document top to bottom, so the builder
//! starts in [`TokenData::Sorted`] mode and writes each record already
//! delta-encoded. The first push that lands before its predecessor converts the
//! buffer back to absolute coordinates in one pass and switches to
//! [`TokenData::Unsorted`]; from then on records are stored absolute, and
//! `build` sorts and re-encodes them.

use tracing::{debug, trace};

use crate::error::{Result, SemanticTokensError};
use crate::text::Range;
use crate::tokens::legend::{LegendIndex, SemanticTokensLegend};
use crate::tokens::stream::{SemanticTokens, TOKEN_LEN};

/// Record buffer, five `u32` per token: `[line, char, length, type, modifiers]`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenData {
    /// Every record so far arrived in order; line/char are stored as deltas.
    Sorted(Vec<u32>),
    /// Order broke at some point; line/char are stored absolute.
    Unsorted(Vec<u32>),
}

impl TokenData {
    fn records(&self) -> &[u32] {
        match self {
            TokenData::Sorted(data) | TokenData::Unsorted(data) => data,
        }
    }
}

impl Default for TokenData {
    fn default() -> Self {
        TokenData::Sorted(Vec::new())
    }
}

/// Append-only accumulator for semantic tokens.
#[derive(Debug, Clone, Default)]
pub struct SemanticTokensBuilder {
    data: TokenData,
    prev_line: u32,
    prev_char: u32,
    legend: Option<LegendIndex>,
}

impl SemanticTokensBuilder {
    /// A builder that only accepts pre-encoded integer codes via [`push`](Self::push).
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder that can also resolve names via [`push_range`](Self::push_range).
    pub fn with_legend(legend: &SemanticTokensLegend) -> Self {
        Self {
            legend: Some(legend.index().clone()),
            ..Self::default()
        }
    }

    pub fn token_count(&self) -> usize {
        self.data.records().len() / TOKEN_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.data.records().is_empty()
    }

    /// Whether every push so far arrived in document order.
    pub fn is_sorted(&self) -> bool {
        matches!(self.data, TokenData::Sorted(_))
    }

    /// Append a token given its resolved type code and modifier mask.
    pub fn push(
        &mut self,
        line: u32,
        character: u32,
        length: u32,
        token_type: u32,
        token_modifiers: u32,
    ) {
        let out_of_order = line < self.prev_line
            || (line == self.prev_line && character < self.prev_char);
        if out_of_order && self.is_sorted() {
            self.switch_to_absolute(line, character);
        }

        match &mut self.data {
            TokenData::Sorted(data) => {
                let (push_line, push_char) = if data.is_empty() {
                    (line, character)
                } else {
                    let delta_line = line - self.prev_line;
                    let delta_char = if delta_line == 0 {
                        character - self.prev_char
                    } else {
                        character
                    };
                    (delta_line, delta_char)
                };
                data.extend_from_slice(&[push_line, push_char, length, token_type, token_modifiers]);
            }
            TokenData::Unsorted(data) => {
                data.extend_from_slice(&[line, character, length, token_type, token_modifiers]);
            }
        }

        self.prev_line = line;
        self.prev_char = character;
    }

    /// Append a token given a single-line range and legend names.
    ///
    /// Every name is resolved before anything is appended, so a failing call
    /// leaves the builder unchanged.
    pub fn push_range<I, S>(
        &mut self,
        range: &Range,
        token_type: &str,
        token_modifiers: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let legend = self
            .legend
            .as_ref()
            .ok_or(SemanticTokensError::MissingLegend)?;
        if !range.is_single_line() {
            return Err(SemanticTokensError::MultiLineRangeNotSupported {
                start_line: range.start().line,
                end_line: range.end().line,
            });
        }
        let token_type = legend
            .token_type(token_type)
            .ok_or_else(|| SemanticTokensError::UnknownTokenType(token_type.to_string()))?;
        let token_modifiers = legend.modifier_mask(token_modifiers)?;

        let start = range.start();
        let length = range.end().character - start.character;
        self.push(start.line, start.character, length, token_type, token_modifiers);
        Ok(())
    }

    /// Materialize the sorted, delta-encoded stream. The builder is left as is,
    /// so repeated calls return identical data.
    pub fn build(&self, result_id: Option<String>) -> SemanticTokens {
        match &self.data {
            TokenData::Sorted(data) => {
                trace!(tokens = data.len() / TOKEN_LEN, "building pre-sorted tokens");
                SemanticTokens::new(data.as_slice(), result_id)
            }
            TokenData::Unsorted(data) => {
                trace!(tokens = data.len() / TOKEN_LEN, "sorting tokens before build");
                SemanticTokens::new(sort_and_delta_encode(data), result_id)
            }
        }
    }

    fn switch_to_absolute(&mut self, line: u32, character: u32) {
        let data = match std::mem::take(&mut self.data) {
            TokenData::Sorted(data) | TokenData::Unsorted(data) => data,
        };
        debug!(
            line,
            character,
            prev_line = self.prev_line,
            prev_char = self.prev_char,
            converted = data.len() / TOKEN_LEN,
            "token pushed out of order, storing absolute positions"
        );
        self.data = TokenData::Unsorted(remove_delta_encoding(data));
    }
}

/// Rewrite delta-encoded records in place with absolute line/char values.
fn remove_delta_encoding(mut data: Vec<u32>) -> Vec<u32> {
    let mut prev_line = 0;
    let mut prev_char = 0;
    for record in data.chunks_exact_mut(TOKEN_LEN) {
        let (line, character) = if record[0] == 0 {
            (prev_line, prev_char + record[1])
        } else {
            (prev_line + record[0], record[1])
        };
        record[0] = line;
        record[1] = character;
        prev_line = line;
        prev_char = character;
    }
    data
}

/// Stable-sort absolute records by position and delta-encode them.
fn sort_and_delta_encode(data: &[u32]) -> Vec<u32> {
    let mut records: Vec<&[u32]> = data.chunks_exact(TOKEN_LEN).collect();
    records.sort_by_key(|record| (record[0], record[1]));

    let mut result = Vec::with_capacity(data.len());
    let mut prev_line = 0;
    let mut prev_char = 0;
    for record in records {
        let (line, character) = (record[0], record[1]);
        let push_line = line - prev_line;
        let push_char = if push_line == 0 {
            character - prev_char
        } else {
            character
        };
        result.extend_from_slice(&[push_line, push_char, record[2], record[3], record[4]]);
        prev_line = line;
        prev_char = character;
    }
    result
}
