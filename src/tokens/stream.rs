//! Built token streams and edits against them
//!
//! [`SemanticTokens`] is the finished, immutable form of a builder's records:
//! five `u32` per token, `[deltaLine, deltaStart, length, tokenType,
//! tokenModifiers]`, sorted by position. `deltaStart` is relative to the
//! previous token only when `deltaLine == 0`; on a new line it is the absolute
//! character offset.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SemanticTokensError};

/// Number of `u32` values per encoded token.
pub const TOKEN_LEN: usize = 5;

/// An immutable, delta-encoded token stream plus an optional result id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result_id: Option<String>,
    data: Box<[u32]>,
}

/// One token as stored in the wire stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedToken {
    pub delta_line: u32,
    pub delta_start: u32,
    pub length: u32,
    pub token_type: u32,
    pub token_modifiers: u32,
}

/// One token with its delta encoding resolved to document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsoluteToken {
    pub line: u32,
    pub character: u32,
    pub length: u32,
    pub token_type: u32,
    pub token_modifiers: u32,
}

impl SemanticTokens {
    pub fn new(data: impl Into<Box<[u32]>>, result_id: Option<String>) -> Self {
        Self {
            result_id,
            data: data.into(),
        }
    }

    /// Wrap a flat buffer received from elsewhere, checking that it holds
    /// whole tokens.
    pub fn from_flat(data: Vec<u32>, result_id: Option<String>) -> Result<Self> {
        if data.len() % TOKEN_LEN != 0 {
            return Err(SemanticTokensError::invalid_argument(format!(
                "token data length {} is not a multiple of {TOKEN_LEN}",
                data.len()
            )));
        }
        Ok(Self::new(data, result_id))
    }

    pub fn result_id(&self) -> Option<&str> {
        self.result_id.as_deref()
    }

    pub fn data(&self) -> &[u32] {
        &self.data
    }

    pub fn into_data(self) -> Box<[u32]> {
        self.data
    }

    pub fn token_count(&self) -> usize {
        self.data.len() / TOKEN_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EncodedToken> + '_ {
        self.data.chunks_exact(TOKEN_LEN).map(|chunk| EncodedToken {
            delta_line: chunk[0],
            delta_start: chunk[1],
            length: chunk[2],
            token_type: chunk[3],
            token_modifiers: chunk[4],
        })
    }

    /// Resolve the delta encoding back into document coordinates.
    ///
    /// Fails if the running sums overflow, which only happens for buffers not
    /// produced by this crate.
    pub fn decode(&self) -> Result<Vec<AbsoluteToken>> {
        let overflow = || SemanticTokensError::invalid_argument("token position overflows u32");
        let mut line = 0u32;
        let mut character = 0u32;
        let mut tokens = Vec::with_capacity(self.token_count());
        for token in self.iter() {
            if token.delta_line == 0 {
                character = character.checked_add(token.delta_start).ok_or_else(overflow)?;
            } else {
                line = line.checked_add(token.delta_line).ok_or_else(overflow)?;
                character = token.delta_start;
            }
            tokens.push(AbsoluteToken {
                line,
                character,
                length: token.length,
                token_type: token.token_type,
                token_modifiers: token.token_modifiers,
            });
        }
        Ok(tokens)
    }
}

/// A splice against a previously built token stream: replace `delete_count`
/// values starting at `start` with `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticTokensEdit {
    start: u32,
    delete_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Box<[u32]>>,
}

impl SemanticTokensEdit {
    pub fn new(start: u32, delete_count: u32, data: Option<Box<[u32]>>) -> Self {
        Self {
            start,
            delete_count,
            data,
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn delete_count(&self) -> u32 {
        self.delete_count
    }

    pub fn data(&self) -> Option<&[u32]> {
        self.data.as_deref()
    }
}

/// A batch of edits, tagged with the result id of the stream they produce.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticTokensEdits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result_id: Option<String>,
    edits: Vec<SemanticTokensEdit>,
}

impl SemanticTokensEdits {
    pub fn new(edits: Vec<SemanticTokensEdit>, result_id: Option<String>) -> Self {
        Self { result_id, edits }
    }

    pub fn result_id(&self) -> Option<&str> {
        self.result_id.as_deref()
    }

    pub fn edits(&self) -> &[SemanticTokensEdit] {
        &self.edits
    }
}
