//! Conversions to and from `lsp-types`

use lsp_types::{SemanticToken, SemanticTokenModifier, SemanticTokenType};

use crate::error::SemanticTokensError;
use crate::text::{Position, Range};
use crate::tokens::legend::SemanticTokensLegend;
use crate::tokens::stream::{SemanticTokens, SemanticTokensEdit, SemanticTokensEdits, TOKEN_LEN};

/// Split a flat buffer into lsp-types tokens. A trailing partial record is an
/// error rather than being dropped.
fn to_lsp_tokens(data: &[u32]) -> Result<Vec<SemanticToken>, SemanticTokensError> {
    if data.len() % TOKEN_LEN != 0 {
        return Err(SemanticTokensError::invalid_argument(format!(
            "token data length {} is not a multiple of {TOKEN_LEN}",
            data.len()
        )));
    }
    Ok(data
        .chunks_exact(TOKEN_LEN)
        .map(|chunk| SemanticToken {
            delta_line: chunk[0],
            delta_start: chunk[1],
            length: chunk[2],
            token_type: chunk[3],
            token_modifiers_bitset: chunk[4],
        })
        .collect())
}

impl TryFrom<SemanticTokens> for lsp_types::SemanticTokens {
    type Error = SemanticTokensError;

    fn try_from(tokens: SemanticTokens) -> Result<Self, Self::Error> {
        Ok(lsp_types::SemanticTokens {
            data: to_lsp_tokens(tokens.data())?,
            result_id: tokens.result_id().map(str::to_string),
        })
    }
}

impl TryFrom<SemanticTokensEdit> for lsp_types::SemanticTokensEdit {
    type Error = SemanticTokensError;

    fn try_from(edit: SemanticTokensEdit) -> Result<Self, Self::Error> {
        Ok(lsp_types::SemanticTokensEdit {
            start: edit.start(),
            delete_count: edit.delete_count(),
            data: edit.data().map(to_lsp_tokens).transpose()?,
        })
    }
}

impl TryFrom<SemanticTokensEdits> for lsp_types::SemanticTokensDelta {
    type Error = SemanticTokensError;

    fn try_from(edits: SemanticTokensEdits) -> Result<Self, Self::Error> {
        Ok(lsp_types::SemanticTokensDelta {
            result_id: edits.result_id().map(str::to_string),
            edits: edits
                .edits()
                .iter()
                .cloned()
                .map(lsp_types::SemanticTokensEdit::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl From<&SemanticTokensLegend> for lsp_types::SemanticTokensLegend {
    fn from(legend: &SemanticTokensLegend) -> Self {
        lsp_types::SemanticTokensLegend {
            token_types: legend
                .token_types()
                .iter()
                .map(|name| SemanticTokenType::from(name.clone()))
                .collect(),
            token_modifiers: legend
                .token_modifiers()
                .iter()
                .map(|name| SemanticTokenModifier::from(name.clone()))
                .collect(),
        }
    }
}

impl TryFrom<lsp_types::SemanticTokensLegend> for SemanticTokensLegend {
    type Error = SemanticTokensError;

    fn try_from(legend: lsp_types::SemanticTokensLegend) -> Result<Self, Self::Error> {
        SemanticTokensLegend::new(
            legend.token_types.iter().map(|t| t.as_str().to_string()),
            legend.token_modifiers.iter().map(|m| m.as_str().to_string()),
        )
    }
}

impl From<Position> for lsp_types::Position {
    fn from(position: Position) -> Self {
        lsp_types::Position::new(position.line, position.character)
    }
}

impl From<lsp_types::Position> for Position {
    fn from(position: lsp_types::Position) -> Self {
        Position::new(position.line, position.character)
    }
}

impl From<Range> for lsp_types::Range {
    fn from(range: Range) -> Self {
        lsp_types::Range::new(range.start().into(), range.end().into())
    }
}

/// LSP ranges are not guaranteed to be ordered; reversed ones are normalized.
impl From<lsp_types::Range> for Range {
    fn from(range: lsp_types::Range) -> Self {
        Range::new(range.start.into(), range.end.into())
    }
}
