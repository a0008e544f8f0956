//! JSON token lists, as read by the `semtok` binary
//!
//! The input is a JSON array. Each entry is either raw, with integer codes:
//!
//! ```json
//! {"line": 1, "character": 4, "length": 3, "tokenType": 0, "tokenModifiers": 2}
//! ```
//!
//! or named, resolved through the builder's legend:
//!
//! ```json
//! {"range": [{"line": 1, "character": 4}, {"line": 1, "character": 7}],
//!  "tokenType": "keyword", "tokenModifiers": ["readonly"]}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SemanticTokensError;
use crate::text::Range;
use crate::tokens::{SemanticTokens, SemanticTokensBuilder};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid token input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token entry {index}: {source}")]
    Entry {
        index: usize,
        source: SemanticTokensError,
    },

    #[error(transparent)]
    Tokens(#[from] SemanticTokensError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenEntry {
    Raw(RawEntry),
    Named(NamedEntry),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawEntry {
    pub line: u32,
    pub character: u32,
    pub length: u32,
    pub token_type: u32,
    #[serde(default)]
    pub token_modifiers: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NamedEntry {
    pub range: Range,
    pub token_type: String,
    #[serde(default)]
    pub token_modifiers: Vec<String>,
}

impl TokenEntry {
    pub fn push_into(&self, builder: &mut SemanticTokensBuilder) -> Result<(), SemanticTokensError> {
        match self {
            TokenEntry::Raw(raw) => {
                builder.push(
                    raw.line,
                    raw.character,
                    raw.length,
                    raw.token_type,
                    raw.token_modifiers,
                );
                Ok(())
            }
            TokenEntry::Named(named) => {
                builder.push_range(&named.range, &named.token_type, &named.token_modifiers)
            }
        }
    }
}

pub fn parse_entries(json: &str) -> Result<Vec<TokenEntry>, InputError> {
    Ok(serde_json::from_str(json)?)
}

/// Push `entries` in order, stopping at the first one the builder rejects.
pub fn push_entries(
    builder: &mut SemanticTokensBuilder,
    entries: &[TokenEntry],
) -> Result<(), InputError> {
    for (index, entry) in entries.iter().enumerate() {
        entry
            .push_into(builder)
            .map_err(|source| InputError::Entry { index, source })?;
    }
    Ok(())
}

/// Read a flat, already encoded token array.
pub fn parse_flat(json: &str) -> Result<SemanticTokens, InputError> {
    let data: Vec<u32> = serde_json::from_str(json)?;
    Ok(SemanticTokens::from_flat(data, None)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::SemanticTokensLegend;

    const MIXED: &str = r#"[
        {"line": 3, "character": 0, "length": 4, "tokenType": 1},
        {"range": [{"line": 1, "character": 2}, {"line": 1, "character": 5}],
         "tokenType": "keyword", "tokenModifiers": ["readonly"]}
    ]"#;

    fn legend() -> SemanticTokensLegend {
        SemanticTokensLegend::new(["keyword", "string"], ["declaration", "readonly"]).unwrap()
    }

    #[test]
    fn test_parse_mixed_entries() {
        let entries = parse_entries(MIXED).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0],
            TokenEntry::Raw(RawEntry {
                line: 3,
                character: 0,
                length: 4,
                token_type: 1,
                token_modifiers: 0,
            })
        );
        match &entries[1] {
            TokenEntry::Named(named) => {
                assert_eq!(named.range, Range::from_coords(1, 2, 1, 5));
                assert_eq!(named.token_type, "keyword");
                assert_eq!(named.token_modifiers, vec!["readonly"]);
            }
            other => panic!("expected named entry, got {other:?}"),
        }
    }

    #[test]
    fn test_push_entries() {
        let mut builder = SemanticTokensBuilder::with_legend(&legend());
        push_entries(&mut builder, &parse_entries(MIXED).unwrap()).unwrap();
        assert_eq!(
            builder.build(None).data(),
            &[1, 2, 3, 0, 0b10, 2, 0, 4, 1, 0]
        );
    }

    #[test]
    fn test_push_entries_reports_failing_index() {
        let mut builder = SemanticTokensBuilder::new();
        let err = push_entries(&mut builder, &parse_entries(MIXED).unwrap()).unwrap_err();
        match err {
            InputError::Entry { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source, SemanticTokensError::MissingLegend);
            }
            other => panic!("unexpected error {other:?}"),
        }
        // The raw entry before the failure was still pushed.
        assert_eq!(builder.token_count(), 1);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_entries(r#"[{"line": -1}]"#),
            Err(InputError::Json(_))
        ));
    }

    #[test]
    fn test_parse_flat() {
        let tokens = parse_flat("[0, 1, 2, 3, 4]").unwrap();
        assert_eq!(tokens.token_count(), 1);
        assert!(matches!(
            parse_flat("[0, 1, 2]"),
            Err(InputError::Tokens(SemanticTokensError::InvalidArgument(_)))
        ));
    }
}
