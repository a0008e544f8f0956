//! Token type and modifier legends
//!
//! A legend assigns integer codes to names by list position: token type `i` is
//! encoded as `i`, token modifier `i` as bit `1 << i` of the modifier mask.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SemanticTokensError};

/// Width of the modifier mask; a legend may name at most this many modifiers.
pub const MAX_TOKEN_MODIFIERS: usize = u32::BITS as usize;

/// Standard token types, in the order defined by the LSP specification.
pub const STANDARD_TOKEN_TYPES: &[&str] = &[
    "namespace",
    "type",
    "class",
    "enum",
    "interface",
    "struct",
    "typeParameter",
    "parameter",
    "variable",
    "property",
    "enumMember",
    "event",
    "function",
    "method",
    "macro",
    "keyword",
    "modifier",
    "comment",
    "string",
    "number",
    "regexp",
    "operator",
    "decorator",
];

/// Standard token modifiers, in the order defined by the LSP specification.
pub const STANDARD_TOKEN_MODIFIERS: &[&str] = &[
    "declaration",
    "definition",
    "readonly",
    "static",
    "deprecated",
    "abstract",
    "async",
    "modification",
    "documentation",
    "defaultLibrary",
];

static STANDARD_LEGEND: Lazy<SemanticTokensLegend> = Lazy::new(|| SemanticTokensLegend {
    token_types: STANDARD_TOKEN_TYPES.iter().map(|s| s.to_string()).collect(),
    token_modifiers: STANDARD_TOKEN_MODIFIERS.iter().map(|s| s.to_string()).collect(),
    index: LegendIndex::new(STANDARD_TOKEN_TYPES, STANDARD_TOKEN_MODIFIERS),
});

/// Ordered token type and token modifier names.
///
/// Serializes in the wire shape `{"tokenTypes": [..], "tokenModifiers": [..]}`;
/// deserializing runs the same validation as [`SemanticTokensLegend::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LegendRepr", into = "LegendRepr")]
pub struct SemanticTokensLegend {
    token_types: Vec<String>,
    token_modifiers: Vec<String>,
    index: LegendIndex,
}

impl SemanticTokensLegend {
    /// Build a legend, rejecting more modifiers than the mask can hold.
    pub fn new<T, M>(token_types: T, token_modifiers: M) -> Result<Self>
    where
        T: IntoIterator,
        T::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let token_types: Vec<String> = token_types.into_iter().map(Into::into).collect();
        let token_modifiers: Vec<String> = token_modifiers.into_iter().map(Into::into).collect();
        if token_modifiers.len() > MAX_TOKEN_MODIFIERS {
            return Err(SemanticTokensError::TooManyTokenModifiers {
                count: token_modifiers.len(),
                max: MAX_TOKEN_MODIFIERS,
            });
        }
        let index = LegendIndex::new(token_types.as_slice(), token_modifiers.as_slice());
        Ok(Self {
            token_types,
            token_modifiers,
            index,
        })
    }

    /// The standard LSP token types and modifiers.
    pub fn standard() -> &'static SemanticTokensLegend {
        &STANDARD_LEGEND
    }

    pub fn token_types(&self) -> &[String] {
        &self.token_types
    }

    pub fn token_modifiers(&self) -> &[String] {
        &self.token_modifiers
    }

    pub fn token_type_index(&self, name: &str) -> Option<u32> {
        self.index.token_type(name)
    }

    pub fn token_modifier_index(&self, name: &str) -> Option<u32> {
        self.index.token_modifier(name)
    }

    /// OR together the bits of the named modifiers.
    pub fn modifier_mask<I, S>(&self, names: I) -> Result<u32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.index.modifier_mask(names)
    }

    pub(crate) fn index(&self) -> &LegendIndex {
        &self.index
    }
}

/// Name to code tables resolved from a legend.
///
/// When a name appears more than once, its last position wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct LegendIndex {
    token_types: HashMap<String, u32>,
    token_modifiers: HashMap<String, u32>,
}

impl LegendIndex {
    fn new<S: AsRef<str>>(token_types: &[S], token_modifiers: &[S]) -> Self {
        Self {
            token_types: positions(token_types),
            token_modifiers: positions(token_modifiers),
        }
    }

    pub(crate) fn token_type(&self, name: &str) -> Option<u32> {
        self.token_types.get(name).copied()
    }

    pub(crate) fn token_modifier(&self, name: &str) -> Option<u32> {
        self.token_modifiers.get(name).copied()
    }

    pub(crate) fn modifier_mask<I, S>(&self, names: I) -> Result<u32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(0u32, |mask, name| {
            let name = name.as_ref();
            let bit = self
                .token_modifier(name)
                .ok_or_else(|| SemanticTokensError::UnknownTokenModifier(name.to_string()))?;
            Ok(mask | (1u32 << bit))
        })
    }
}

fn positions<S: AsRef<str>>(names: &[S]) -> HashMap<String, u32> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_ref().to_string(), i as u32))
        .collect()
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegendRepr {
    token_types: Vec<String>,
    #[serde(default)]
    token_modifiers: Vec<String>,
}

impl TryFrom<LegendRepr> for SemanticTokensLegend {
    type Error = SemanticTokensError;

    fn try_from(repr: LegendRepr) -> Result<Self> {
        SemanticTokensLegend::new(repr.token_types, repr.token_modifiers)
    }
}

impl From<SemanticTokensLegend> for LegendRepr {
    fn from(legend: SemanticTokensLegend) -> Self {
        LegendRepr {
            token_types: legend.token_types,
            token_modifiers: legend.token_modifiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legend() -> SemanticTokensLegend {
        SemanticTokensLegend::new(
            ["keyword", "string", "variable"],
            ["declaration", "readonly", "static"],
        )
        .unwrap()
    }

    #[test]
    fn test_indices_follow_list_order() {
        let legend = legend();
        assert_eq!(legend.token_type_index("keyword"), Some(0));
        assert_eq!(legend.token_type_index("variable"), Some(2));
        assert_eq!(legend.token_type_index("function"), None);
        assert_eq!(legend.token_modifier_index("static"), Some(2));
    }

    #[test]
    fn test_modifier_mask() {
        let legend = legend();
        assert_eq!(legend.modifier_mask(Vec::<&str>::new()), Ok(0));
        assert_eq!(legend.modifier_mask(["declaration"]), Ok(0b001));
        assert_eq!(legend.modifier_mask(["static", "declaration"]), Ok(0b101));
        assert_eq!(
            legend.modifier_mask(["readonly", "async"]),
            Err(SemanticTokensError::UnknownTokenModifier("async".into()))
        );
    }

    #[test]
    fn test_duplicate_names_keep_last_index() {
        let legend = SemanticTokensLegend::new(["a", "b", "a"], Vec::<String>::new()).unwrap();
        assert_eq!(legend.token_type_index("a"), Some(2));
        assert_eq!(legend.token_types().len(), 3);
    }

    #[test]
    fn test_modifier_limit() {
        let names: Vec<String> = (0..MAX_TOKEN_MODIFIERS).map(|i| format!("m{i}")).collect();
        let legend = SemanticTokensLegend::new(["t"], names.clone()).unwrap();
        assert_eq!(legend.modifier_mask(["m31"]), Ok(1u32 << 31));

        let mut too_many = names;
        too_many.push("one-more".into());
        assert_eq!(
            SemanticTokensLegend::new(["t"], too_many),
            Err(SemanticTokensError::TooManyTokenModifiers { count: 33, max: 32 })
        );
    }

    #[test]
    fn test_standard_legend() {
        let legend = SemanticTokensLegend::standard();
        assert_eq!(legend.token_types().len(), STANDARD_TOKEN_TYPES.len());
        assert_eq!(legend.token_type_index("namespace"), Some(0));
        assert_eq!(legend.token_type_index("decorator"), Some(22));
        assert_eq!(legend.modifier_mask(["defaultLibrary"]), Ok(1 << 9));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&legend()).unwrap();
        assert_eq!(
            json,
            r#"{"tokenTypes":["keyword","string","variable"],"tokenModifiers":["declaration","readonly","static"]}"#
        );
        let back: SemanticTokensLegend = serde_json::from_str(&json).unwrap();
        assert_eq!(back, legend());

        let no_modifiers: SemanticTokensLegend =
            serde_json::from_str(r#"{"tokenTypes":["keyword"]}"#).unwrap();
        assert!(no_modifiers.token_modifiers().is_empty());
    }

    #[test]
    fn test_deserialize_rejects_too_many_modifiers() {
        let modifiers: Vec<String> = (0..33).map(|i| format!("\"m{i}\"")).collect();
        let json = format!(
            r#"{{"tokenTypes":["t"],"tokenModifiers":[{}]}}"#,
            modifiers.join(",")
        );
        assert!(serde_json::from_str::<SemanticTokensLegend>(&json).is_err());
    }
}
