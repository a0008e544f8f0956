//! Error types shared by the position algebra and the token encoder

use thiserror::Error;

/// Everything that can go wrong while building positions, ranges, legends or
/// token streams.
///
/// Every failing call leaves its receiver untouched; callers fix the input and
/// retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticTokensError {
    /// Malformed arguments: negative coordinates, arithmetic that leaves the
    /// `u32` domain, or an empty set of positions.
    #[error("Illegal argument: {0}")]
    InvalidArgument(String),

    #[error("Legend must be provided to resolve token names")]
    MissingLegend,

    #[error("Range cannot span multiple lines (lines {start_line}..{end_line})")]
    MultiLineRangeNotSupported { start_line: u32, end_line: u32 },

    #[error("Token type `{0}` is not in the provided legend")]
    UnknownTokenType(String),

    #[error("Token modifier `{0}` is not in the provided legend")]
    UnknownTokenModifier(String),

    /// The modifier mask is a `u32`, so a legend can name at most 32 modifiers.
    #[error("Legend declares {count} token modifiers, at most {max} fit in the modifier mask")]
    TooManyTokenModifiers { count: usize, max: usize },
}

impl SemanticTokensError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        SemanticTokensError::InvalidArgument(message.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SemanticTokensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SemanticTokensError::invalid_argument("line must be non-negative").to_string(),
            "Illegal argument: line must be non-negative"
        );
        assert_eq!(
            SemanticTokensError::UnknownTokenType("keywrd".into()).to_string(),
            "Token type `keywrd` is not in the provided legend"
        );
        assert_eq!(
            SemanticTokensError::MultiLineRangeNotSupported {
                start_line: 1,
                end_line: 3
            }
            .to_string(),
            "Range cannot span multiple lines (lines 1..3)"
        );
    }
}
