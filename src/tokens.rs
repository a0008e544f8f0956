//! Semantic token legends, the incremental encoder and its built output

pub mod builder;
pub mod legend;
#[cfg(feature = "lsp")]
pub mod lsp;
pub mod stream;

pub use builder::SemanticTokensBuilder;
pub use legend::{SemanticTokensLegend, MAX_TOKEN_MODIFIERS};
pub use stream::{
    AbsoluteToken, EncodedToken, SemanticTokens, SemanticTokensEdit, SemanticTokensEdits,
    TOKEN_LEN,
};
