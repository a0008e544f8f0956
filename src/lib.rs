//! # semtok
//!
//! Building blocks for editor tooling that speaks the semantic tokens wire
//! format.
//!
//! Layout
//!
//! src/
//!   ├── text         Position and Range: total order, containment, union, intersection
//!   ├── tokens       Legend, the incremental encoder and its built output
//!   │   └── lsp      Conversions to lsp-types (feature `lsp`)
//!   ├── input        JSON token lists consumed by the `semtok` binary
//!   └── error        Shared error type
//!
//! The encoder accepts tokens in any order and always produces a stream sorted
//! by position and delta-encoded against the previous token:
//!
//! ```text
//! let mut builder = SemanticTokensBuilder::new();
//! builder.push(2, 0, 1, 0, 0);
//! builder.push(1, 0, 3, 0, 0);
//! builder.build(None).data() == [1, 0, 3, 0, 0, 1, 0, 1, 0, 0]
//! ```

pub mod error;
pub mod input;
pub mod text;
pub mod tokens;

pub use error::{Result, SemanticTokensError};
pub use text::{Position, Range};
pub use tokens::{SemanticTokens, SemanticTokensBuilder, SemanticTokensLegend};
