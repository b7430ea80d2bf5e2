//! Source scanning
//!
//! Everything between raw header text and the list of marked members:
//!
//! ```text
//! source ─► comments ─► literals ─► normalizer ─► lexer ─► extractor ─► MetaInfo
//!                                                            │
//!                                                          scope
//! ```

pub mod comments;
pub mod extractor;
pub mod lexer;
pub mod literals;
pub mod normalizer;
pub mod scope;

pub use extractor::{extract, Extractor, MetaInfo};
pub use lexer::{tokenize, Token};
pub use normalizer::{normalize, NormalizedSource};
pub use scope::{ScopeFrame, ScopeTracker, StructureKind};
