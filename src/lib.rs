//! # Introduction
//!
//! metagen scans C++ headers for member declarations tagged with a marker
//! keyword (`printable`, `serializable`) and generates the matching
//! `gep::detail::Printer<T>` and `gep::json::File` specializations, so the
//! tagged types can be printed and serialized without hand-written glue.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Normalizer → Tokenizer → Extractor → ClassMap → Artifact
//!                                       │
//!                                 ScopeTracker
//! ```
//!
//! 1. [`scanner`]: strips comments, masks literals, normalizes and tokenizes
//!    the text, then walks it tracking named scopes and collecting
//!    [`scanner::MetaInfo`] records.
//! 2. [`codegen`]: folds records into one scaffold per type and strategy and
//!    writes the per-file artifact and the run's master header.
//! 3. [`session`]: one input file, from reading it to writing its artifact.
//! 4. [`run`]: sequential multi-file driver with per-file status codes.
//!
//! ## Input requirements
//!
//! Every input must include the reflection header (`#include "Reflection.hpp"`)
//! and, usually at its end, its own generated artifact
//! (`#include "<stem>.generated.hpp"`).

pub mod codegen;
pub mod config;
pub mod errors;
pub mod run;
pub mod scanner;
pub mod session;

pub use config::ScanConfig;
pub use errors::{Result, ScanError};
