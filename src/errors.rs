//! Error types for a scan session
//!
//! This module defines [`ScanError`], which represents every way processing a
//! single input file can fail. All of them are fatal for that file only: the
//! run driver reports the error and moves on to the next input.
//!
//! Each variant maps onto a per-file status code through [`ScanError::status`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Per-file status codes reported by the run driver
pub mod status {
    pub const SUCCESS: i32 = 0;
    pub const UNREADABLE: i32 = 1;
    pub const MISSING_REFLECTION_INCLUDE: i32 = 2;
    pub const MISSING_GENERATED_INCLUDE: i32 = 3;
    pub const MALFORMED_SYNTAX: i32 = 4;
    pub const RESTORATION_MISMATCH: i32 = 5;
    pub const WRITE_FAILED: i32 = 6;
}

/// Errors that abort the scan of one input file
#[derive(Debug, Error)]
pub enum ScanError {
    /// The input file could not be read
    #[error("unable to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The reflection-enabling include directive is missing
    #[error("reflection must be included: '{expected}' was not found")]
    MissingReflectionInclude { expected: String },

    /// The trailing include of the generated artifact is missing
    #[error("generated output must be included: '{expected}' was not found")]
    MissingGeneratedInclude { expected: String },

    /// `[[` without a matching `]]`
    #[error("line {line}: unmatched '[[' in attribute list")]
    UnmatchedAttribute { line: usize },

    /// A `}` closed more braces than were open
    #[error("line {line}: '}}' without a matching '{{'")]
    UnbalancedClosingBrace { line: usize },

    /// Braces or named scopes still open at end of input
    #[error("unbalanced braces at end of file: {depth} still open (innermost scope: {innermost})")]
    UnclosedScopes { depth: usize, innermost: String },

    /// A marker keyword appeared with no enclosing named structure
    #[error("line {line}: '{marker}' must be used inside a class, struct, union or namespace")]
    MarkerOutsideStructure { marker: String, line: usize },

    /// End of input reached while collecting a declarator
    #[error("line {line}: declaration after '{marker}' is never terminated with ';'")]
    UnterminatedDeclaration { marker: String, line: usize },

    /// The declarator fragment has no name or no type
    #[error("line {line}: '{marker}' must be followed by a type and a variable name")]
    MissingDeclarator { marker: String, line: usize },

    /// `printable int a, b;` style declarations are not supported
    #[error("line {line}: '{marker}' declares more than one variable; split it into one declaration per variable")]
    MultipleDeclarators { marker: String, line: usize },

    /// Masking and restoration disagreed on string literal contents
    #[error("string literal restoration mismatch: {masked} characters masked, {replayed} replayed")]
    RestorationMismatch { masked: usize, replayed: usize },

    /// Writing a generated artifact failed
    #[error("unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// The per-file status code this error is reported with
    pub fn status(&self) -> i32 {
        match self {
            ScanError::Unreadable { .. } => status::UNREADABLE,
            ScanError::MissingReflectionInclude { .. } => status::MISSING_REFLECTION_INCLUDE,
            ScanError::MissingGeneratedInclude { .. } => status::MISSING_GENERATED_INCLUDE,
            ScanError::UnmatchedAttribute { .. }
            | ScanError::UnbalancedClosingBrace { .. }
            | ScanError::UnclosedScopes { .. }
            | ScanError::MarkerOutsideStructure { .. }
            | ScanError::UnterminatedDeclaration { .. }
            | ScanError::MissingDeclarator { .. }
            | ScanError::MultipleDeclarators { .. } => status::MALFORMED_SYNTAX,
            ScanError::RestorationMismatch { .. } => status::RESTORATION_MISMATCH,
            ScanError::Write { .. } => status::WRITE_FAILED,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
