//! Marked declaration extraction
//!
//! A single pass over the token stream that drives the [`ScopeTracker`] and,
//! whenever a marker keyword appears directly inside a named structure body,
//! collects the declaration that follows it into a [`MetaInfo`].
//!
//! # Declarator rule
//!
//! ```text
//! printable  std::vector<int>  values  [ 4 ]  =  { 1 , 2 }  ;
//! ^ marker   ^ type tokens     ^ name  ^ extent  ^ initializer (skipped)
//! ```
//!
//! Tokens are collected up to `;`, or up to an initializer starter (`=`, `{`,
//! or a bit-field `:`) after which everything through the closing `;` is
//! skipped. Trailing array extents are peeled off, the last remaining token is
//! the variable name and everything before it is the type.

use super::lexer::Token;
use super::scope::{frame_for_brace, ScopeTracker, StructureKind};
use crate::codegen::Strategy;
use crate::config::ScanConfig;
use crate::errors::{Result, ScanError};
use log::debug;
use std::fmt;

/// Everything known about one marked member declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaInfo {
    /// The marker keyword as written (`printable`, `serializable`, ...)
    pub keyword: String,
    pub strategy: Strategy,
    pub variable_name: String,
    pub type_text: String,
    /// Bare name of the immediately enclosing structure
    pub parent_name: String,
    pub parent_kind: StructureKind,
    /// Every enclosing structure name, outermost first, joined with `::`
    pub qualified_path: String,
    pub line: usize,
}

impl fmt::Display for MetaInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}::{} (line {}, {} {})",
            self.keyword,
            self.type_text,
            self.qualified_path,
            self.variable_name,
            self.line,
            self.parent_kind,
            self.parent_name
        )
    }
}

/// Walks a token stream, tracking scopes and collecting marked declarations
pub struct Extractor<'a> {
    tokens: &'a [Token],
    config: &'a ScanConfig,
    position: usize,
    scopes: ScopeTracker,
}

impl<'a> Extractor<'a> {
    pub fn new(tokens: &'a [Token], config: &'a ScanConfig) -> Self {
        Self {
            tokens,
            config,
            position: 0,
            scopes: ScopeTracker::new(),
        }
    }

    /// Runs the pass to the end of the stream
    pub fn extract(mut self) -> Result<Vec<MetaInfo>> {
        let tokens = self.tokens;
        let mut records = Vec::new();

        while let Some(token) = tokens.get(self.position) {
            match token.text.as_str() {
                "{" => {
                    let frame = frame_for_brace(tokens, self.position);
                    self.scopes.open_brace(frame);
                    self.position += 1;
                }
                "}" => {
                    self.scopes.close_brace(token.line)?;
                    self.position += 1;
                }
                text => match self.marker_here(text) {
                    Some(strategy) => {
                        let meta = self.collect_declaration(strategy)?;
                        debug!("found {}", meta);
                        records.push(meta);
                    }
                    None => self.position += 1,
                },
            }
        }

        self.scopes.finish()?;
        Ok(records)
    }

    /// Strategy of the marker at the current position, if markers count here
    fn marker_here(&self, text: &str) -> Option<Strategy> {
        if !self.scopes.in_structure_body() {
            return None;
        }
        self.config.marker_strategy(text)
    }

    /// Consumes a marker and its declaration, ending after the `;`
    fn collect_declaration(&mut self, strategy: Strategy) -> Result<MetaInfo> {
        let tokens = self.tokens;
        let marker = &tokens[self.position];
        let frame = self
            .scopes
            .innermost()
            .cloned()
            .ok_or_else(|| ScanError::MarkerOutsideStructure {
                marker: marker.text.clone(),
                line: marker.line,
            })?;
        self.position += 1;

        let mut fragment: Vec<&Token> = Vec::new();
        loop {
            let token = tokens.get(self.position).ok_or_else(|| {
                ScanError::UnterminatedDeclaration {
                    marker: marker.text.clone(),
                    line: marker.line,
                }
            })?;

            match token.text.as_str() {
                ";" => {
                    self.position += 1;
                    break;
                }
                "=" | "{" | ":" => {
                    self.skip_initializer(marker)?;
                    break;
                }
                "}" => {
                    return Err(ScanError::UnterminatedDeclaration {
                        marker: marker.text.clone(),
                        line: marker.line,
                    });
                }
                _ => {
                    fragment.push(token);
                    self.position += 1;
                }
            }
        }

        if has_multiple_declarators(&fragment) {
            return Err(ScanError::MultipleDeclarators {
                marker: marker.text.clone(),
                line: marker.line,
            });
        }

        let extents = split_extents(&mut fragment);
        let name = fragment.pop();
        let (name, type_tokens) = match name {
            Some(name) if !fragment.is_empty() => (name, fragment),
            _ => {
                return Err(ScanError::MissingDeclarator {
                    marker: marker.text.clone(),
                    line: marker.line,
                })
            }
        };

        let mut type_text = type_tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        type_text.push_str(&extents);

        Ok(MetaInfo {
            keyword: marker.text.clone(),
            strategy,
            variable_name: name.text.clone(),
            type_text,
            parent_name: frame.name,
            parent_kind: frame.kind,
            qualified_path: self.scopes.qualified_path(),
            line: marker.line,
        })
    }

    /// Skips a default initializer or bit-field width through its `;`
    ///
    /// Braces inside the initializer are balanced here and never reach the
    /// scope tracker.
    fn skip_initializer(&mut self, marker: &Token) -> Result<()> {
        let unterminated = || ScanError::UnterminatedDeclaration {
            marker: marker.text.clone(),
            line: marker.line,
        };
        let tokens = self.tokens;
        let mut depth = 0usize;

        while let Some(token) = tokens.get(self.position) {
            self.position += 1;
            match token.text.as_str() {
                "{" => depth += 1,
                "}" => depth = depth.checked_sub(1).ok_or_else(unterminated)?,
                ";" if depth == 0 => return Ok(()),
                _ => {}
            }
        }

        Err(unterminated())
    }
}

/// True when the fragment has a top-level comma (`int a , b`)
///
/// Commas nested in template arguments, parentheses or brackets belong to
/// the type and do not count.
fn has_multiple_declarators(fragment: &[&Token]) -> bool {
    let mut nesting: isize = 0;
    for token in fragment {
        match token.text.as_str() {
            "(" | "[" => nesting += 1,
            ")" | "]" => nesting -= 1,
            "," if nesting == 0 => return true,
            text => {
                for ch in text.chars() {
                    match ch {
                        '<' => nesting += 1,
                        '>' => nesting -= 1,
                        _ => {}
                    }
                }
            }
        }
    }
    false
}

/// Removes trailing `[ N ]` groups, returning them compacted (`[4][2]`)
fn split_extents(fragment: &mut Vec<&Token>) -> String {
    let mut groups = Vec::new();

    while fragment.last().is_some_and(|t| t.is("]")) {
        let Some(open) = fragment.iter().rposition(|t| t.is("[")) else {
            break;
        };
        let group: String = fragment[open..].iter().map(|t| t.text.as_str()).collect();
        groups.push(group);
        fragment.truncate(open);
    }

    groups.reverse();
    groups.concat()
}

/// Convenience wrapper: tokens in, records out
pub fn extract(tokens: &[Token], config: &ScanConfig) -> Result<Vec<MetaInfo>> {
    Extractor::new(tokens, config).extract()
}
