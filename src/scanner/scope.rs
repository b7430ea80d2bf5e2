//! Scope tracking
//!
//! Two counters are kept side by side: the stack of open named structures
//! (namespace, class, struct, union) and the number of open braces of any
//! kind. The current position is directly inside a named structure's own body
//! exactly when the two are equal; when there are more braces than frames the
//! position is inside a function body or an anonymous block.
//!
//! ```text
//! namespace app {          frames: [app]         depth: 1   body
//!   struct Point {         frames: [app, Point]  depth: 2   body
//!     void f() {           frames: [app, Point]  depth: 3   not a body
//! ```

use super::lexer::Token;
use crate::errors::{Result, ScanError};
use log::trace;
use std::fmt;

/// Separator used to join frame names into a fully-qualified path
pub const SCOPE_SEPARATOR: &str = "::";

/// Keyword that introduced a named structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Namespace,
    Class,
    Struct,
    Union,
}

impl StructureKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "namespace" => Some(StructureKind::Namespace),
            "class" => Some(StructureKind::Class),
            "struct" => Some(StructureKind::Struct),
            "union" => Some(StructureKind::Union),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            StructureKind::Namespace => "namespace",
            StructureKind::Class => "class",
            StructureKind::Struct => "struct",
            StructureKind::Union => "union",
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One currently-open named structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    pub name: String,
    pub kind: StructureKind,
}

impl ScopeFrame {
    pub fn new(name: impl Into<String>, kind: StructureKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// True when `brace_depth` open braces with `open_structures` named frames
/// means standing directly inside the innermost structure's own body
pub fn is_structure_body(brace_depth: usize, open_structures: usize) -> bool {
    brace_depth == open_structures
}

/// Works out whether the `{` at `brace` opens a named structure
///
/// The plain rule looks two tokens back for a structure keyword and takes
/// the token in between as the name (`struct Point {`). Heads with a base
/// clause (`class Derived final : public Base {`) or a trailing `final` are
/// recognised by walking back to the previous statement boundary.
pub fn frame_for_brace(tokens: &[Token], brace: usize) -> Option<ScopeFrame> {
    if brace >= 2 {
        if let Some(kind) = StructureKind::from_keyword(&tokens[brace - 2].text) {
            return Some(ScopeFrame::new(tokens[brace - 1].text.clone(), kind));
        }
    }

    let head_start = tokens[..brace]
        .iter()
        .rposition(|t| t.is(";") || t.is("{") || t.is("}"))
        .map_or(0, |boundary| boundary + 1);
    let head = &tokens[head_start..brace];

    if head.iter().any(|t| t.is("(") || t.is("=")) {
        return None;
    }

    head.iter().enumerate().find_map(|(k, token)| {
        let kind = StructureKind::from_keyword(&token.text)?;
        let name = head.get(k + 1)?;
        let mut rest = head[k + 2..].iter();
        let mut next = rest.next();
        if next.is_some_and(|t| t.is("final")) {
            next = rest.next();
        }
        next.map_or(true, |t| t.is(":"))
            .then(|| ScopeFrame::new(name.text.clone(), kind))
    })
}

/// Frame stack plus brace depth for one pass over a token stream
#[derive(Debug, Default)]
pub struct ScopeTracker {
    frames: Vec<ScopeFrame>,
    depth: usize,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a `{`, pushing `frame` if it opens a named structure
    pub fn open_brace(&mut self, frame: Option<ScopeFrame>) {
        if let Some(frame) = frame {
            trace!("enter {} {}", frame.kind, frame.name);
            self.frames.push(frame);
        }
        self.depth += 1;
    }

    /// Records a `}`, popping the innermost frame if the brace was its own
    pub fn close_brace(&mut self, line: usize) -> Result<Option<ScopeFrame>> {
        if self.depth == 0 {
            return Err(ScanError::UnbalancedClosingBrace { line });
        }

        let popped = if self.in_structure_body() {
            self.frames.pop()
        } else {
            None
        };
        if let Some(frame) = &popped {
            trace!("leave {} {}", frame.kind, frame.name);
        }

        self.depth -= 1;
        Ok(popped)
    }

    pub fn in_structure_body(&self) -> bool {
        is_structure_body(self.depth, self.frames.len())
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn frames(&self) -> &[ScopeFrame] {
        &self.frames
    }

    pub fn innermost(&self) -> Option<&ScopeFrame> {
        self.frames.last()
    }

    pub fn is_top_level(&self) -> bool {
        self.depth == 0
    }

    /// Every open frame name, outermost first, joined with `::`
    pub fn qualified_path(&self) -> String {
        self.frames
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(SCOPE_SEPARATOR)
    }

    /// Consumes the tracker, failing if anything is still open
    pub fn finish(self) -> Result<()> {
        if self.depth == 0 && self.frames.is_empty() {
            return Ok(());
        }
        Err(ScanError::UnclosedScopes {
            depth: self.depth,
            innermost: self
                .frames
                .last()
                .map_or_else(|| "<anonymous block>".to_string(), |f| f.name.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::lexer::tokenize;

    fn brace_frame(source: &str) -> Option<ScopeFrame> {
        let tokens = tokenize(source);
        let brace = tokens.iter().rposition(|t| t.is("{")).unwrap();
        frame_for_brace(&tokens, brace)
    }

    #[test]
    fn test_is_structure_body() {
        assert!(is_structure_body(0, 0));
        assert!(is_structure_body(2, 2));
        assert!(!is_structure_body(3, 2));
    }

    #[test]
    fn test_named_structures() {
        assert_eq!(
            brace_frame("struct Point {"),
            Some(ScopeFrame::new("Point", StructureKind::Struct))
        );
        assert_eq!(
            brace_frame("namespace client {"),
            Some(ScopeFrame::new("client", StructureKind::Namespace))
        );
        assert_eq!(
            brace_frame("union Bits {"),
            Some(ScopeFrame::new("Bits", StructureKind::Union))
        );
    }

    #[test]
    fn test_unnamed_braces() {
        assert_eq!(brace_frame("namespace {"), None);
        assert_eq!(brace_frame("void f ( ) {"), None);
        assert_eq!(brace_frame("Point p = {"), None);
        assert_eq!(brace_frame("A ( ) : x ( 1 ) {"), None);
    }

    #[test]
    fn test_base_clause() {
        assert_eq!(
            brace_frame("; class Derived : public Base {"),
            Some(ScopeFrame::new("Derived", StructureKind::Class))
        );
        assert_eq!(
            brace_frame("struct Leaf final : Node , Other {"),
            Some(ScopeFrame::new("Leaf", StructureKind::Struct))
        );
        assert_eq!(
            brace_frame("class Sealed final {"),
            Some(ScopeFrame::new("Sealed", StructureKind::Class))
        );
        assert_eq!(brace_frame("struct Point p {"), None);
    }

    #[test]
    fn test_function_body_is_not_a_structure_body() {
        let mut scopes = ScopeTracker::new();
        scopes.open_brace(Some(ScopeFrame::new("A", StructureKind::Class)));
        assert!(scopes.in_structure_body());

        scopes.open_brace(None); // method body
        scopes.open_brace(None); // if block
        assert!(!scopes.in_structure_body());
        assert_eq!(scopes.depth(), 3);
        assert_eq!(scopes.frames().len(), 1);

        assert_eq!(scopes.close_brace(5).unwrap(), None);
        assert_eq!(scopes.close_brace(6).unwrap(), None);
        assert!(scopes.in_structure_body());

        let popped = scopes.close_brace(7).unwrap();
        assert_eq!(popped.map(|f| f.name), Some("A".to_string()));
        assert!(scopes.is_top_level());
        assert!(scopes.finish().is_ok());
    }

    #[test]
    fn test_qualified_path() {
        let mut scopes = ScopeTracker::new();
        scopes.open_brace(Some(ScopeFrame::new("client", StructureKind::Namespace)));
        scopes.open_brace(Some(ScopeFrame::new("math", StructureKind::Namespace)));
        scopes.open_brace(Some(ScopeFrame::new("NotInt", StructureKind::Class)));
        assert_eq!(scopes.qualified_path(), "client::math::NotInt");
        assert_eq!(scopes.innermost().map(|f| f.kind), Some(StructureKind::Class));
    }

    #[test]
    fn test_closing_brace_underflow() {
        let mut scopes = ScopeTracker::new();
        assert!(matches!(
            scopes.close_brace(3),
            Err(ScanError::UnbalancedClosingBrace { line: 3 })
        ));
    }

    #[test]
    fn test_unclosed_scope_at_end() {
        let mut scopes = ScopeTracker::new();
        scopes.open_brace(Some(ScopeFrame::new("Point", StructureKind::Struct)));
        match scopes.finish() {
            Err(ScanError::UnclosedScopes { depth, innermost }) => {
                assert_eq!(depth, 1);
                assert_eq!(innermost, "Point");
            }
            other => panic!("Expected unclosed scope error, got {:?}", other),
        }
    }
}
