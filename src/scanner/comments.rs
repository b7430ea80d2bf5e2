//! Comment removal
//!
//! A single left-to-right pass driven by [`CommentState`]. Every character
//! that belongs to a comment (delimiters included) is overwritten with a
//! space; newlines are kept, so line and column positions survive.
//!
//! Transitions, in priority order:
//!
//! ```text
//! Code          --"/*"-->            BlockComment
//! Code          --"//"-->            LineComment
//! Code          --unescaped '"'-->   Quoted
//! Quoted        --unescaped '"'-->   Code
//! BlockComment  --"*/"-->            Code
//! LineComment   --'\n', no '\'-->    Code
//! ```
//!
//! A `\` inside a line comment marks it continued: the next newline does not
//! end it. Any other character clears the continuation. Quotes inside
//! comments never toggle anything, and comment openers inside strings are
//! plain text. Character literals such as `'"'` are copied through whole.

use super::literals::{char_literal_end, is_string_quote};

/// Where the scanner currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentState {
    Code,
    Quoted,
    LineComment { continued: bool },
    BlockComment,
}

fn blank(ch: char) -> char {
    if ch == '\n' {
        '\n'
    } else {
        ' '
    }
}

/// Returns `source` with every comment blanked out
pub fn strip_comments(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut state = CommentState::Code;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let next = chars.get(i + 1).copied();

        match state {
            CommentState::Code => match (ch, next) {
                ('/', Some('*')) => {
                    state = CommentState::BlockComment;
                    out.push_str("  ");
                    i += 2;
                    continue;
                }
                ('/', Some('/')) => {
                    state = CommentState::LineComment { continued: false };
                    out.push_str("  ");
                    i += 2;
                    continue;
                }
                ('"', _) if is_string_quote(&chars, i) => {
                    state = CommentState::Quoted;
                    out.push(ch);
                }
                ('\'', _) => match char_literal_end(&chars, i) {
                    Some(close) => {
                        out.extend(&chars[i..=close]);
                        i = close + 1;
                        continue;
                    }
                    None => out.push(ch),
                },
                _ => out.push(ch),
            },
            CommentState::Quoted => {
                if is_string_quote(&chars, i) {
                    state = CommentState::Code;
                }
                out.push(ch);
            }
            CommentState::BlockComment => {
                if ch == '*' && next == Some('/') {
                    state = CommentState::Code;
                    out.push_str("  ");
                    i += 2;
                    continue;
                }
                out.push(blank(ch));
            }
            CommentState::LineComment { continued } => {
                if ch == '\n' && !continued {
                    state = CommentState::Code;
                    out.push('\n');
                } else {
                    state = CommentState::LineComment {
                        continued: ch == '\\',
                    };
                    out.push(blank(ch));
                }
            }
        }

        i += 1;
    }

    out
}
