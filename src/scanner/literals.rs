//! String and character literal masking
//!
//! Every character strictly inside a quoted literal is moved into a
//! [`RemovedLiterals`] buffer and replaced by [`PLACEHOLDER`], so that later
//! stages never see punctuation that lives inside a literal. Restoration is a
//! positional replay: the n-th placeholder inside a literal receives the n-th
//! buffered character. Nothing is matched by content.
//!
//! Literal boundaries are found by [`literal_spans`], which both passes use.
//! Masked text has the same spans as the text it was masked from, which is what
//! makes the replay line up.

use crate::errors::{Result, ScanError};
use std::ops::Range;

/// Character written in place of every masked literal character
pub const PLACEHOLDER: char = '$';

/// Longest character literal body recognised (`'\U0001F600'` is 10)
const MAX_CHAR_LITERAL: usize = 12;

/// Characters excised from literals, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovedLiterals {
    chars: Vec<char>,
}

impl RemovedLiterals {
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    /// Drops the characters at the given replay positions
    ///
    /// Used when a stage deletes masked text outright, so the remaining
    /// placeholders still line up with the buffer.
    pub(crate) fn remove_positions(&mut self, positions: &[usize]) {
        if positions.is_empty() {
            return;
        }
        let mut drop = positions.iter().copied().peekable();
        let mut index = 0;
        self.chars.retain(|_| {
            let keep = drop.peek() != Some(&index);
            if !keep {
                drop.next();
            }
            index += 1;
            keep
        });
    }
}

/// True when the character at `index` is preceded by an odd run of backslashes
pub(crate) fn is_escaped(chars: &[char], index: usize) -> bool {
    chars[..index]
        .iter()
        .rev()
        .take_while(|&&c| c == '\\')
        .count()
        % 2
        == 1
}

/// True when `chars[index]` is a `"` that delimits a string literal
pub(crate) fn is_string_quote(chars: &[char], index: usize) -> bool {
    chars[index] == '"' && !is_escaped(chars, index)
}

/// Identifier runs allowed directly before a character literal
const ENCODING_PREFIXES: [&str; 4] = ["L", "u", "U", "u8"];

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// True when the identifier run ending at `index` is absent or an encoding prefix
fn opens_after_prefix(chars: &[char], index: usize) -> bool {
    let start = chars[..index]
        .iter()
        .rposition(|&c| !is_identifier_char(c))
        .map_or(0, |p| p + 1);
    if start == index {
        return true;
    }
    let run: String = chars[start..index].iter().collect();
    ENCODING_PREFIXES.contains(&run.as_str())
}

/// If a character literal opens at `index`, the index of its closing `'`
///
/// A `'` directly after an identifier is a digit separator (`1'000`) and
/// never opens a literal, unless that identifier is an encoding prefix
/// (`L'x'`, `u8'x'`).
pub(crate) fn char_literal_end(chars: &[char], index: usize) -> Option<usize> {
    if chars[index] != '\'' || is_escaped(chars, index) {
        return None;
    }
    if !opens_after_prefix(chars, index) {
        return None;
    }

    let limit = (index + 2 + MAX_CHAR_LITERAL).min(chars.len());
    for close in index + 2..limit {
        match chars[close] {
            '\n' => return None,
            '\'' if !is_escaped(chars, close) => return Some(close),
            _ => {}
        }
    }
    None
}

/// If a string literal opens at `index`, the index of its closing `"`
pub(crate) fn string_literal_end(chars: &[char], index: usize) -> Option<usize> {
    if !is_string_quote(chars, index) {
        return None;
    }
    (index + 1..chars.len()).find(|&close| is_string_quote(chars, close))
}

/// Content ranges (delimiters excluded) of every balanced literal
///
/// An opening `"` with no closing partner leaves the rest of the text
/// unmasked.
pub fn literal_spans(chars: &[char]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '"' => match string_literal_end(chars, i) {
                Some(close) => {
                    spans.push(i + 1..close);
                    i = close + 1;
                }
                None if is_string_quote(chars, i) => break,
                None => i += 1,
            },
            '\'' => match char_literal_end(chars, i) {
                Some(close) => {
                    spans.push(i + 1..close);
                    i = close + 1;
                }
                None => i += 1,
            },
            _ => i += 1,
        }
    }

    spans
}

/// Per-character flag: is this position inside a literal body
pub(crate) fn literal_mask(chars: &[char]) -> Vec<bool> {
    let mut mask = vec![false; chars.len()];
    for span in literal_spans(chars) {
        for flag in &mut mask[span] {
            *flag = true;
        }
    }
    mask
}

/// Replaces every literal body character with [`PLACEHOLDER`]
pub fn mask_literals(text: &str) -> (String, RemovedLiterals) {
    let chars: Vec<char> = text.chars().collect();
    let mask = literal_mask(&chars);
    let mut removed = RemovedLiterals::default();
    let mut masked = String::with_capacity(text.len());

    for (ch, inside) in chars.iter().zip(mask) {
        if inside {
            removed.chars.push(*ch);
            masked.push(PLACEHOLDER);
        } else {
            masked.push(*ch);
        }
    }

    (masked, removed)
}

/// Replays `removed` into the placeholders of `masked`
///
/// Fails when the number of placeholders found inside literals differs from
/// the number of buffered characters.
pub fn restore_literals(masked: &str, removed: &RemovedLiterals) -> Result<String> {
    let chars: Vec<char> = masked.chars().collect();
    let mask = literal_mask(&chars);
    let mut replay = removed.chars.iter();
    let mut replayed = 0;
    let mut restored = String::with_capacity(masked.len() + removed.len());

    for (ch, inside) in chars.iter().zip(mask) {
        if inside && *ch == PLACEHOLDER {
            let original = replay.next().ok_or(ScanError::RestorationMismatch {
                masked: removed.len(),
                replayed: replayed + 1,
            })?;
            restored.push(*original);
            replayed += 1;
        } else {
            restored.push(*ch);
        }
    }

    if replayed != removed.len() {
        return Err(ScanError::RestorationMismatch {
            masked: removed.len(),
            replayed,
        });
    }

    Ok(restored)
}
