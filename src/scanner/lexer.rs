//! Tokenizer for normalized source
//!
//! Splits the normalized buffer on whitespace. The normalizer has already
//! isolated every symbol of interest, so no further interpretation happens
//! here. Each token remembers the 1-based line it came from so that syntax
//! errors can point somewhere useful.

/// One whitespace-delimited token of normalized source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        Self {
            text: text.into(),
            line,
        }
    }

    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }
}

/// Splits normalized text into its token stream
pub fn tokenize(normalized: &str) -> Vec<Token> {
    normalized
        .split('\n')
        .enumerate()
        .flat_map(|(index, line)| {
            line.split_whitespace()
                .map(move |word| Token::new(word, index + 1))
        })
        .collect()
}
