//! Word/separator tokenizer
//!
//! A word is a run of word characters (`\w`: letters, digits, underscore) that
//! may continue through an apostrophe or period when more word characters
//! follow it, so `O'Brien`, `don't` and `U.S` are single words. Everything in
//! between words is a separator and is copied through unchanged.

use regex::Regex;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+(?:['’.]\w+)*").expect("word pattern is valid"));

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Separator,
}

/// A contiguous piece of the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn word(text: &'a str) -> Self {
        Self {
            kind: TokenKind::Word,
            text,
        }
    }

    pub fn separator(text: &'a str) -> Self {
        Self {
            kind: TokenKind::Separator,
            text,
        }
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Split `text` into alternating separator and word tokens.
///
/// Joining the token texts in order reproduces `text` exactly. Empty input
/// yields no tokens; empty separators are never emitted.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in WORD.find_iter(text) {
        if m.start() > last {
            tokens.push(Token::separator(&text[last..m.start()]));
        }
        tokens.push(Token::word(m.as_str()));
        last = m.end();
    }

    if last < text.len() {
        tokens.push(Token::separator(&text[last..]));
    }

    tokens
}

/// Check if `text` is exactly one word
pub fn is_word(text: &str) -> bool {
    WORD.find(text)
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<&str> {
        tokenize(input).iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_words_and_separators_alternate() {
        let tokens = tokenize("acme llc, and sons");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word,
                TokenKind::Separator,
                TokenKind::Word,
                TokenKind::Separator,
                TokenKind::Word,
                TokenKind::Separator,
                TokenKind::Word,
            ]
        );
        assert_eq!(texts("acme llc, and sons")[3], ", ");
    }

    #[test]
    fn test_apostrophes_stay_inside_words() {
        assert_eq!(texts("O'Brien don't"), vec!["O'Brien", " ", "don't"]);
        assert_eq!(texts("it’s"), vec!["it’s"]);
    }

    #[test]
    fn test_periods_inside_words() {
        assert_eq!(texts("the U.S. army"), vec!["the", " ", "U.S", ". ", "army"]);
    }

    #[test]
    fn test_trailing_punctuation_is_separate() {
        assert_eq!(texts("Ltd. is"), vec!["Ltd", ". ", "is"]);
        assert_eq!(texts("end."), vec!["end", "."]);
        assert_eq!(texts("'quoted'"), vec!["'", "quoted", "'"]);
    }

    #[test]
    fn test_separator_only_input() {
        let tokens = tokenize("  -- ");
        assert_eq!(tokens, vec![Token::separator("  -- ")]);
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(texts("café über"), vec!["café", " ", "über"]);
    }

    #[test]
    fn test_is_word() {
        assert!(is_word("don't"));
        assert!(is_word("snake_case"));
        assert!(!is_word("two words"));
        assert!(!is_word("end."));
        assert!(!is_word(""));
    }
}
