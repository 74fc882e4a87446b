//! Case conversion of words and text runs

use std::fmt;
use std::str::FromStr;

use super::ignore_list::IgnoreList;
use super::tokenizer::{tokenize, TokenKind};

/// Requested case conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionMode {
    /// Capitalize each word (and each letter after an apostrophe)
    Title,
    Upper,
    Lower,
}

impl ConversionMode {
    pub const ALL: [ConversionMode; 3] = [
        ConversionMode::Title,
        ConversionMode::Upper,
        ConversionMode::Lower,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConversionMode::Title => "title",
            ConversionMode::Upper => "upper",
            ConversionMode::Lower => "lower",
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for a mode name that is not `title`, `upper` or `lower`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown conversion mode: {}", self.0)
    }
}

impl std::error::Error for UnknownMode {}

impl FromStr for ConversionMode {
    type Err = UnknownMode;

    /// Accepts mode names and the keyboard shortcut command ids
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" | "to-title-case" => Ok(ConversionMode::Title),
            "upper" | "to-upper-case" => Ok(ConversionMode::Upper),
            "lower" | "to-lower-case" => Ok(ConversionMode::Lower),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Convert a single word.
///
/// An ignore-list match always wins and returns the configured form,
/// whatever the mode.
pub fn transform(word: &str, mode: ConversionMode, ignore: &IgnoreList) -> String {
    if let Some(display) = ignore.lookup(word) {
        return display.to_string();
    }

    match mode {
        ConversionMode::Upper => word.to_uppercase(),
        ConversionMode::Lower => word.to_lowercase(),
        ConversionMode::Title => title_word(word),
    }
}

/// Lowercase the word, then uppercase its first character and every character
/// that directly follows an apostrophe or quote (`mcdonald's` -> `Mcdonald'S`).
fn title_word(word: &str) -> String {
    let lowered = word.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut capitalize = true;

    for ch in lowered.chars() {
        if capitalize && ch.is_lowercase() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        capitalize = matches!(ch, '\'' | '’' | '"');
    }

    out
}

/// Convert every word of `text`, copying separators through unchanged.
///
/// Ignore entries written with a trailing period (`Ltd.`) also match a word
/// that is directly followed by a period in the text; the period is then
/// part of the configured form.
pub fn convert_text(text: &str, mode: ConversionMode, ignore: &IgnoreList) -> String {
    let tokens = tokenize(text);
    let mut out = String::with_capacity(text.len());
    let mut period_consumed = false;

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Separator => {
                let rest = if period_consumed {
                    &token.text[1..]
                } else {
                    token.text
                };
                out.push_str(rest);
                period_consumed = false;
            }
            TokenKind::Word => {
                let followed_by_period = tokens
                    .get(i + 1)
                    .is_some_and(|next| next.text.starts_with('.'));
                if followed_by_period {
                    if let Some(display) = ignore.lookup(&format!("{}.", token.text)) {
                        out.push_str(display);
                        period_consumed = true;
                        continue;
                    }
                }
                out.push_str(&transform(token.text, mode, ignore));
            }
        }
    }

    out
}
