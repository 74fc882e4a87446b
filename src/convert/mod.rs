//! Text conversion engine: tokenizer, word transformer and the ignore list.
//!
//! Everything here is pure apart from [`IgnoreListCache`], which is the
//! shared, atomically replaced home of the current ignore list.

mod ignore_list;
mod tokenizer;
mod transform;

pub use ignore_list::{IgnoreEntry, IgnoreList, IgnoreListCache, DEFAULT_IGNORE_LIST};
pub use tokenizer::{is_word, tokenize, Token, TokenKind};
pub use transform::{convert_text, transform, ConversionMode, UnknownMode};
