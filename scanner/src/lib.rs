//! Line-context scanning for an interactive line editor.
//!
//! Every operation takes `(cursor_offset, line)` and reports what the cursor sits on:
//! a word, a string literal, an attribute chain, a subscript key, an import clause, or the
//! argument slot of an unclosed call. Nothing here parses the line; inputs are mid-edit and
//! may be malformed, so scanners answer `None` instead of failing.
//!
//! All offsets are UTF-8 byte offsets into `line`, spans are half-open `[start, end)`.
mod brackets;
mod call;
mod context;
mod lexer;
mod span;
mod tests;

pub use brackets::{BracketMatcher, BracketState, OpenBracket, OpenQuote, StringRegion};
pub use call::{ActiveParameter, CallSite, locate_call};
pub use context::{
    ContextKind, LineContext, current_dict, current_dict_key, current_from_import_from,
    current_from_import_import, current_import, current_object, current_object_attribute,
    current_string, current_word,
};
pub use lexer::{KEYWORDS, Token, TokenKind, is_keyword, lex};
pub use span::Span;
