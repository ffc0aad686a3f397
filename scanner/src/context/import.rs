//! `import` and `from ... import` clauses.
//!
//! A line may hold several statements (`if True: import os; import sys`). Only the one
//! containing the cursor is considered; statements end at `;` and `:` outside brackets.

use crate::span::checked_cursor;
use crate::{Span, Token, TokenKind, lex};

/// The tokens of the statement containing `cursor`, trivia included.
fn statement_at(tokens: &[Token], cursor: usize) -> &[Token] {
    let mut lo = 0;
    let mut hi = tokens.len();
    let mut depth = 0usize;

    for (idx, token) in tokens.iter().enumerate() {
        match &token.kind {
            kind if kind.is_open_bracket() => depth += 1,
            kind if kind.is_close_bracket() => depth = depth.saturating_sub(1),
            TokenKind::Colon | TokenKind::Semi if depth == 0 => {
                if token.end <= cursor {
                    lo = idx + 1;
                } else if token.start >= cursor {
                    hi = idx;
                    break;
                }
            }
            _ => {}
        }
    }

    &tokens[lo..hi]
}

fn first_significant(tokens: &[Token]) -> Option<(usize, &Token)> {
    tokens.iter().enumerate().find(|(_, token)| !token.is_trivia())
}

/// Byte range of the dotted name at the head of `tokens`, after leading whitespace.
///
/// The name is the run of directly adjacent identifier and `.` tokens; it must start with an
/// identifier unless `relative` allows leading dots. A trailing dot is kept.
fn dotted_name(tokens: &[Token], relative: bool) -> Option<(usize, usize)> {
    let mut iter = tokens.iter().skip_while(|token| token.is_trivia()).peekable();
    let first = iter.peek()?;
    match first.kind {
        TokenKind::Ident(_) => {}
        TokenKind::Dot if relative => {}
        _ => return None,
    }
    let start = first.start;
    let mut end = start;
    for token in iter {
        match token.kind {
            TokenKind::Ident(_) | TokenKind::Dot => end = token.end,
            _ => break,
        }
    }
    Some((start, end))
}

/// Dotted names of a comma-separated list, in order. Entries without a name are `None`.
fn name_list(tokens: &[Token], parenthesized: bool) -> Vec<Option<(usize, usize)>> {
    let mut tokens = tokens;
    if parenthesized
        && let Some((idx, token)) = first_significant(tokens)
        && token.kind == TokenKind::OpenParen
    {
        tokens = &tokens[idx + 1..];
    }
    tokens
        .split(|token| token.kind == TokenKind::Comma)
        .map(|entry| dotted_name(entry, false))
        .collect()
}

/// The entry of a name list that the cursor touches from the left.
fn entry_at(entries: &[Option<(usize, usize)>], cursor: usize) -> Option<(usize, usize)> {
    entries
        .iter()
        .flatten()
        .copied()
        .find(|&(start, end)| start < cursor && cursor <= end)
}

/// A `from <module> [import <names>]` statement.
struct FromImport<'t> {
    from_kw: &'t Token,
    module: Option<(usize, usize)>,
    import_kw: Option<&'t Token>,
    names: &'t [Token],
}

fn parse_from_import(tokens: &[Token]) -> Option<FromImport<'_>> {
    let (idx, from_kw) = first_significant(tokens)?;
    if !from_kw.is_keyword("from") {
        return None;
    }
    let rest = &tokens[idx + 1..];
    let import_idx = rest.iter().position(|token| token.is_keyword("import"));
    let module_tokens = import_idx.map_or(rest, |i| &rest[..i]);

    Some(FromImport {
        from_kw,
        module: dotted_name(module_tokens, true),
        import_kw: import_idx.map(|i| &rest[i]),
        names: import_idx.map_or(&[][..], |i| &rest[i + 1..]),
    })
}

/// The module of a `from` statement, while the cursor touches the module or one of the
/// plain names it imports.
///
/// Touching means `start < cursor <= end`. The keywords, the whitespace around them and
/// dotted entries (`path.stu|ff`) answer `None`.
pub fn current_from_import_from(cursor: usize, line: &str) -> Option<Span> {
    let cursor = checked_cursor(line, cursor)?;
    let tokens = lex(line);
    let stmt = parse_from_import(statement_at(&tokens, cursor))?;
    let (start, end) = stmt.module?;

    let on_module = start < cursor && cursor <= end;
    let on_name = stmt.import_kw.is_some_and(|kw| cursor > kw.end)
        && entry_at(&name_list(stmt.names, true), cursor)
            .is_some_and(|(s, e)| !line[s..e].contains('.'));
    if !(on_module || on_name) {
        return None;
    }
    Span::from_line(line, start, end)
}

/// The imported name under the cursor in `from <module> import <names>`.
///
/// Dotted continuations (`Node.asd`) are returned whole even though they are not valid
/// there.
pub fn current_from_import_import(cursor: usize, line: &str) -> Option<Span> {
    let cursor = checked_cursor(line, cursor)?;
    let tokens = lex(line);
    let stmt = parse_from_import(statement_at(&tokens, cursor))?;

    let import_kw = stmt.import_kw?;
    if cursor <= import_kw.end {
        return None;
    }
    let (start, end) = entry_at(&name_list(stmt.names, true), cursor)?;
    Span::from_line(line, start, end)
}

/// The dotted module name under the cursor in `import <name>[ as alias][, ...]`.
pub fn current_import(cursor: usize, line: &str) -> Option<Span> {
    let cursor = checked_cursor(line, cursor)?;
    let tokens = lex(line);
    let stmt = statement_at(&tokens, cursor);

    let (idx, import_kw) = first_significant(stmt)?;
    if !import_kw.is_keyword("import") || cursor <= import_kw.end {
        return None;
    }
    let (start, end) = entry_at(&name_list(&stmt[idx + 1..], false), cursor)?;
    Span::from_line(line, start, end)
}
