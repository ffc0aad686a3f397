//! Call-site location for signature help.
//!
//! Tokens left of the cursor are scanned forward with a stack of frames, one per open
//! bracket or `lambda` parameter list. Each frame tracks the argument slot it is in and the
//! name chain typed most recently, which becomes the callee when a `(` follows it directly.

use tracing::trace;

use crate::span::checked_cursor;
use crate::{Span, TokenKind, lex};

/// The argument slot the cursor occupies in a call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActiveParameter {
    Positional(usize),
    Keyword(String),
}

/// The innermost unclosed call left of the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// The dotted name right before the call's `(`.
    pub callee: Span,
    pub open_paren: usize,
    /// `None` after a keyword argument followed by a comma, or while inside the parameter
    /// list of a `lambda` passed directly as an argument.
    pub active: Option<ActiveParameter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Root,
    Paren,
    Bracket,
    Brace,
    Lambda,
}

/// A run of `name(.name)*` with no whitespace. `rooted` is false when the run hangs off
/// something that is not a name (`f().x`).
#[derive(Debug, Clone, Copy)]
struct Chain {
    start: usize,
    end: usize,
    trailing_dot: bool,
    rooted: bool,
}

impl Chain {
    fn callee(self, line: &str) -> Option<Span> {
        if self.rooted && !self.trailing_dot {
            Span::from_line(line, self.start, self.end)
        } else {
            None
        }
    }
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    open: usize,
    callee: Option<Span>,
    arg: Option<ActiveParameter>,
    chain: Option<Chain>,
}

impl Frame {
    fn new(kind: FrameKind, open: usize, callee: Option<Span>) -> Self {
        Self {
            kind,
            open,
            callee,
            arg: Some(ActiveParameter::Positional(0)),
            chain: None,
        }
    }
}

fn closes(kind: FrameKind, token: &TokenKind) -> bool {
    matches!(
        (kind, token),
        (FrameKind::Paren, TokenKind::CloseParen)
            | (FrameKind::Bracket, TokenKind::CloseBracket)
            | (FrameKind::Brace, TokenKind::CloseBrace)
    )
}

/// Finds the call whose argument list the cursor is in.
///
/// Returns `None` when there is no unclosed call, when the bracket that would open it is not
/// directly preceded by a name, or when the bracketing before the cursor is malformed
/// (`spam(]`, `spam([)`, `spam())`).
pub fn locate_call(cursor: usize, line: &str) -> Option<CallSite> {
    let cursor = checked_cursor(line, cursor)?;
    let head = &line[..cursor];
    let mut frames = vec![Frame::new(FrameKind::Root, 0, None)];

    for token in lex(head) {
        if token.is_trivia() {
            continue;
        }
        let top = frames.last_mut()?;
        match &token.kind {
            TokenKind::Ident(_) => {
                top.chain = Some(match top.chain {
                    Some(chain) if chain.trailing_dot && chain.end == token.start => Chain {
                        end: token.end,
                        trailing_dot: false,
                        ..chain
                    },
                    _ => Chain {
                        start: token.start,
                        end: token.end,
                        trailing_dot: false,
                        rooted: true,
                    },
                });
            }
            TokenKind::Dot => {
                top.chain = Some(match top.chain {
                    Some(chain) if !chain.trailing_dot && chain.end == token.start => Chain {
                        end: token.end,
                        trailing_dot: true,
                        ..chain
                    },
                    _ => Chain {
                        start: token.start,
                        end: token.end,
                        trailing_dot: true,
                        rooted: false,
                    },
                });
            }
            TokenKind::Keyword("lambda") => {
                top.chain = None;
                frames.push(Frame::new(FrameKind::Lambda, token.start, None));
            }
            TokenKind::Eq => {
                top.arg = top
                    .chain
                    .and_then(|chain| chain.callee(head))
                    .filter(|name| !name.text.contains('.'))
                    .map(|name| ActiveParameter::Keyword(name.text));
                top.chain = None;
            }
            TokenKind::Comma => {
                top.arg = match top.arg {
                    Some(ActiveParameter::Positional(n)) => Some(ActiveParameter::Positional(n + 1)),
                    _ => None,
                };
                top.chain = None;
            }
            TokenKind::Colon if top.kind == FrameKind::Lambda => {
                frames.pop();
            }
            kind if kind.is_open_bracket() => {
                let (frame_kind, callee) = match kind {
                    TokenKind::OpenParen => (
                        FrameKind::Paren,
                        top.chain
                            .filter(|chain| chain.end == token.start)
                            .and_then(|chain| chain.callee(head)),
                    ),
                    TokenKind::OpenBracket => (FrameKind::Bracket, None),
                    _ => (FrameKind::Brace, None),
                };
                top.chain = None;
                frames.push(Frame::new(frame_kind, token.start, callee));
            }
            kind if kind.is_close_bracket() => {
                while frames.last().is_some_and(|frame| frame.kind == FrameKind::Lambda) {
                    frames.pop();
                }
                let top = frames.last()?;
                if !closes(top.kind, kind) {
                    trace!(cursor, at = token.start, "mismatched closing bracket");
                    return None;
                }
                frames.pop();
                frames.last_mut()?.chain = None;
            }
            _ => top.chain = None,
        }
    }

    let mut unknown = false;
    loop {
        let frame = frames.pop()?;
        match frame.kind {
            FrameKind::Root => return None,
            FrameKind::Lambda => unknown = true,
            FrameKind::Paren if frame.callee.is_some() => {
                let callee = frame.callee?;
                let active = if unknown { None } else { frame.arg };
                trace!(cursor, callee = %callee.text, ?active, "located call");
                return Some(CallSite {
                    callee,
                    open_paren: frame.open,
                    active,
                });
            }
            FrameKind::Paren | FrameKind::Bracket | FrameKind::Brace => unknown = false,
        }
    }
}
