//! Completion, signature help and history state for an interactive line editor.
//!
//! The pure scanning lives in the `scanner` crate. This crate holds what a session keeps
//! between keystrokes ([`MatchesIterator`], [`HistoryBuffer`], [`Session`]) and the seams
//! to the host: [`CallableResolver`] for signatures, [`CandidateProvider`] for completion
//! candidates and [`EditorBackend`] for the edited line.
mod argspec;
mod completion;
mod config;
mod error;
mod history;
mod matches;
mod session;
mod tests;

pub use argspec::{ArgspecResult, BoundParam, CallableResolver, Param, Signature, get_argspec};
pub use completion::{CandidateProvider, Namespace, NamespaceCompleter, Value, ValueKind};
pub use config::{AutocompleteMode, DEFAULT_HIST_LENGTH, HistoryConfig, ReplConfig};
pub use error::{MatchesError, ResolveError};
pub use history::{EntryFilter, HistoryBuffer};
pub use matches::{Cycle, MatchState, MatchesIterator};
pub use scanner::{ActiveParameter, ContextKind, LineContext, Span};
pub use session::{EditorBackend, Session};

/// What the cursor sits on and the signature of the call around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpResult {
    pub context: LineContext,
    pub argspec: Option<ArgspecResult>,
}

pub fn help(line: &str, cursor: usize, resolver: &dyn CallableResolver) -> HelpResult {
    HelpResult {
        context: LineContext::detect(cursor, line),
        argspec: get_argspec(cursor, line, resolver),
    }
}
