use thiserror::Error;

/// Misuse of [`crate::MatchesIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchesError {
    /// `current()` (or anything derived from it) before `next`/`previous` selected a match.
    #[error("no match is selected")]
    NoCurrentMatch,
}

/// Why a [`crate::CallableResolver`] could not produce a signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("name not found: {0}")]
    NotFound(String),
    #[error("not callable: {0}")]
    NotCallable(String),
    /// Evaluating the name failed for another reason.
    #[error("resolving {name} failed: {reason}")]
    Failed { name: String, reason: String },
}
