//! Cyclic navigation over completion candidates.
//!
//! The iterator captures the line and cursor it was filled for. Feeding it the same context
//! again keeps the selection, so repeated tab presses walk the list instead of restarting it.

use scanner::Span;
use tracing::trace;

use crate::completion::CandidateProvider;
use crate::error::MatchesError;

/// Selection state. `Empty` until the first `next`/`previous`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchState {
    #[default]
    Empty,
    Selected(usize),
}

#[derive(Debug, Clone, Default)]
pub struct MatchesIterator {
    matches: Vec<String>,
    state: MatchState,
    /// `(cursor, line)` of the last reset.
    origin: Option<(usize, String)>,
    /// The text the candidates replace, as located at the last reset.
    located: Span,
}

impl MatchesIterator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An iterator over `matches` for the given context, nothing selected yet.
    pub fn with_matches(
        cursor: usize,
        line: &str,
        matches: Vec<String>,
        provider: &dyn CandidateProvider,
    ) -> Self {
        let mut iter = Self::new();
        iter.update(cursor, line, matches, provider);
        iter
    }

    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// The word being completed.
    pub fn current_word(&self) -> &str {
        &self.located.text
    }

    /// Whether a match is selected.
    pub fn is_active(&self) -> bool {
        matches!(self.state, MatchState::Selected(_))
    }

    /// Selects the following match, wrapping around. `None` when there are no matches.
    pub fn next_match(&mut self) -> Option<&str> {
        if self.matches.is_empty() {
            return None;
        }
        let index = match self.state {
            MatchState::Empty => 0,
            MatchState::Selected(i) => (i + 1) % self.matches.len(),
        };
        self.state = MatchState::Selected(index);
        Some(&self.matches[index])
    }

    /// Selects the preceding match, wrapping around. From `Empty` this is the last match.
    pub fn previous_match(&mut self) -> Option<&str> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        let index = match self.state {
            MatchState::Empty | MatchState::Selected(0) => len - 1,
            MatchState::Selected(i) => i - 1,
        };
        self.state = MatchState::Selected(index);
        Some(&self.matches[index])
    }

    pub fn current(&self) -> Result<&str, MatchesError> {
        match self.state {
            MatchState::Selected(i) => self
                .matches
                .get(i)
                .map(String::as_str)
                .ok_or(MatchesError::NoCurrentMatch),
            MatchState::Empty => Err(MatchesError::NoCurrentMatch),
        }
    }

    /// Takes new candidates for `(cursor, line)`.
    ///
    /// Only a changed line or cursor replaces the matches and clears the selection; the
    /// replaced word is then located again through `provider`. For an unchanged line and
    /// cursor `matches` is ignored, even if the candidates themselves changed meanwhile
    /// (a rebound name, say). Call [`MatchesIterator::clear`] first to force a refresh.
    pub fn update(
        &mut self,
        cursor: usize,
        line: &str,
        matches: Vec<String>,
        provider: &dyn CandidateProvider,
    ) {
        if self
            .origin
            .as_ref()
            .is_some_and(|(c, l)| *c == cursor && l == line)
        {
            return;
        }
        self.located = provider
            .locate(cursor, line)
            .unwrap_or_else(|| Span::empty_at(cursor));
        trace!(cursor, word = %self.located.text, count = matches.len(), "matches reset");
        self.origin = Some((cursor, line.to_string()));
        self.matches = matches;
        self.state = MatchState::Empty;
    }

    /// The line with `candidate` in place of the located word, and the cursor after it.
    pub fn substitute(&self, candidate: &str) -> (usize, String) {
        let Some((_, line)) = &self.origin else {
            return (candidate.len(), candidate.to_string());
        };
        let (start, end) = (self.located.start, self.located.end);
        let (Some(head), Some(tail)) = (line.get(..start), line.get(end..)) else {
            return (start.min(line.len()), line.clone());
        };
        (start + candidate.len(), format!("{head}{candidate}{tail}"))
    }

    /// [`MatchesIterator::substitute`] with the selected match.
    pub fn cur_line(&self) -> Result<(usize, String), MatchesError> {
        Ok(self.substitute(self.current()?))
    }

    /// Longest prefix shared by every match.
    pub fn common_prefix(&self) -> &str {
        let Some((first, rest)) = self.matches.split_first() else {
            return "";
        };
        let mut len = first.len();
        for other in rest {
            let shared = first
                .char_indices()
                .zip(other.chars())
                .take_while(|((_, a), b)| a == b)
                .last()
                .map_or(0, |((i, a), _)| i + a.len_utf8());
            len = len.min(shared);
        }
        &first[..len]
    }

    /// Whether the matches share a prefix longer than the word being completed.
    pub fn is_cseq(&self) -> bool {
        self.common_prefix().len() > self.located.text.len()
    }

    /// Expands the word to the common prefix of the matches and refreshes the iterator for
    /// the new line. Once a single match is left the iterator is cleared.
    pub fn substitute_cseq(&mut self, provider: &dyn CandidateProvider) -> (usize, String) {
        let prefix = self.common_prefix().to_string();
        let (cursor, line) = self.substitute(&prefix);
        if self.matches.len() == 1 {
            self.clear();
        } else {
            self.update(cursor, &line, self.matches.clone(), provider);
        }
        (cursor, line)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Cycles through the matches forever without touching the selection.
    pub fn iter(&self) -> Cycle<'_> {
        Cycle {
            matches: &self.matches,
            pos: 0,
        }
    }
}

/// Endless iterator over a [`MatchesIterator`]'s matches. Empty when there are none.
#[derive(Debug, Clone)]
pub struct Cycle<'a> {
    matches: &'a [String],
    pos: usize,
}

impl<'a> Iterator for Cycle<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let item = self.matches.get(self.pos)?;
        self.pos = (self.pos + 1) % self.matches.len();
        Some(item)
    }
}

impl<'a> IntoIterator for &'a MatchesIterator {
    type Item = &'a str;
    type IntoIter = Cycle<'a>;

    fn into_iter(self) -> Cycle<'a> {
        self.iter()
    }
}
