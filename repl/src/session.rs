//! One editing session: history, completion state and signature help driven from an editor.

use tracing::trace;

use crate::argspec::{ArgspecResult, CallableResolver, get_argspec};
use crate::completion::CandidateProvider;
use crate::config::ReplConfig;
use crate::history::HistoryBuffer;
use crate::matches::MatchesIterator;

/// The line editor a session drives. Supplied by the host.
pub trait EditorBackend {
    fn current_line(&self) -> &str;
    fn cursor_offset(&self) -> usize;
    fn set_line(&mut self, line: String, cursor: usize);
    /// Shows a message outside the edited line.
    fn echo(&mut self, text: &str);
}

#[derive(Debug, Clone)]
pub struct Session {
    config: ReplConfig,
    history: HistoryBuffer,
    matches: MatchesIterator,
    argspec: Option<ArgspecResult>,
    /// `(cursor, line)` this session last wrote to the editor by completing.
    written: Option<(usize, String)>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ReplConfig::default())
    }
}

impl Session {
    pub fn new(config: ReplConfig) -> Self {
        Self {
            history: HistoryBuffer::new(config.history()),
            config,
            matches: MatchesIterator::new(),
            argspec: None,
            written: None,
        }
    }

    pub fn config(&self) -> &ReplConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryBuffer {
        &mut self.history
    }

    pub fn matches(&self) -> &MatchesIterator {
        &self.matches
    }

    pub fn argspec(&self) -> Option<&ArgspecResult> {
        self.argspec.as_ref()
    }

    /// Looks up the signature of the call under the editor's cursor. Always `None` when
    /// `arg_spec` is off.
    pub fn update_argspec(
        &mut self,
        editor: &dyn EditorBackend,
        resolver: &dyn CallableResolver,
    ) -> Option<&ArgspecResult> {
        self.argspec = if self.config.arg_spec {
            get_argspec(editor.cursor_offset(), editor.current_line(), resolver)
        } else {
            None
        };
        self.argspec.as_ref()
    }

    /// Refreshes the matches for the editor's line. `false` when there are none.
    pub fn complete(&mut self, editor: &dyn EditorBackend, provider: &dyn CandidateProvider) -> bool {
        let (cursor, line) = (editor.cursor_offset(), editor.current_line());
        let matches = provider.complete(cursor, line);
        if matches.is_empty() {
            self.matches.clear();
            return false;
        }
        self.matches.update(cursor, line, matches, provider);
        true
    }

    /// Tab key. Indents when only whitespace precedes the cursor; otherwise expands the
    /// common prefix of the matches if that adds anything, else selects the next (or with
    /// `back`, the previous) match. Returns whether the line changed.
    pub fn tab(
        &mut self,
        editor: &mut dyn EditorBackend,
        provider: &dyn CandidateProvider,
        back: bool,
    ) -> bool {
        let cursor = editor.cursor_offset();
        let line = editor.current_line().to_string();

        if let Some((head, tail)) = line.get(..cursor).zip(line.get(cursor..))
            && head.trim().is_empty()
        {
            let indent = " ".repeat(self.config.tab_length);
            editor.set_line(format!("{head}{indent}{tail}"), cursor + indent.len());
            return true;
        }

        let ours = self
            .written
            .as_ref()
            .is_some_and(|(c, l)| *c == cursor && *l == line);
        if (!ours || self.matches.matches().is_empty()) && !self.complete(editor, provider) {
            return false;
        }

        let (new_cursor, new_line) = if self.matches.is_cseq() {
            self.matches.substitute_cseq(provider)
        } else {
            let selected = if back {
                self.matches.previous_match()
            } else {
                self.matches.next_match()
            };
            if selected.is_none() {
                return false;
            }
            match self.matches.cur_line() {
                Ok(substituted) => substituted,
                Err(_) => return false,
            }
        };
        trace!(cursor = new_cursor, line = %new_line, "tab completion");
        self.written = Some((new_cursor, new_line.clone()));
        editor.set_line(new_line, new_cursor);
        true
    }

    /// Enter key. Records the line in history, resets history navigation and completion
    /// state, clears the editor and returns the submitted line.
    pub fn submit(&mut self, editor: &mut dyn EditorBackend) -> String {
        let line = editor.current_line().to_string();
        self.history.append(&line);
        self.history.reset();
        self.matches.clear();
        self.argspec = None;
        self.written = None;
        editor.set_line(String::new(), 0);
        line
    }

    /// Shows the next older history entry. Leaving the edited line stores it first.
    pub fn history_back(&mut self, editor: &mut dyn EditorBackend) {
        if self.history.is_at_end() {
            self.history.enter(editor.current_line());
        }
        let entry = self.history.back().to_string();
        let cursor = entry.len();
        editor.set_line(entry, cursor);
    }

    /// Shows the next newer history entry, or the edited line past the newest.
    pub fn history_forward(&mut self, editor: &mut dyn EditorBackend) {
        let entry = self.history.forward().to_string();
        let cursor = entry.len();
        editor.set_line(entry, cursor);
    }

    /// Echoes the rendered signature of the current call. `false` when there is none.
    pub fn show_signature(&self, editor: &mut dyn EditorBackend) -> bool {
        match &self.argspec {
            Some(argspec) => {
                editor.echo(&argspec.render());
                true
            }
            None => false,
        }
    }
}
