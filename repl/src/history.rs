//! Submitted-line history with cursor-style navigation.
//!
//! `index` counts steps back from the newest end: 0 is "at end" (showing the line being
//! edited), `len()` is "at start" (showing the oldest entry).

use std::collections::VecDeque;

use tracing::debug;

use crate::config::HistoryConfig;

/// Which entries a matching navigation step may land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFilter<'a> {
    Any,
    Prefix(&'a str),
    Substring(&'a str),
}

impl EntryFilter<'_> {
    fn accepts(&self, entry: &str) -> bool {
        match self {
            EntryFilter::Any => true,
            EntryFilter::Prefix(prefix) => entry.starts_with(prefix),
            EntryFilter::Substring(needle) => entry.contains(needle),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryBuffer {
    /// Oldest first.
    entries: VecDeque<String>,
    index: usize,
    /// The unsaved line, shown again when navigating forward past the newest entry.
    entered: String,
    config: HistoryConfig,
}

impl HistoryBuffer {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// A buffer pre-seeded with `entries`, oldest first. Seeds are taken as given: neither
    /// blank filtering nor the duplicates policy applies, only the capacity.
    pub fn with_entries<I, S>(entries: I, config: HistoryConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::new(config);
        history.entries = entries.into_iter().map(Into::into).collect();
        history.enforce_capacity();
        history
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(String::as_str)
    }

    pub fn entered(&self) -> &str {
        &self.entered
    }

    /// Showing the line being edited, past the newest entry.
    pub fn is_at_end(&self) -> bool {
        self.index == 0
    }

    /// Showing the oldest entry (trivially true for an empty buffer).
    pub fn is_at_start(&self) -> bool {
        self.index == self.entries.len()
    }

    /// Jumps to the oldest entry.
    pub fn first(&mut self) {
        self.index = self.entries.len();
    }

    /// Jumps past the newest entry.
    pub fn last(&mut self) {
        self.index = 0;
    }

    /// The entry `index` steps back from the end, or the edited line at 0.
    fn at(&self, index: usize) -> &str {
        match index {
            0 => &self.entered,
            n => &self.entries[self.entries.len() - n],
        }
    }

    /// One step towards older entries. Stays on the oldest entry once there.
    pub fn back(&mut self) -> &str {
        if self.entries.is_empty() {
            return &self.entered;
        }
        self.index = (self.index + 1).min(self.entries.len());
        self.at(self.index)
    }

    /// One step towards newer entries, ending on the edited line.
    pub fn forward(&mut self) -> &str {
        self.index = self.index.saturating_sub(1);
        self.at(self.index)
    }

    /// Steps back to the nearest older entry accepted by `filter`. Without one, the position
    /// is unchanged and the current entry is returned again.
    pub fn back_matching(&mut self, filter: EntryFilter<'_>) -> &str {
        if let Some(found) =
            (self.index + 1..=self.entries.len()).find(|&i| filter.accepts(self.at(i)))
        {
            self.index = found;
        }
        self.at(self.index)
    }

    /// Steps forward to the nearest newer entry accepted by `filter`, or to the edited line
    /// when there is none.
    pub fn forward_matching(&mut self, filter: EntryFilter<'_>) -> &str {
        self.index = (1..self.index)
            .rev()
            .find(|&i| filter.accepts(self.at(i)))
            .unwrap_or(0);
        self.at(self.index)
    }

    /// Records a submitted line and returns to the end.
    ///
    /// Trailing newlines are stripped and blank submissions are dropped. When duplicates are
    /// not allowed, earlier copies of the line are removed first.
    pub fn append(&mut self, line: &str) {
        self.index = 0;
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            debug!("skipping blank history entry");
            return;
        }
        if !self.config.allow_duplicates {
            self.entries.retain(|entry| entry != line);
        }
        self.entries.push_back(line.to_string());
        self.enforce_capacity();
    }

    /// Stores the line being edited so navigating back to the end restores it.
    pub fn enter(&mut self, line: &str) {
        self.entered = line.to_string();
    }

    /// Forgets the edited line and returns to the end.
    pub fn reset(&mut self) {
        self.entered.clear();
        self.index = 0;
    }

    fn enforce_capacity(&mut self) {
        if self.config.capacity == 0 {
            return;
        }
        while self.entries.len() > self.config.capacity {
            self.entries.pop_front();
        }
        self.index = self.index.min(self.entries.len());
    }
}
