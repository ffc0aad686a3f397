use serde::{Deserialize, Serialize};

/// Default for `ReplConfig.hist_length`.
pub const DEFAULT_HIST_LENGTH: usize = 100;

/// How typed text is matched against completion candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutocompleteMode {
    /// Candidates starting with the typed text.
    #[default]
    Simple,
    /// Candidates containing the typed text.
    Substring,
    /// Candidates containing the typed characters in order.
    Fuzzy,
}

/// Per-session settings. Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show the signature of the call under the cursor.
    pub arg_spec: bool,
    pub autocomplete_mode: AutocompleteMode,
    /// History entries kept (0 keeps everything).
    pub hist_length: usize,
    /// Keep repeated submissions as separate history entries.
    pub hist_duplicates: bool,
    /// Spaces a tab inserts when only indentation precedes the cursor.
    pub tab_length: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            arg_spec: true,
            autocomplete_mode: AutocompleteMode::default(),
            hist_length: DEFAULT_HIST_LENGTH,
            hist_duplicates: true,
            tab_length: 4,
        }
    }
}

impl ReplConfig {
    pub fn history(&self) -> HistoryConfig {
        HistoryConfig {
            capacity: self.hist_length,
            allow_duplicates: self.hist_duplicates,
        }
    }
}

/// Settings of a [`crate::HistoryBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of entries; the oldest are dropped first. 0 is unbounded.
    pub capacity: usize,
    pub allow_duplicates: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            allow_duplicates: true,
        }
    }
}
