//! Matching typed text against candidate names.
//!
//! `Simple` and `Substring` are plain case-sensitive string tests, results sorted by label.
//! `Fuzzy` is an ordered subsequence match that ignores ASCII case and `_`; results are
//! ranked by [`fuzzy_score_cmp`], ties broken by label.

use std::cmp::Ordering;

use crate::config::AutocompleteMode;

/// Ranking signals of one subsequence match. Better ranks earlier.
///
/// - `is_prefix`: the name starts with the query.
/// - `gap_sum`: skipped characters between matched ones (smaller is better).
/// - `max_run`: longest run of adjacent matched characters (larger is better).
/// - `first_pos`: char index of the first matched character (smaller is better).
/// - `name_len`: chars in the name, the last tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FuzzyScore {
    pub(crate) is_prefix: bool,
    pub(crate) gap_sum: usize,
    pub(crate) max_run: usize,
    pub(crate) first_pos: usize,
    pub(crate) name_len: usize,
}

/// Scores `query` as a subsequence of `name`, both compared as given.
///
/// Characters are matched greedily, each at the earliest position after the previous one.
/// `None` when `query` is empty or not a subsequence.
pub(crate) fn fuzzy_score(query: &str, name: &str) -> Option<FuzzyScore> {
    let query: Vec<char> = query.chars().collect();
    let name: Vec<char> = name.chars().collect();
    if query.is_empty() {
        return None;
    }

    let mut positions = Vec::with_capacity(query.len());
    let mut next = 0usize;
    for &qc in &query {
        let offset = name.get(next..)?.iter().position(|&c| c == qc)?;
        positions.push(next + offset);
        next += offset + 1;
    }

    let mut gap_sum = 0usize;
    let mut max_run = 1usize;
    let mut run = 1usize;
    for pair in positions.windows(2) {
        if pair[1] == pair[0] + 1 {
            run += 1;
            max_run = max_run.max(run);
        } else {
            run = 1;
            gap_sum += pair[1] - pair[0] - 1;
        }
    }

    Some(FuzzyScore {
        is_prefix: name.starts_with(&query),
        gap_sum,
        max_run,
        first_pos: positions[0],
        name_len: name.len(),
    })
}

/// Best first: prefix matches, then tighter gaps, longer runs, earlier starts, shorter
/// names.
pub(crate) fn fuzzy_score_cmp(a: FuzzyScore, b: FuzzyScore) -> Ordering {
    b.is_prefix
        .cmp(&a.is_prefix)
        .then_with(|| a.gap_sum.cmp(&b.gap_sum))
        .then_with(|| b.max_run.cmp(&a.max_run))
        .then_with(|| a.first_pos.cmp(&b.first_pos))
        .then_with(|| a.name_len.cmp(&b.name_len))
}

/// Lowercases ASCII and drops `_`.
pub(crate) fn normalize_for_match(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A completion candidate: `name` is matched, `label` is offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub(crate) name: String,
    pub(crate) label: String,
}

/// Keeps the candidates `query` selects under `mode` and returns their labels in offer
/// order, without duplicates.
pub(crate) fn select(
    mode: AutocompleteMode,
    query: &str,
    candidates: impl IntoIterator<Item = Candidate>,
) -> Vec<String> {
    let query_norm = normalize_for_match(query);

    let mut labels = match mode {
        AutocompleteMode::Fuzzy if !query_norm.is_empty() => {
            let mut scored: Vec<(FuzzyScore, String)> = candidates
                .into_iter()
                .filter_map(|c| {
                    let score = fuzzy_score(&query_norm, &normalize_for_match(&c.name))?;
                    Some((score, c.label))
                })
                .collect();
            scored.sort_by(|(sa, la), (sb, lb)| fuzzy_score_cmp(*sa, *sb).then_with(|| la.cmp(lb)));
            scored.into_iter().map(|(_, label)| label).collect()
        }
        AutocompleteMode::Substring => {
            let mut labels: Vec<String> = candidates
                .into_iter()
                .filter(|c| c.name.contains(query))
                .map(|c| c.label)
                .collect();
            labels.sort();
            labels
        }
        // A fuzzy query of only underscores says nothing beyond its prefix.
        AutocompleteMode::Simple | AutocompleteMode::Fuzzy => {
            let mut labels: Vec<String> = candidates
                .into_iter()
                .filter(|c| c.name.starts_with(query))
                .map(|c| c.label)
                .collect();
            labels.sort();
            labels
        }
    };

    let mut seen = std::collections::HashSet::new();
    labels.retain(|label| seen.insert(label.clone()));
    labels
}
