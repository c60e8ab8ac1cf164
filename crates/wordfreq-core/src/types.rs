use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-token bookkeeping inside a [`WordFrequencyMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TokenCount {
    count: u64,
    first_seen: usize,
}

/// Token → occurrence count for one analysed text.
///
/// Built fresh for every analysis. Iteration order is unspecified; the
/// presenter decides ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencyMap {
    counts: HashMap<String, TokenCount>,
    total_tokens: u64,
    lines: u64,
}

impl WordFrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `token`.
    pub fn record(&mut self, token: &str) {
        self.total_tokens += 1;
        if let Some(entry) = self.counts.get_mut(token) {
            entry.count += 1;
            return;
        }
        let first_seen = self.counts.len();
        self.counts.insert(
            token.to_string(),
            TokenCount {
                count: 1,
                first_seen,
            },
        );
    }

    // One more line consumed from the source.
    pub(crate) fn record_line(&mut self) {
        self.lines += 1;
    }

    pub fn get(&self, token: &str) -> Option<u64> {
        self.counts.get(token).map(|c| c.count)
    }

    /// Index at which `token` first appeared among distinct tokens.
    pub fn first_seen(&self, token: &str) -> Option<usize> {
        self.counts.get(token).map(|c| c.first_seen)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Lines read while building the map.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(token, c)| (token.as_str(), c.count))
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordFrequencyMap {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut map = Self::new();
        for token in iter {
            map.record(token.as_ref());
        }
        map
    }
}

/// One `(token, count)` line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub token: String,
    pub count: u64,
}

impl FrequencyEntry {
    pub fn new(token: impl Into<String>, count: u64) -> Self {
        Self {
            token: token.into(),
            count,
        }
    }
}

/// Serializable report used by the JSON output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyReport {
    pub total_tokens: u64,
    pub distinct_tokens: usize,
    pub entries: Vec<FrequencyEntry>,
}
