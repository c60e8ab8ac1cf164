//! Frequency report rendering.
//!
//! Turns a [`WordFrequencyMap`] into an ordered list of entries and renders
//! it as `token: count` lines or as a JSON document.

use crate::types::{FrequencyEntry, FrequencyReport, WordFrequencyMap};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Write;

/// Ordering applied to tokens with equal counts. Counts always sort descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Equal counts sorted lexicographically by token.
    #[default]
    CountThenToken,
    /// Equal counts kept in the order the tokens first appeared.
    CountThenFirstSeen,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub order: SortOrder,
    pub format: ReportFormat,
    /// Entries below this count are dropped.
    pub min_count: u64,
    /// Keep at most this many entries.
    pub limit: Option<usize>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            order: SortOrder::default(),
            format: ReportFormat::default(),
            min_count: 1,
            limit: None,
        }
    }
}

/// Render the canonical text report: every token, most frequent first, ties
/// broken by token.
pub fn format_frequencies(map: &WordFrequencyMap) -> String {
    render_text(&Presenter::default().entries(map))
}

fn render_text(entries: &[FrequencyEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}: {}", entry.token, entry.count);
    }
    out
}

#[derive(Debug, Clone, Default)]
pub struct Presenter {
    options: ReportOptions,
}

impl Presenter {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Sorted, filtered and truncated entries.
    pub fn entries(&self, map: &WordFrequencyMap) -> Vec<FrequencyEntry> {
        let mut ranked: Vec<(&str, u64)> = map
            .iter()
            .filter(|(_, count)| *count >= self.options.min_count)
            .collect();

        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| self.tie_break(map, a.0, b.0)));

        if let Some(limit) = self.options.limit {
            ranked.truncate(limit);
        }

        ranked
            .into_iter()
            .map(|(token, count)| FrequencyEntry::new(token, count))
            .collect()
    }

    fn tie_break(&self, map: &WordFrequencyMap, a: &str, b: &str) -> Ordering {
        match self.options.order {
            SortOrder::CountThenToken => a.cmp(b),
            SortOrder::CountThenFirstSeen => map.first_seen(a).cmp(&map.first_seen(b)),
        }
    }

    /// Render `map` in the configured format.
    pub fn render(&self, map: &WordFrequencyMap) -> Result<String> {
        let entries = self.entries(map);
        match self.options.format {
            ReportFormat::Text => Ok(render_text(&entries)),
            ReportFormat::Json => {
                let report = FrequencyReport {
                    total_tokens: map.total_tokens(),
                    distinct_tokens: map.len(),
                    entries,
                };
                let mut json = serde_json::to_string_pretty(&report)?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}
