//! wordfreq Core Library
//!
//! Core library for wordfreq - counts whitespace-delimited tokens in a text
//! file and renders them as a frequency report, most frequent first.

pub mod config;
pub mod counter;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod session;
pub mod types;

pub use config::Config;
pub use counter::{CountOptions, WhitespaceMode, WordCounter};
pub use error::{Error, Result, READ_ERROR_PREFIX};
pub use presenter::{format_frequencies, Presenter, ReportFormat, ReportOptions, SortOrder};
pub use session::{AnalysisSession, SessionOutcome};
pub use types::{FrequencyEntry, FrequencyReport, WordFrequencyMap};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
