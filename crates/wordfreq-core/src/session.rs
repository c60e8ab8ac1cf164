use crate::counter::WordCounter;
use crate::presenter::Presenter;
use crate::types::WordFrequencyMap;
use std::path::Path;
use tracing::info;

/// What the display surface currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionOutcome {
    /// Nothing analysed yet.
    #[default]
    Idle,
    /// Rendered report of the last successful analysis.
    Report(String),
    /// User-facing error message of the last failed analysis.
    Failed(String),
}

impl SessionOutcome {
    pub fn text(&self) -> &str {
        match self {
            SessionOutcome::Idle => "",
            SessionOutcome::Report(text) | SessionOutcome::Failed(text) => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SessionOutcome::Failed(_))
    }
}

/// Drives one interaction shell: file chosen → count → render → display.
///
/// Keeps the last successfully counted map. A failed analysis changes what is
/// displayed but never discards that map.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    counter: WordCounter,
    presenter: Presenter,
    last_result: Option<WordFrequencyMap>,
    outcome: SessionOutcome,
}

impl AnalysisSession {
    pub fn new(counter: WordCounter, presenter: Presenter) -> Self {
        Self {
            counter,
            presenter,
            last_result: None,
            outcome: SessionOutcome::Idle,
        }
    }

    /// Analyse `path` to completion and update the display.
    pub fn analyze(&mut self, path: &Path) -> &SessionOutcome {
        info!(path = %path.display(), "Analyzing file");

        let rendered = self
            .counter
            .count_path(path)
            .and_then(|map| self.presenter.render(&map).map(|text| (map, text)));

        self.outcome = match rendered {
            Ok((map, text)) => {
                self.last_result = Some(map);
                SessionOutcome::Report(text)
            }
            Err(e) => {
                info!(path = %path.display(), error = %e, "Analysis failed");
                SessionOutcome::Failed(e.user_message())
            }
        };

        &self.outcome
    }

    pub fn outcome(&self) -> &SessionOutcome {
        &self.outcome
    }

    pub fn display_text(&self) -> &str {
        self.outcome.text()
    }

    /// Map from the most recent successful analysis, if any.
    pub fn last_result(&self) -> Option<&WordFrequencyMap> {
        self.last_result.as_ref()
    }
}
