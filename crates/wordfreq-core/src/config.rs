use crate::counter::{CountOptions, WhitespaceMode, WordCounter};
use crate::presenter::{Presenter, ReportFormat, ReportOptions, SortOrder};
use crate::session::AnalysisSession;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "wordfreq.toml";

/// Main configuration for wordfreq
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tokenizing settings
    pub analysis: AnalysisConfig,

    /// Report rendering settings
    pub report: ReportConfig,

    /// Logging configuration
    pub logging: LogConfig,
}

/// Tokenizer/counter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Characters treated as token separators (default: unicode)
    pub whitespace: WhitespaceMode,

    /// Fail on invalid UTF-8 instead of replacing it (default: false)
    pub strict_utf8: bool,
}

/// Report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Tie-break for equal counts (default: count_then_token)
    pub order: SortOrder,

    /// Output format (default: text)
    pub format: ReportFormat,

    /// Drop tokens seen fewer times than this (default: 1)
    pub min_count: u64,

    /// Show only the N most frequent tokens (default: all)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when RUST_LOG is unset (default: warn)
    pub level: String,

    /// Emit JSON lines on stderr (default: false)
    pub json: bool,

    /// Directory for a daily-rolling log file (default: none)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Log file name prefix inside `log_dir` (default: wordfreq.log)
    pub file_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            order: SortOrder::default(),
            format: ReportFormat::default(),
            min_count: 1,
            limit: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
            log_dir: None,
            file_name: "wordfreq.log".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use wordfreq_core::config::Config;
    ///
    /// let config = Config::load_from_file("wordfreq.toml").unwrap();
    /// println!("Minimum count: {}", config.report.min_count);
    /// ```
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            info!("Loading configuration from: {:?}", path);
            Self::load_from_file(path)
        } else {
            debug!("Configuration file not found: {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to TOML file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.report.min_count == 0 {
            return Err(Error::InvalidConfig("Report min_count must be > 0".to_string()));
        }

        if self.report.limit == Some(0) {
            return Err(Error::InvalidConfig("Report limit must be > 0".to_string()));
        }

        if self.logging.file_name.trim().is_empty() {
            return Err(Error::InvalidConfig("Log file name must not be empty".to_string()));
        }

        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.logging.level) {
            return Err(Error::InvalidConfig(format!(
                "Log level '{}' is not a valid filter: {}",
                self.logging.level, e
            )));
        }

        Ok(())
    }

    pub fn count_options(&self) -> CountOptions {
        CountOptions {
            whitespace: self.analysis.whitespace,
            strict_utf8: self.analysis.strict_utf8,
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            order: self.report.order,
            format: self.report.format,
            min_count: self.report.min_count,
            limit: self.report.limit,
        }
    }

    /// Full path of the log file, when file logging is enabled.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.logging
            .log_dir
            .as_ref()
            .map(|dir| dir.join(&self.logging.file_name))
    }

    /// Build an [`AnalysisSession`] wired with these settings.
    pub fn session(&self) -> AnalysisSession {
        AnalysisSession::new(
            WordCounter::new(self.count_options()),
            Presenter::new(self.report_options()),
        )
    }
}
