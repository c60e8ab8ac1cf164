use std::path::PathBuf;
use thiserror::Error;

/// Prefix shown on the display surface when the selected file cannot be read.
pub const READ_ERROR_PREFIX: &str = "An error occurred while reading the file: ";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl Error {
    /// True for failures while opening or reading the analysed text.
    ///
    /// `Io` only ever comes from the counter; config and logging I/O use
    /// their own variants.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Error::Read { .. } | Error::Io(_))
    }

    /// Message routed to the display surface.
    ///
    /// Read failures get the fixed [`READ_ERROR_PREFIX`] followed by the
    /// underlying detail; anything else is shown as-is.
    pub fn user_message(&self) -> String {
        match self {
            Error::Read { path, source } => {
                format!("{}{} ({})", READ_ERROR_PREFIX, path.display(), source)
            }
            Error::Io(source) => format!("{}{}", READ_ERROR_PREFIX, source),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_read_error_display() {
        let err = Error::Read {
            path: PathBuf::from("/tmp/missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Failed to read"));
        assert!(msg.contains("/tmp/missing.txt"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn test_read_error_user_message() {
        let err = Error::Read {
            path: PathBuf::from("notes.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        };
        assert_eq!(
            err.user_message(),
            "An error occurred while reading the file: notes.txt (Permission denied)"
        );
        assert!(err.is_read_failure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "stream cut short");
        let err: Error = io_err.into();
        assert!(format!("{}", err).contains("IO error"));
        assert!(err.is_read_failure());
        assert_eq!(
            err.user_message(),
            "An error occurred while reading the file: stream cut short"
        );
    }

    #[test]
    fn test_invalid_config_display() {
        let err = Error::InvalidConfig("min_count must be > 0".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid configuration"));
        assert!(msg.contains("min_count"));
        assert!(!err.is_read_failure());
        assert_eq!(err.user_message(), msg);
    }

    #[test]
    fn test_config_io_is_not_read_failure() {
        let err = Error::ConfigIo {
            path: PathBuf::from("wordfreq.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        };

        assert!(!err.is_read_failure());
        assert!(!err.user_message().starts_with(READ_ERROR_PREFIX));
        assert!(err.user_message().contains("wordfreq.toml"));
    }

    #[test]
    fn test_config_parse_conversion() {
        let parse_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: Error = parse_err.into();
        assert!(format!("{}", err).contains("Config parse error"));
    }

    #[test]
    fn test_error_debug() {
        let err = Error::Logging("already set".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Logging"));
    }

    #[test]
    fn test_result_type_err() {
        let result: Result<i32> = Err(Error::InvalidConfig("test error".to_string()));
        assert!(result.is_err());

        if let Err(e) = result {
            assert!(format!("{}", e).contains("test error"));
        }
    }
}
