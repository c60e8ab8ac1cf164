//! Tracing setup shared by the CLI and the desktop shell.
//!
//! stdout carries the report, so every log line goes to stderr and,
//! optionally, to a daily-rolling file.

use crate::config::LogConfig;
use crate::{Error, Result};
use std::io::IsTerminal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.level`. Keep the returned guard alive for as
/// long as file logging should flush.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::Logging(format!("invalid filter '{}': {}", config.level, e)))?;

    let mut layers: Vec<BoxedLayer> = vec![stderr_layer(config)];

    let guard = match file_layer(config)? {
        Some((layer, guard)) => {
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    tracing::debug!("Logging initialized");

    Ok(guard)
}

fn stderr_layer(config: &LogConfig) -> BoxedLayer {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.json {
        layer.json().boxed()
    } else {
        // No escape codes when stderr is redirected to a file or pipe.
        layer.with_ansi(std::io::stderr().is_terminal()).boxed()
    }
}

/// Daily-rolling file layer, created only when `log_dir` is set.
fn file_layer(config: &LogConfig) -> Result<Option<(BoxedLayer, WorkerGuard)>> {
    let Some(dir) = &config.log_dir else {
        return Ok(None);
    };

    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Logging(format!("cannot create log directory {}: {}", dir.display(), e))
    })?;

    let file_appender = tracing_appender::rolling::daily(dir, &config.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .boxed();

    Ok(Some((layer, guard)))
}
