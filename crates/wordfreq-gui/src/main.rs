// wordfreq desktop shell: pick a file, see its token frequencies.

mod app;

use anyhow::{Context, Result};
use app::{TextAnalyzerApp, WINDOW_TITLE};
use eframe::egui;
use tracing::info;
use wordfreq_core::config::{Config, DEFAULT_CONFIG_FILE};
use wordfreq_core::{logging, VERSION};

fn main() -> Result<()> {
    let config = Config::load_or_default(DEFAULT_CONFIG_FILE)
        .with_context(|| format!("Failed to load configuration file {}", DEFAULT_CONFIG_FILE))?;
    config
        .validate()
        .context("Configuration validation failed")?;

    let _guard = logging::init_logging(&config.logging).context("Failed to initialize logging")?;
    info!("wordfreq GUI v{} starting", VERSION);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let session = config.session();
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(TextAnalyzerApp::new(session)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run window: {}", e))?;

    info!("Window closed");
    Ok(())
}
