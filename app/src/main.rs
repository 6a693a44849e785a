mod app;
mod ui;

use anyhow::Context;
use app::AudiogramApp;
use audiogram::{AppConfig, Models, telemetry};

fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = AppConfig::load().context("failed to resolve configuration")?;
    // The classifiers are loaded once; without them there is nothing to show.
    let models = Models::load(&config.models).context("failed to load classifier models")?;

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Previsione del Test Audiometrico",
        native_options,
        Box::new(move |_cc| Ok(Box::new(AudiogramApp::new(config, models)))),
    )
    .map_err(|e| anyhow::anyhow!("ui loop failed: {e}"))
}
