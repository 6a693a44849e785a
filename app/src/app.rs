use crate::ui;

use audiogram::{AppConfig, Models, Session};
use eframe::egui;
use eframe::{App, Frame};
use tracing::warn;

/// The form application.
/// Owns the read-only classifiers and the single session being edited.
pub struct AudiogramApp {
    /// Loaded once at startup, never mutated.
    pub models: Models,
    /// Readings, notices and the last report.
    pub session: Session,
}

impl AudiogramApp {
    pub fn new(config: AppConfig, models: Models) -> Self {
        Self {
            models,
            session: Session::start(config.input.path),
        }
    }

    /// Handles the "Prevedi" button.
    pub fn on_predict(&mut self) {
        if let Err(e) = self.session.predict(&self.models) {
            warn!(error = %e, "prediction failed");
        }
    }
}

impl App for AudiogramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ui::draw_central_panel(self, ctx);
    }
}
