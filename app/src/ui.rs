use crate::app::AudiogramApp;

use audiogram::{Band, BoxColor, Ear, EarReport, Notice, Report, Session};
use eframe::egui::{self, Color32, RichText, Ui};

const NOTE: &str = "Questo sistema utilizza modelli di machine learning per prevedere la \
presenza di problemi uditivi in base ai valori di frequenza audiometrica immessi.";

const NOTE_DETAIL: &str = "Le differenze rispetto ai valori ideali vengono calcolate per \
facilitare la diagnosi. Questo modello potrebbe non essere accurato al 100%.";

/// Draws the whole form in one scrollable central panel.
pub fn draw_central_panel(app: &mut AudiogramApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Previsione del Test Audiometrico");
            ui.label(
                "Inserisci i valori delle frequenze per le orecchie sinistra e destra \
                 per determinare se l'udito è normale o se ci sono problemi.",
            );
            ui.add_space(8.0);

            draw_notice(&app.session, ui);
            draw_inputs(&mut app.session, ui);

            ui.add_space(8.0);
            ui.strong(format!(
                "File Caricato Da: {}",
                app.session.source().display()
            ));

            if ui.button("Prevedi").clicked() {
                app.on_predict();
            }

            if let Some(report) = app.session.report() {
                draw_report(report, ui);
            } else if let Some(error) = app.session.last_error() {
                ui.colored_label(Color32::RED, error.to_string());
            }

            ui.add_space(12.0);
            draw_note(ui);
        });
    });
}

fn draw_notice(session: &Session, ui: &mut Ui) {
    let Some(notice) = session.notice() else {
        return;
    };
    match notice {
        Notice::Rejected(_) => {
            ui.colored_label(Color32::from_rgb(200, 30, 30), notice.message());
        }
        Notice::Loaded { .. } => {
            egui::Frame::default()
                .fill(Color32::from_gray(242))
                .corner_radius(8.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(notice.message())
                            .strong()
                            .color(Color32::from_gray(85)),
                    );
                });
        }
    }
    ui.add_space(8.0);
}

/// Six numeric fields per ear, minimum 0.0, step 1.0.
fn draw_inputs(session: &mut Session, ui: &mut Ui) {
    for ear in Ear::BOTH {
        egui::Grid::new(("bands", ear as u8))
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                let reading = session.reading_mut(ear);
                for band in Band::ALL {
                    ui.label(format!("{ear} {band}"));
                    ui.add(
                        egui::DragValue::new(reading.band_mut(band))
                            .range(0.0..=f64::MAX)
                            .speed(1.0),
                    );
                    ui.end_row();
                }
            });
        ui.add_space(6.0);
    }
}

fn draw_report(report: &Report, ui: &mut Ui) {
    ui.add_space(8.0);
    ui.heading("Valori Inseriti:");
    for ear in report.ears() {
        ui.label(format!("Frequenze {}: {}", ear.ear, ear.reading));
    }

    ui.heading("Percentuale del Problema:");
    for ear in report.ears() {
        ui.label(ear.deviation_line());
    }

    ui.heading("Risultati della Previsione:");
    for ear in report.ears() {
        result_box(ear, ui);
    }
}

/// Colored box with the label of one ear: green for normal, red for problem.
fn result_box(ear: &EarReport, ui: &mut Ui) {
    egui::Frame::default()
        .fill(box_fill(ear.box_color()))
        .corner_radius(10.0)
        .inner_margin(15.0)
        .outer_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(ear.box_text()).strong().color(Color32::WHITE));
        });
}

fn box_fill(color: BoxColor) -> Color32 {
    let [r, g, b] = color.rgb();
    Color32::from_rgb(r, g, b)
}

fn draw_note(ui: &mut Ui) {
    egui::CollapsingHeader::new("Mostra Nota")
        .default_open(false)
        .show(ui, |ui| {
            egui::Frame::default()
                .fill(Color32::from_rgba_unmultiplied(0, 128, 255, 26))
                .stroke(egui::Stroke::new(3.0, Color32::from_rgb(0, 128, 255)))
                .corner_radius(15.0)
                .inner_margin(15.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(format!("Nota: {NOTE}")).strong());
                    ui.label(RichText::new(NOTE_DETAIL).strong());
                });
        });
}
