use eframe::egui;
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use tracing::debug;
use wordfreq_core::AnalysisSession;

pub const WINDOW_TITLE: &str = "Text Analyzer";

/// One button, one read-only output pane.
pub struct TextAnalyzerApp {
    session: AnalysisSession,
    current_file: Option<PathBuf>,
}

impl TextAnalyzerApp {
    pub fn new(session: AnalysisSession) -> Self {
        Self {
            session,
            current_file: None,
        }
    }

    /// Analyse `path` and route the result (or error) to the output pane.
    pub fn open(&mut self, path: &Path) {
        self.session.analyze(path);
        self.current_file = Some(path.to_path_buf());
    }

    pub fn output(&self) -> &str {
        self.session.display_text()
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open File").clicked() {
                match FileDialog::new().pick_file() {
                    Some(path) => self.open(&path),
                    None => debug!("File dialog cancelled"),
                }
            }

            if let Some(path) = &self.current_file {
                let name = path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned();
                let color = if self.session().outcome().is_failure() {
                    egui::Color32::from_rgb(220, 90, 90)
                } else {
                    egui::Color32::from_rgb(150, 150, 150)
                };
                ui.label(egui::RichText::new(name).color(color).size(11.0));
            }
        });
    }
}

impl eframe::App for TextAnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_toolbar(ui);
            ui.add_space(10.0);

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let mut text = self.output();
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .desired_width(f32::INFINITY)
                            .desired_rows(24)
                            .code_editor(),
                    );
                });
        });
    }
}
