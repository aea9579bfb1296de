use super::{render as render_view, CertificateUploader};
use eframe::egui::{self, Color32, RichText};
use rfd::FileDialog;
use std::path::PathBuf;

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const PREVIEW_MAX_WIDTH: f32 = 480.0;

fn display_name(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "No file chosen".to_string())
}

impl CertificateUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Certificate Generator");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Upload the attendee sheet and a certificate template")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);

                ui.group(|ui| {
                    ui.label("Excel sheet (Name, Course, Position, Event)");
                    ui.horizontal(|ui| {
                        if ui.button("📄 Choose Excel").clicked() {
                            if let Some(path) = FileDialog::new().pick_file() {
                                self.select_excel(Some(path));
                            }
                        }
                        ui.label(display_name(&self.form.excel));
                        if self.form.excel.is_some() && ui.small_button("✖").clicked() {
                            self.select_excel(None);
                        }
                    });
                });

                ui.add_space(10.0);

                ui.group(|ui| {
                    ui.label("Certificate template");
                    ui.horizontal(|ui| {
                        if ui.button("🖼 Choose Template").clicked() {
                            if let Some(path) = FileDialog::new().pick_file() {
                                self.select_template(Some(path));
                            }
                        }
                        ui.label(display_name(&self.form.template));
                        if self.form.template.is_some() && ui.small_button("✖").clicked() {
                            self.select_template(None);
                        }
                    });

                    if self.preview.state().visible {
                        ui.add_space(8.0);
                        match self.preview_texture(ctx) {
                            Some(texture) => {
                                ui.add(egui::Image::new(&texture).max_width(PREVIEW_MAX_WIDTH));
                                if let Some(source) = &self.preview.state().source {
                                    if ui.small_button("📋 Copy as data URL").clicked() {
                                        ui.output_mut(|o| o.copied_text = source.clone());
                                    }
                                }
                            }
                            None => {
                                ui.colored_label(
                                    Color32::from_rgb(150, 150, 150),
                                    "Preview unavailable for this file",
                                );
                            }
                        }
                    }
                });

                ui.add_space(20.0);

                ui.vertical_centered(|ui| {
                    let button = egui::Button::new("📤 Generate Certificates")
                        .min_size(egui::vec2(200.0, 40.0));
                    if ui.add(button).clicked() {
                        self.submit();
                    }

                    ui.add_space(10.0);

                    let view = render_view(self.controller.state());
                    if view.spinner_visible {
                        ui.add(egui::Spinner::new().color(ACCENT));
                    }
                    if !view.status_text.is_empty() {
                        ui.label(&view.status_text);
                    }
                    if view.download_visible {
                        ui.add_space(5.0);
                        if ui.button("⬇ Download Certificates").clicked() {
                            self.open_download();
                        }
                    }

                    if let Some(error) = &self.error_message {
                        ui.add_space(5.0);
                        ui.colored_label(Color32::from_rgb(220, 50, 50), error);
                    }
                });

                ui.add_space(20.0);
            });
        });
    }
}
