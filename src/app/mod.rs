mod state;
mod ui;

use crate::config::Config;
use crate::form::FormState;
use crate::preview::PreviewHandler;
use crate::upload::{HttpTransport, UploadController};
use eframe::{egui, App};
pub use state::{render, FailureReason, UiState};
#[cfg(test)]
pub use state::{IN_PROGRESS_TEXT, SERVER_ERROR_TEXT, SUCCESS_TEXT};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;

pub struct CertificateUploader {
    config: Config,
    runtime: Runtime,
    form: FormState,
    preview: PreviewHandler,
    preview_texture: Option<(u64, egui::TextureHandle)>,
    controller: UploadController<HttpTransport>,
    error_message: Option<String>,
}

impl CertificateUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, runtime: Runtime) -> Self {
        tracing::info!(server = %config.server, "initializing certificate uploader");
        let transport = HttpTransport::new(config.upload_url());
        Self {
            config,
            runtime,
            form: FormState::default(),
            preview: PreviewHandler::default(),
            preview_texture: None,
            controller: UploadController::new(transport),
            error_message: None,
        }
    }

    pub fn select_excel(&mut self, file: Option<PathBuf>) {
        self.form.excel = file;
    }

    /// Template selection feeds both the form and the preview.
    pub fn select_template(&mut self, file: Option<PathBuf>) {
        self.form.template = file.clone();
        self.preview.on_file_change(self.runtime.handle(), file);
    }

    pub fn submit(&mut self) {
        self.error_message = None;
        self.controller.submit(self.runtime.handle(), &self.form);
    }

    pub fn open_download(&mut self) {
        let url = self.config.download_url();
        tracing::info!(%url, "opening certificate download");
        if let Err(e) = open::that(&url) {
            tracing::warn!("failed to open {}: {}", url, e);
            self.error_message = Some(format!("Could not open {}: {}", url, e));
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        let preview_changed = self.preview.poll();
        let upload_changed = self.controller.poll();
        if preview_changed || upload_changed {
            ctx.request_repaint();
        }

        // Pending work completes off the UI thread; keep polling until it lands.
        if self.preview.is_loading() || self.controller.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn preview_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureHandle> {
        let state = self.preview.state();
        let image = state.image.as_ref()?;
        let stale = self
            .preview_texture
            .as_ref()
            .map_or(true, |(generation, _)| *generation != state.generation);
        if stale {
            let color = egui::ColorImage::from_rgba_unmultiplied(
                [image.width as usize, image.height as usize],
                &image.rgba,
            );
            let texture = ctx.load_texture("template-preview", color, egui::TextureOptions::LINEAR);
            self.preview_texture = Some((state.generation, texture));
        }
        self.preview_texture.as_ref().map(|(_, texture)| texture.clone())
    }
}

impl App for CertificateUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
