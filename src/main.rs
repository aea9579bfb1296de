mod app;
mod config;
mod error;
mod form;
mod preview;
mod upload;

use app::CertificateUploader;
use clap::Parser;
use config::{Args, Config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from(Args::parse());
    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([600.0, 720.0])
            .with_min_inner_size([400.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Certificate Generator",
        options,
        Box::new(move |cc| Box::new(CertificateUploader::new(cc, config, runtime))),
    )?;
    Ok(())
}
