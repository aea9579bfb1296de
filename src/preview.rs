//! Template preview: reads the selected template into a data URL and keeps
//! the decoded pixels for the window to draw.

use crate::error::PreviewError;
use crate::form::content_type_for;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use tokio::runtime::Handle;

/// Longest side of the decoded preview. Larger templates are scaled down so
/// the texture stays within what any GPU backend accepts.
pub const PREVIEW_MAX_SIDE: u32 = 2048;

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct LoadedPreview {
    pub data_url: String,
    pub image: Option<DecodedImage>,
}

/// Read a file as a data URL, decoding its pixels when it is a known image.
pub async fn read_data_url(path: &Path) -> Result<LoadedPreview, PreviewError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| PreviewError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let url = data_url(content_type_for(path), &bytes);

    let image = tokio::task::spawn_blocking(move || decode(&bytes))
        .await
        .map_err(|e| PreviewError::Task(e.to_string()))?;

    Ok(LoadedPreview {
        data_url: url,
        image,
    })
}

fn decode(bytes: &[u8]) -> Option<DecodedImage> {
    let mut img = image::load_from_memory(bytes).ok()?;
    if img.width() > PREVIEW_MAX_SIDE || img.height() > PREVIEW_MAX_SIDE {
        img = img.thumbnail(PREVIEW_MAX_SIDE, PREVIEW_MAX_SIDE);
    }
    let img = img.to_rgba8();
    Some(DecodedImage {
        width: img.width(),
        height: img.height(),
        rgba: img.into_raw(),
    })
}

/// What the preview element currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    pub source: Option<String>,
    pub image: Option<DecodedImage>,
    pub visible: bool,
    /// Bumped on every applied load so the window knows to rebuild its texture.
    pub generation: u64,
}

impl PreviewState {
    pub fn apply(&mut self, loaded: LoadedPreview) {
        self.source = Some(loaded.data_url);
        self.image = loaded.image;
        self.visible = true;
        self.generation += 1;
    }
}

type Completion = (u64, Result<LoadedPreview, PreviewError>);

/// Reacts to template selection changes.
pub struct PreviewHandler {
    state: PreviewState,
    issued: u64,
    in_flight: usize,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl Default for PreviewHandler {
    fn default() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            state: PreviewState::default(),
            issued: 0,
            in_flight: 0,
            sender,
            receiver,
        }
    }
}

impl PreviewHandler {
    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Start reading the newly selected file. A cleared selection leaves the
    /// current preview in place.
    pub fn on_file_change(&mut self, runtime: &Handle, file: Option<PathBuf>) {
        let Some(path) = file else {
            return;
        };
        tracing::debug!(path = %path.display(), "reading template preview");
        self.track(runtime, async move { read_data_url(&path).await });
    }

    /// Run a read in the background and report its outcome, including a
    /// panic inside the read, back to `poll`.
    fn track<F>(&mut self, runtime: &Handle, read: F)
    where
        F: Future<Output = Result<LoadedPreview, PreviewError>> + Send + 'static,
    {
        self.issued += 1;
        self.in_flight += 1;
        let seq = self.issued;
        let sender = self.sender.clone();
        let work = runtime.spawn(read);
        runtime.spawn(async move {
            let result = work
                .await
                .unwrap_or_else(|e| Err(PreviewError::Task(e.to_string())));
            let _ = sender.send((seq, result));
        });
    }

    /// Apply finished reads. Returns true when the preview changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok((seq, result)) = self.receiver.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            if seq != self.issued {
                tracing::debug!(seq, latest = self.issued, "dropping superseded preview");
                continue;
            }
            match result {
                Ok(loaded) => {
                    self.state.apply(loaded);
                    changed = true;
                }
                Err(e) => tracing::debug!("preview left unchanged: {}", e),
            }
        }
        changed
    }
}
