use crate::error::UploadError;

pub const IN_PROGRESS_TEXT: &str = "⏳ Generating certificates, please wait...";
pub const SUCCESS_TEXT: &str = "✅ Certificates generated successfully!";
pub const SERVER_ERROR_TEXT: &str = "⚠️ Server error. Try again.";

#[derive(Debug)]
pub enum FailureReason {
    /// The server answered with JSON that did not report success.
    Server(String),
    /// The request or the response body could not be used.
    Transport(UploadError),
}

#[derive(Debug, Default)]
pub enum UiState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(FailureReason),
}

/// Visibility and text of the status widgets for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    pub spinner_visible: bool,
    pub status_text: String,
    pub download_visible: bool,
}

pub fn render(state: &UiState) -> ViewModel {
    match state {
        UiState::Idle => ViewModel::default(),
        UiState::Submitting => ViewModel {
            spinner_visible: true,
            status_text: IN_PROGRESS_TEXT.to_string(),
            download_visible: false,
        },
        UiState::Succeeded => ViewModel {
            spinner_visible: false,
            status_text: SUCCESS_TEXT.to_string(),
            download_visible: true,
        },
        UiState::Failed(FailureReason::Server(reason)) => ViewModel {
            spinner_visible: false,
            status_text: format!("❌ Error: {}", reason),
            download_visible: false,
        },
        UiState::Failed(FailureReason::Transport(_)) => ViewModel {
            spinner_visible: false,
            status_text: SERVER_ERROR_TEXT.to_string(),
            download_visible: false,
        },
    }
}
