use std::path::PathBuf;
use thiserror::Error;

/// Why a submission did not produce a usable server response.
///
/// Every variant is shown to the user as the same generic message; the
/// distinction is kept for logging and for tests.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("server unreachable: {0}")]
    Unreachable(String),

    #[error("server answered with status {0} and no JSON body")]
    BadStatus(u16),

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("upload task failed: {0}")]
    Task(String),

    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for UploadError {
    fn from(e: reqwest::Error) -> Self {
        UploadError::Unreachable(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to read preview file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preview task failed: {0}")]
    Task(String),
}
