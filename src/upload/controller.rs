use crate::app::{FailureReason, UiState};
use crate::error::UploadError;
use crate::form::{FormState, TEMPLATE_FIELD};
use crate::upload::response::ServerResponse;
use crate::upload::transport::UploadTransport;
use derivative::Derivative;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Handle;

type Completion = (u64, Result<ServerResponse, UploadError>);

/// Drives one submission at a time through `Idle → Submitting → {Succeeded, Failed}`.
///
/// Submissions are numbered; only the completion of the latest one is
/// applied, so an older request finishing late cannot overwrite the status.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct UploadController<T: UploadTransport> {
    #[derivative(Debug = "ignore")]
    transport: Arc<T>,
    state: UiState,
    issued: u64,
    in_flight: usize,
    #[derivative(Debug = "ignore")]
    sender: Sender<Completion>,
    #[derivative(Debug = "ignore")]
    receiver: Receiver<Completion>,
}

impl<T: UploadTransport> UploadController<T> {
    pub fn new(transport: T) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            transport: Arc::new(transport),
            state: UiState::Idle,
            issued: 0,
            in_flight: 0,
            sender,
            receiver,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// True while any submission, current or superseded, has not reported back.
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Mark the form as submitting and send the snapshot in the background.
    pub fn submit(&mut self, runtime: &Handle, form: &FormState) -> u64 {
        self.issued += 1;
        self.in_flight += 1;
        let seq = self.issued;
        self.state = UiState::Submitting;

        let payload = form.snapshot();
        tracing::info!(
            seq,
            fields = payload.fields().len(),
            has_template = payload.field(TEMPLATE_FIELD).is_some(),
            "submitting upload form"
        );

        let transport = Arc::clone(&self.transport);
        let sender = self.sender.clone();
        let work = runtime.spawn(async move {
            transport
                .post_form(payload)
                .await
                .and_then(ServerResponse::from_json)
        });
        runtime.spawn(async move {
            let result = work
                .await
                .unwrap_or_else(|e| Err(UploadError::Task(e.to_string())));
            let _ = sender.send((seq, result));
        });
        seq
    }

    /// Fold finished submissions into the state. Returns true when it changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok((seq, result)) = self.receiver.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            if seq != self.issued {
                tracing::debug!(seq, latest = self.issued, "discarding stale upload result");
                continue;
            }
            self.state = match result {
                Ok(ServerResponse::Success) => {
                    tracing::info!(seq, "certificates generated");
                    UiState::Succeeded
                }
                Ok(ServerResponse::Failure(reason)) => {
                    tracing::warn!(seq, %reason, "server reported failure");
                    UiState::Failed(FailureReason::Server(reason))
                }
                Err(e) => {
                    tracing::warn!(seq, error = %e, "upload failed");
                    UiState::Failed(FailureReason::Transport(e))
                }
            };
            changed = true;
        }
        changed
    }
}
