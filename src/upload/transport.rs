use crate::error::UploadError;
use crate::form::FormPayload;
use serde_json::Value;
use std::future::Future;

/// Sends one form submission and hands back the parsed JSON body.
pub trait UploadTransport: Send + Sync + 'static {
    fn post_form(
        &self,
        payload: FormPayload,
    ) -> impl Future<Output = Result<Value, UploadError>> + Send;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl UploadTransport for HttpTransport {
    async fn post_form(&self, payload: FormPayload) -> Result<Value, UploadError> {
        let form = payload.into_multipart().await?;
        let response = self.client.post(&self.url).multipart(form).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        // A JSON body is authoritative regardless of status; the server
        // reports its own failures that way.
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(UploadError::BadStatus(status.as_u16())),
            Err(e) => Err(UploadError::MalformedBody(e.to_string())),
        }
    }
}
