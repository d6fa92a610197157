use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use shared::{InferenceResult, simulated_result};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("failed to build request: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server error: {status} - {body}")]
    Server { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Decode(String),
}

/// Where analysis results come from.
#[derive(Clone, Debug, PartialEq)]
pub enum InferenceClient {
    /// Answers with the fixed placeholder record after a short delay. Never fails.
    Simulated { latency_ms: u32 },
    /// Posts the image as multipart field `image` and decodes the JSON answer.
    Remote { endpoint: String },
}

impl InferenceClient {
    pub async fn run(&self, file: &GlooFile) -> Result<InferenceResult, InferenceError> {
        match self {
            Self::Simulated { latency_ms } => {
                TimeoutFuture::new(*latency_ms).await;
                log::info!("Simulated inference for {} ({} bytes)", file.name(), file.size());
                Ok(simulated_result())
            }
            Self::Remote { endpoint } => post_image(endpoint, file).await,
        }
    }
}

async fn post_image(endpoint: &str, file: &GlooFile) -> Result<InferenceResult, InferenceError> {
    let form_data = web_sys::FormData::new()
        .map_err(|e| InferenceError::Request(format!("{:?}", e)))?;
    form_data
        .append_with_blob_and_filename("image", file.as_ref(), &file.name())
        .map_err(|e| InferenceError::Request(format!("{:?}", e)))?;

    let request = Request::post(endpoint)
        .body(form_data)
        .map_err(|e| InferenceError::Request(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| InferenceError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(InferenceError::Server { status, body });
    }

    response
        .json::<InferenceResult>()
        .await
        .map_err(|e| InferenceError::Decode(e.to_string()))
}
