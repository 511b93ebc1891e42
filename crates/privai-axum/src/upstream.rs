//! Streaming client for the upstream inference server.
//!
//! One `POST {base}/completion` per call. The response body is handed back
//! unparsed so the relay can forward it chunk by chunk.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use privai_core::{
    CompletionBackend, CompletionBody, CompletionError, CompletionStream, UpstreamEndpoint,
};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONNECTION, CONTENT_TYPE};
use tracing::{debug, error};

/// `CompletionBackend` over a shared, pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct LlamaCompletionClient {
    client: Client,
}

impl LlamaCompletionClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().pool_max_idle_per_host(10).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CompletionBackend for LlamaCompletionClient {
    async fn stream_completion(
        &self,
        endpoint: &UpstreamEndpoint,
        body: &CompletionBody,
    ) -> Result<CompletionStream, CompletionError> {
        let url = endpoint.completion_url();
        debug!("Forwarding completion to {url}");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/event-stream")
            .header(CONNECTION, "keep-alive")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to connect to inference server at {url}: {e}");
                CompletionError::UpstreamConnection(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let stream = response
            .bytes_stream()
            .map_err(|e| CompletionError::MidStream(e.to_string()));
        Ok(Box::pin(stream))
    }
}
