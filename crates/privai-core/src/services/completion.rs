//! Completion service: turns a chat request into an upstream stream.
//!
//! Each call resolves the model endpoint, builds the prompt and merges the
//! sampling parameters from an immutable baseline. Nothing is carried over
//! between calls.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    CompletionBody, CompletionRequest, ModelRegistry, SamplingParams, UpstreamEndpoint,
};
use crate::ports::{CompletionBackend, CompletionError, CompletionStream};

pub struct CompletionService {
    registry: Arc<ModelRegistry>,
    backend: Arc<dyn CompletionBackend>,
    baseline: SamplingParams,
}

impl CompletionService {
    pub fn new(registry: Arc<ModelRegistry>, backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            registry,
            backend,
            baseline: SamplingParams::baseline(),
        }
    }

    /// Resolve the endpoint and build the upstream body without any I/O.
    pub fn prepare<'a>(
        &'a self,
        request: &CompletionRequest,
    ) -> Result<(&'a UpstreamEndpoint, CompletionBody), CompletionError> {
        request.validate()?;
        let endpoint = self.registry.resolve(request.model.id())?;
        let sampling = self.baseline.clone().with_temperature(request.temperature);
        Ok((endpoint, CompletionBody::new(request.prompt_text(), sampling)))
    }

    /// Start the upstream completion and return its raw byte stream.
    pub async fn start(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionStream, CompletionError> {
        let (endpoint, body) = self.prepare(request)?;

        debug!(
            model = %request.model.id(),
            upstream = %endpoint.completion_url(),
            messages = request.messages.len(),
            prompt_len = body.prompt.len(),
            "Starting upstream completion"
        );

        self.backend.stream_completion(endpoint, &body).await
    }
}
