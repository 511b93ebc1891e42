//! Sampling parameters for the upstream `/completion` endpoint.
//!
//! The proxy forwards a fixed baseline configuration and only lets the caller
//! override the temperature. The tuning knobs are passed through verbatim; this
//! crate does not interpret them.

use serde::{Deserialize, Serialize};

/// Sampling configuration understood by the llama.cpp-style `/completion` API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Maximum number of tokens to generate.
    pub n_predict: i32,
    pub temperature: f64,
    /// Literal strings that end generation when the model produces them.
    pub stop: Vec<String>,
    pub repeat_last_n: i32,
    pub repeat_penalty: f64,
    pub top_k: i32,
    pub top_p: f64,
    pub tfs_z: f64,
    pub typical_p: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub mirostat: u8,
    pub mirostat_tau: f64,
    pub mirostat_eta: f64,
}

impl SamplingParams {
    /// The baseline every completion starts from.
    #[must_use]
    pub fn baseline() -> Self {
        Self {
            n_predict: 500,
            temperature: 0.2,
            stop: vec!["</s>".into(), "user:".into(), "ChatGPT:".into()],
            repeat_last_n: 256,
            repeat_penalty: 1.18,
            top_k: 40,
            top_p: 0.5,
            tfs_z: 1.0,
            typical_p: 1.0,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            mirostat: 0,
            mirostat_tau: 5.0,
            mirostat_eta: 0.1,
        }
    }

    /// Return a copy with the caller's temperature applied.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::baseline()
    }
}

/// JSON body posted to the upstream `/completion` endpoint.
///
/// `stream` is private and always `true`: responses are relayed incrementally,
/// so a buffered upstream reply is never requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionBody {
    stream: bool,
    pub prompt: String,
    #[serde(flatten)]
    pub sampling: SamplingParams,
}

impl CompletionBody {
    #[must_use]
    pub const fn new(prompt: String, sampling: SamplingParams) -> Self {
        Self {
            stream: true,
            prompt,
            sampling,
        }
    }

    #[must_use]
    pub const fn stream(&self) -> bool {
        self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_override_leaves_other_fields() {
        let merged = SamplingParams::baseline().with_temperature(0.9);
        let baseline = SamplingParams::baseline();

        assert!((merged.temperature - 0.9).abs() < f64::EPSILON);
        assert_eq!(merged.n_predict, baseline.n_predict);
        assert_eq!(merged.stop, baseline.stop);
        assert_eq!(merged.top_k, baseline.top_k);
    }

    #[test]
    fn test_body_serializes_flat_with_stream_true() {
        let body = CompletionBody::new(
            "sys\nassistant: ".to_string(),
            SamplingParams::baseline().with_temperature(0.5),
        );
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["stream"], serde_json::json!(true));
        assert_eq!(json["temperature"], serde_json::json!(0.5));
        assert_eq!(json["prompt"], serde_json::json!("sys\nassistant: "));
        assert_eq!(json["n_predict"], serde_json::json!(500));
        assert_eq!(
            json["stop"],
            serde_json::json!(["</s>", "user:", "ChatGPT:"])
        );
        assert_eq!(json["mirostat_eta"], serde_json::json!(0.1));
        assert!(json.get("sampling").is_none());
    }

    #[test]
    fn test_stream_flag_cannot_be_disabled() {
        let body = CompletionBody::new(String::new(), SamplingParams::default());
        assert!(body.stream());
    }
}
