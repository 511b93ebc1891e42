//! Model identifier to upstream endpoint routing.
//!
//! The registry is built once at startup from configuration and validated
//! there, so request handling only ever performs a lookup.

use std::collections::BTreeMap;

use url::Url;

use crate::ports::{CompletionError, ConfigError};

/// Identifier the chat UI uses for the self-hosted model.
pub const PRIVATE_AI_MODEL_ID: &str = "privateAI";

/// Where completions for a model are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEndpoint {
    base_url: Url,
}

impl UpstreamEndpoint {
    /// Validate and wrap an upstream base URL. Only http and https are accepted.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(raw.trim())
            .map_err(|e| ConfigError::Invalid(format!("invalid upstream URL {raw:?}: {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "upstream URL must use http or https: {raw:?}"
            )));
        }
        if base_url.cannot_be_a_base() || base_url.host_str().is_none() {
            return Err(ConfigError::Invalid(format!(
                "upstream URL has no host: {raw:?}"
            )));
        }

        Ok(Self { base_url })
    }

    /// `{base}/completion`, keeping any path prefix of the base URL.
    #[must_use]
    pub fn completion_url(&self) -> String {
        format!("{}/completion", self.base_url.as_str().trim_end_matches('/'))
    }
}

/// Immutable mapping from model identifier to upstream endpoint.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    endpoints: BTreeMap<String, UpstreamEndpoint>,
}

impl ModelRegistry {
    /// Build a registry from `(model id, base url)` pairs.
    ///
    /// Fails on an empty list, blank or duplicate ids, and invalid URLs.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut endpoints = BTreeMap::new();
        for (id, url) in entries {
            let id = id.as_ref().trim();
            if id.is_empty() {
                return Err(ConfigError::Invalid("model id must not be empty".into()));
            }
            let endpoint = UpstreamEndpoint::parse(url.as_ref())?;
            if endpoints.insert(id.to_string(), endpoint).is_some() {
                return Err(ConfigError::Invalid(format!("duplicate model id: {id}")));
            }
        }

        if endpoints.is_empty() {
            return Err(ConfigError::Missing(
                "at least one model endpoint must be configured".into(),
            ));
        }

        Ok(Self { endpoints })
    }

    /// Parse the `id=url;id=url` list format used by the environment.
    pub fn parse_list(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
        raw.split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry
                    .split_once('=')
                    .map(|(id, url)| (id.trim().to_string(), url.trim().to_string()))
                    .ok_or_else(|| {
                        ConfigError::Invalid(format!(
                            "expected 'id=url' model entry, got {entry:?}"
                        ))
                    })
            })
            .collect()
    }

    /// Resolve a model identifier.
    pub fn resolve(&self, model_id: &str) -> Result<&UpstreamEndpoint, CompletionError> {
        self.endpoints
            .get(model_id)
            .ok_or_else(|| CompletionError::UnknownModel(model_id.to_string()))
    }

    /// Registered model identifiers, sorted.
    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_url_joins_path() {
        let plain = UpstreamEndpoint::parse("http://127.0.0.1:8080").unwrap();
        assert_eq!(plain.completion_url(), "http://127.0.0.1:8080/completion");

        let nested = UpstreamEndpoint::parse("https://ai.example.com/llama/").unwrap();
        assert_eq!(
            nested.completion_url(),
            "https://ai.example.com/llama/completion"
        );
    }

    #[test]
    fn test_endpoint_rejects_bad_urls() {
        assert!(UpstreamEndpoint::parse("not a url").is_err());
        assert!(UpstreamEndpoint::parse("ftp://host").is_err());
        assert!(UpstreamEndpoint::parse("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_registry_resolve() {
        let registry =
            ModelRegistry::from_entries([(PRIVATE_AI_MODEL_ID, "http://localhost:8080")]).unwrap();

        assert!(registry.resolve("privateAI").is_ok());
        assert!(matches!(
            registry.resolve("gpt-4"),
            Err(CompletionError::UnknownModel(id)) if id == "gpt-4"
        ));
        assert_eq!(registry.model_ids().collect::<Vec<_>>(), vec!["privateAI"]);
    }

    #[test]
    fn test_registry_validation() {
        let empty: [(&str, &str); 0] = [];
        assert!(matches!(
            ModelRegistry::from_entries(empty),
            Err(ConfigError::Missing(_))
        ));

        let duplicate = ModelRegistry::from_entries([
            ("a", "http://localhost:1"),
            ("a", "http://localhost:2"),
        ]);
        assert!(duplicate.is_err());

        assert!(ModelRegistry::from_entries([(" ", "http://localhost:1")]).is_err());
    }

    #[test]
    fn test_parse_list() {
        let entries =
            ModelRegistry::parse_list("mistral=http://a:1; llama = http://b:2 ;").unwrap();
        assert_eq!(
            entries,
            vec![
                ("mistral".to_string(), "http://a:1".to_string()),
                ("llama".to_string(), "http://b:2".to_string()),
            ]
        );

        assert!(ModelRegistry::parse_list("broken").is_err());
        assert!(ModelRegistry::parse_list("").unwrap().is_empty());
    }
}
