//! Shared HTTP plumbing for the Supabase auth and REST APIs.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::SupabaseConfig;
use crate::error::SupabaseError;

/// Supabase client implementing the identity provider and store ports.
///
/// Cheap to clone; the inner `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    pub(crate) http: Client,
    pub(crate) config: SupabaseConfig,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseError> {
        let http = Client::builder().pool_max_idle_per_host(10).build()?;
        Ok(Self { http, config })
    }

    /// Request with the `apikey` header and, when given, the user's bearer token.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
    ) -> RequestBuilder {
        let builder = self.http.request(method, self.config.endpoint(path));
        self.authorize(builder, bearer)
    }

    fn authorize(&self, builder: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        let builder = builder.header("apikey", &self.config.anon_key);
        match bearer {
            Some(token) => builder.bearer_auth(token),
            None => builder.bearer_auth(&self.config.anon_key),
        }
    }
}

/// Send a request and decode a JSON success body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    builder: RequestBuilder,
) -> Result<T, SupabaseError> {
    let response = check_status(builder.send().await?).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| SupabaseError::Decode(e.to_string()))
}

/// Send a request and ignore the success body.
pub(crate) async fn send_empty(builder: RequestBuilder) -> Result<(), SupabaseError> {
    check_status(builder.send().await?).await?;
    Ok(())
}

async fn check_status(response: Response) -> Result<Response, SupabaseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SupabaseError::from_status(status.as_u16(), &body))
}
