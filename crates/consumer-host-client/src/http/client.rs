/*
[INPUT]:  HTTP configuration (endpoint, timeouts) and per-request credentials
[OUTPUT]: Configured reqwest client and decoded ApiReply values
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::Credential;
use crate::http::{ConsumerHostError, Result};
use crate::types::ApiReply;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the consumer host REST API
#[derive(Debug, Clone)]
pub struct ConsumerHostClient {
    http_client: Client,
    base_url: Url,
}

impl ConsumerHostClient {
    /// Create a new client with default configuration
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), endpoint)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, endpoint: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let base_url = Url::parse(endpoint)?;
        if base_url.cannot_be_a_base() {
            return Err(ConsumerHostError::Config(format!(
                "Consumer host endpoint cannot be a base URL: {endpoint}"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Base endpoint all requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL by appending path segments to the base endpoint.
    ///
    /// Segments are percent-encoded, so ids can be passed verbatim.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConsumerHostError::Config(format!(
                    "Consumer host endpoint cannot be a base URL: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build request builder, attaching the credential when present
    pub(crate) fn request(
        &self,
        method: Method,
        segments: &[&str],
        credential: Option<&Credential>,
    ) -> Result<RequestBuilder> {
        let url = self.url(segments)?;
        let builder = self.http_client.request(method, url);
        Ok(match credential {
            Some(credential) => builder.header(AUTHORIZATION, credential.header_value()),
            None => builder,
        })
    }

    /// Send a request and classify its body
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<ApiReply<T>> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let bytes = response.bytes().await?;

        let reply = ApiReply::decode(status, &bytes)?;
        debug!(
            endpoint = %url,
            status = status.as_u16(),
            code = reply.error().map(|err| err.code.code()),
            "consumer host reply"
        );
        Ok(reply)
    }
}
