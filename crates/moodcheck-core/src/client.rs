use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;

use crate::config::Config;
use crate::error::{ClientError, TransportError};

#[derive(Serialize)]
struct MoodRequest<'a> {
    mood: &'a str,
}

/// Status and undecoded body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one mood to the suggestion service.
///
/// Implementations report any HTTP response, whatever its status, as `Ok`;
/// `Err` means no response was obtained at all.
#[async_trait]
pub trait SuggestionTransport: Send + Sync {
    async fn post_mood(&self, mood: &str) -> Result<RawResponse, TransportError>;
}

#[derive(Clone)]
pub struct HttpSuggestionClient {
    client: Client,
    endpoint: String,
}

impl HttpSuggestionClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let endpoint = config.endpoint_url()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build().map_err(ClientError::Build)?,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SuggestionTransport for HttpSuggestionClient {
    async fn post_mood(&self, mood: &str) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&MoodRequest { mood })
            .send()
            .await?;

        let status = response.status().as_u16();
        tracing::debug!(status, "suggestion service responded");

        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
