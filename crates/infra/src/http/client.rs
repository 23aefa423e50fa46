use std::time::Duration;

use apim_domain::{ApiManagementError, HttpSettings, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client as ReqwestClient, Request, Response};
use tracing::debug;

use super::HttpSend;
use crate::errors::InfraError;

const DEFAULT_USER_AGENT: &str = concat!("apim-client/", env!("CARGO_PKG_VERSION"));

/// HTTP transport with timeout support.
///
/// Requests are sent exactly once; failed requests are not retried.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Build a client from configured transport settings.
    pub fn from_settings(settings: &HttpSettings) -> Result<Self> {
        let mut builder = Self::builder().timeout(Duration::from_secs(settings.timeout_secs));
        if let Some(agent) = &settings.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Execute a fully built request.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                let infra: InfraError = err.into();
                Err(ApiManagementError::from(infra))
            }
        }
    }
}

#[async_trait]
impl HttpSend for HttpClient {
    async fn send(&self, request: Request) -> Result<Response> {
        self.execute(request).await
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: String,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .no_proxy();

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            ApiManagementError::from(infra)
        })?;

        Ok(HttpClient { client })
    }
}
