//! Signed-request pipeline
//!
//! Every outgoing request is decorated before it reaches the transport:
//!
//! 1. `Authorization: SharedAccessSignature {token}` when the endpoint has
//!    credentials. The token is cached and regenerated once it is within
//!    one minute of expiry; each new token is valid for four hours.
//! 2. `api-version={version}` appended to the query string unless the
//!    caller already supplied one.

use std::sync::Arc;

use apim_common::{Clock, SystemClock};
use apim_domain::constants::{
    API_VERSION_PARAMETER, SHARED_ACCESS_SIGNATURE_SCHEME, TOKEN_REFRESH_THRESHOLD_SECS,
    TOKEN_VALIDITY_SECS,
};
use apim_domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response};
use tracing::debug;

use super::HttpSend;
use crate::endpoint::Endpoint;
use crate::errors::InfraError;

#[derive(Clone)]
struct CachedToken {
    /// `None` for anonymous endpoints
    value: Option<String>,
    valid_until: DateTime<Utc>,
}

/// Decorates an [`HttpSend`] with request signing and API version
/// injection for one [`Endpoint`].
pub struct SignedRequestLayer<S> {
    inner: S,
    endpoint: Arc<Endpoint>,
    clock: Arc<dyn Clock>,
    token: RwLock<Option<CachedToken>>,
}

impl<S> SignedRequestLayer<S> {
    pub fn new(inner: S, endpoint: Arc<Endpoint>) -> Self {
        Self::with_clock(inner, endpoint, Arc::new(SystemClock))
    }

    pub fn with_clock(inner: S, endpoint: Arc<Endpoint>, clock: Arc<dyn Clock>) -> Self {
        Self { inner, endpoint, clock, token: RwLock::new(None) }
    }

    pub fn endpoint(&self) -> &Arc<Endpoint> {
        &self.endpoint
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Current token, regenerated when fewer than 60 seconds remain.
    ///
    /// Concurrent callers may race to regenerate; every result is valid, so
    /// the last writer simply wins.
    pub fn current_token(&self) -> Option<String> {
        let now = self.clock.now();
        let threshold = Duration::seconds(TOKEN_REFRESH_THRESHOLD_SECS);

        if let Some(cached) = self.token.read().as_ref() {
            if cached.valid_until - now >= threshold {
                return cached.value.clone();
            }
        }

        let valid_until = now + Duration::seconds(TOKEN_VALIDITY_SECS);
        let value = self.endpoint.create_access_token(valid_until);
        debug!(endpoint = %self.endpoint, %valid_until, signed = value.is_some(), "access token renewed");

        *self.token.write() = Some(CachedToken { value: value.clone(), valid_until });
        value
    }

    /// Apply the authorization header and API version to `request`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the token cannot be carried in a header.
    pub fn prepare(&self, request: &mut Request) -> Result<()> {
        if let Some(token) = self.current_token() {
            let mut value = HeaderValue::from_str(&format!("{SHARED_ACCESS_SIGNATURE_SCHEME} {token}"))
                .map_err(InfraError::from)?;
            value.set_sensitive(true);
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        append_api_version(request.url_mut(), self.endpoint.version());
        Ok(())
    }
}

#[async_trait]
impl<S: HttpSend> HttpSend for SignedRequestLayer<S> {
    async fn send(&self, mut request: Request) -> Result<Response> {
        self.prepare(&mut request)?;
        self.inner.send(request).await
    }
}

/// Append `api-version={version}` unless the query already names one.
///
/// The query is rebuilt as `{existing}&api-version={version}` with stray
/// leading or trailing `?`/`&` removed.
fn append_api_version(url: &mut url::Url, version: &str) {
    let existing = url.query().unwrap_or_default();
    if existing.contains(&format!("{API_VERSION_PARAMETER}=")) {
        return;
    }

    let query = format!("{existing}&{API_VERSION_PARAMETER}={version}");
    let query = query.trim_matches(|c| c == '?' || c == '&').to_string();
    url.set_query(Some(&query));
}
