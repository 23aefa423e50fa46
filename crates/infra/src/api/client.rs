//! Typed client for the API Management REST service
//!
//! [`ApiManagementClient`] owns the signed-request pipeline for one
//! endpoint. Entity operations are reached through per-collection
//! handles ([`users`](ApiManagementClient::users),
//! [`groups`](ApiManagementClient::groups), ...); raw verbs are available
//! for anything the typed surface does not cover.

use std::sync::Arc;

use apim_common::{Clock, SystemClock};
use apim_domain::constants::{
    APIS_COLLECTION, GROUPS_COLLECTION, OPERATIONS_COLLECTION, PRODUCTS_COLLECTION,
    USERS_COLLECTION,
};
use apim_domain::{
    normalize_id, Api, ApiManagementError, ClientConfig, Group, HttpSettings, Operation, Product,
    Result, User,
};
use reqwest::header::{HeaderValue, CONTENT_TYPE, IF_MATCH};
use reqwest::{Body, Method, Request, Response};
use tracing::{debug, info, instrument};
use url::Url;

use super::entities::EntityClient;
use crate::endpoint::{Endpoint, EndpointCache};
use crate::errors::InfraError;
use crate::http::{HttpClient, HttpSend, SignedRequestLayer};

/// Client for one service endpoint
#[derive(Clone)]
pub struct ApiManagementClient {
    endpoint: Arc<Endpoint>,
    transport: Arc<dyn HttpSend>,
}

impl ApiManagementClient {
    /// Client for `endpoint` over the default HTTP transport
    ///
    /// # Errors
    /// Returns `Config` if the HTTP transport cannot be built.
    pub fn new(endpoint: Arc<Endpoint>) -> Result<Self> {
        Self::builder().endpoint(endpoint).build()
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiManagementClientBuilder {
        ApiManagementClientBuilder::default()
    }

    /// Resolve `name_or_raw` through `cache` and build a client using the
    /// transport settings in `config`
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty name, `Config` if no usable
    /// endpoint could be resolved or the transport cannot be built.
    pub fn connect(cache: &EndpointCache, config: &ClientConfig, name_or_raw: &str) -> Result<Self> {
        let endpoint = cache.resolve(config, name_or_raw)?.ok_or_else(|| {
            ApiManagementError::Config(format!(
                "no usable endpoint for connection '{}'",
                display_name(name_or_raw)
            ))
        })?;

        Self::builder().endpoint(endpoint).http_settings(config.http.clone()).build()
    }

    pub fn endpoint(&self) -> &Arc<Endpoint> {
        &self.endpoint
    }

    pub fn users(&self) -> EntityClient<'_, User> {
        EntityClient::new(self, USERS_COLLECTION.to_string())
    }

    pub fn groups(&self) -> EntityClient<'_, Group> {
        EntityClient::new(self, GROUPS_COLLECTION.to_string())
    }

    pub fn products(&self) -> EntityClient<'_, Product> {
        EntityClient::new(self, PRODUCTS_COLLECTION.to_string())
    }

    pub fn apis(&self) -> EntityClient<'_, Api> {
        EntityClient::new(self, APIS_COLLECTION.to_string())
    }

    /// Operations of the API `api_id` (bare id or `/apis/{id}` path)
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `api_id` is empty.
    pub fn operations(&self, api_id: &str) -> Result<EntityClient<'_, Operation>> {
        let api_id = normalize_id(APIS_COLLECTION, api_id)?;
        let collection = format!(
            "{APIS_COLLECTION}/{}/{OPERATIONS_COLLECTION}",
            urlencoding::encode(&api_id)
        );
        Ok(EntityClient::new(self, collection))
    }

    /// Import an API definition document under `name`
    ///
    /// The name is lower-cased and used both as the API id and its path.
    /// The raw response is returned; its status is not interpreted.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty name or content type, or a
    /// transport error.
    #[instrument(skip(self, content), fields(endpoint = %self.endpoint))]
    pub async fn import_document(
        &self,
        name: &str,
        content_type: &str,
        content: impl Into<Body>,
    ) -> Result<Response> {
        if name.is_empty() {
            return Err(ApiManagementError::invalid_argument("document name must not be empty"));
        }

        let id = urlencoding::encode(&name.to_lowercase()).into_owned();
        let url = self
            .endpoint
            .map_path_format("/apis/{0}?import=true&path=/{0}", &[id.as_str()])?;

        let mut request = Request::new(Method::PUT, url);
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_str(content_type).map_err(InfraError::from)?);
        *request.body_mut() = Some(content.into());

        let response = self.send(request).await?;
        info!(status = %response.status(), "document import submitted");
        Ok(response)
    }

    /// `HEAD` an endpoint-relative path or absolute URL through the pipeline
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an unusable URL or a transport error.
    pub async fn head(&self, url: &str) -> Result<Response> {
        let url = self.endpoint.map_path(url)?;
        self.execute(Method::HEAD, url, None, None).await
    }

    /// `PATCH` a JSON body to an endpoint-relative path or absolute URL
    /// through the pipeline
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an unusable URL or a transport error.
    pub async fn patch(&self, url: &str, body: impl Into<Vec<u8>>) -> Result<Response> {
        let url = self.endpoint.map_path(url)?;
        self.execute(Method::PATCH, url, Some(body.into()), None).await
    }

    /// Send a caller-built request through the signing pipeline
    ///
    /// # Errors
    /// Returns transport errors only; non-success statuses are returned as
    /// responses.
    pub async fn send(&self, request: Request) -> Result<Response> {
        self.transport.send(request).await
    }

    pub(crate) async fn execute(
        &self,
        method: Method,
        url: Url,
        json: Option<Vec<u8>>,
        if_match: Option<&str>,
    ) -> Result<Response> {
        debug!(%method, path = url.path(), "dispatching request");

        let mut request = Request::new(method, url);
        if let Some(version) = if_match {
            request
                .headers_mut()
                .insert(IF_MATCH, HeaderValue::from_str(version).map_err(InfraError::from)?);
        }
        if let Some(json) = json {
            request.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            *request.body_mut() = Some(Body::from(json));
        }

        self.send(request).await
    }
}

impl std::fmt::Debug for ApiManagementClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiManagementClient").field("endpoint", &self.endpoint).finish_non_exhaustive()
    }
}

/// Names are shown as given; raw descriptors may carry secrets.
fn display_name(name_or_raw: &str) -> &str {
    if name_or_raw.contains('=') {
        "<connection string>"
    } else {
        name_or_raw
    }
}

/// Builder for [`ApiManagementClient`]
#[derive(Default)]
pub struct ApiManagementClientBuilder {
    endpoint: Option<Arc<Endpoint>>,
    transport: Option<Arc<dyn HttpSend>>,
    clock: Option<Arc<dyn Clock>>,
    http_settings: Option<HttpSettings>,
}

impl ApiManagementClientBuilder {
    pub fn endpoint(mut self, endpoint: Arc<Endpoint>) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Send through `transport` instead of a default [`HttpClient`]
    pub fn transport(mut self, transport: impl HttpSend + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Clock used for token expiry
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Settings for the default transport; ignored with a custom transport
    pub fn http_settings(mut self, settings: HttpSettings) -> Self {
        self.http_settings = Some(settings);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `Config` if no endpoint was given or the default transport
    /// cannot be built.
    pub fn build(self) -> Result<ApiManagementClient> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| ApiManagementError::Config("endpoint is required".to_string()))?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let settings = self.http_settings.unwrap_or_default();
                Arc::new(HttpClient::from_settings(&settings)?) as Arc<dyn HttpSend>
            }
        };

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let layer = SignedRequestLayer::with_clock(transport, Arc::clone(&endpoint), clock);

        Ok(ApiManagementClient { endpoint, transport: Arc::new(layer) })
    }
}
