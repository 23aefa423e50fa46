//! Service endpoint
//!
//! An [`Endpoint`] is the immutable view of one service instance: its base
//! address, the API version to request, and the credentials used to sign
//! requests. It is built from a connection descriptor or assembled
//! directly with the builder methods.

use std::fmt;

use apim_common::ConnectionDescriptor;
use apim_domain::constants::{
    service_host_uri, DEFAULT_API_VERSION, KEY_ACCESS_TOKEN, KEY_IDENTIFIER, KEY_KEY,
    KEY_SERVICE_NAME, KEY_URI, KEY_VERSION,
};
use apim_domain::{ApiManagementError, Result};
use chrono::{DateTime, Utc};
use url::Url;

use super::token::shared_access_token;
use crate::errors::InfraError;

/// One service instance and the credentials used to talk to it
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_address: Url,
    identifier: Option<String>,
    key: Option<String>,
    version: String,
    access_token: Option<String>,
}

impl Endpoint {
    /// Anonymous endpoint for `base_address` using the default API version
    pub fn new(base_address: Url) -> Self {
        Self {
            base_address,
            identifier: None,
            key: None,
            version: DEFAULT_API_VERSION.to_string(),
            access_token: None,
        }
    }

    /// Parse `base_address` and build an anonymous endpoint
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `base_address` is not an absolute URL.
    pub fn parse(base_address: &str) -> Result<Self> {
        let url = Url::parse(base_address).map_err(InfraError::from)?;
        Ok(Self::new(url))
    }

    /// Build an endpoint from a parsed descriptor
    ///
    /// The base address comes from `uri`, or failing that from
    /// `serviceName`. `version` defaults to the library default; empty
    /// values count as absent.
    ///
    /// # Errors
    /// Returns `MalformedConnectionString` if neither `uri` nor
    /// `serviceName` is present, or the address is not a valid URL.
    pub fn from_descriptor(descriptor: &ConnectionDescriptor) -> Result<Self> {
        let address = match (
            descriptor.get_non_empty(KEY_URI),
            descriptor.get_non_empty(KEY_SERVICE_NAME),
        ) {
            (Some(uri), _) => uri.to_string(),
            (None, Some(service_name)) => service_host_uri(service_name),
            (None, None) => {
                return Err(ApiManagementError::MalformedConnectionString(
                    "either 'uri' or 'serviceName' is required".to_string(),
                ))
            }
        };

        let base_address = Url::parse(&address).map_err(|e| {
            ApiManagementError::MalformedConnectionString(format!(
                "invalid service address '{address}': {e}"
            ))
        })?;

        Ok(Self {
            base_address,
            identifier: descriptor.get_non_empty(KEY_IDENTIFIER).map(str::to_string),
            key: descriptor.get_non_empty(KEY_KEY).map(str::to_string),
            version: descriptor
                .get_non_empty(KEY_VERSION)
                .unwrap_or(DEFAULT_API_VERSION)
                .to_string(),
            access_token: descriptor.get_non_empty(KEY_ACCESS_TOKEN).map(str::to_string),
        })
    }

    /// Parse a raw descriptor and build an endpoint from it
    ///
    /// # Errors
    /// Returns `MalformedConnectionString` if the descriptor cannot be
    /// parsed or names no service address.
    pub fn from_connection_string(raw: &str) -> Result<Self> {
        Self::from_descriptor(&ConnectionDescriptor::parse(raw)?)
    }

    /// Sign requests with `identifier` and `key`
    #[must_use]
    pub fn with_credentials(mut self, identifier: impl Into<String>, key: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into()).filter(|s| !s.is_empty());
        self.key = Some(key.into()).filter(|s| !s.is_empty());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Send `token` verbatim instead of signing
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into()).filter(|s| !s.is_empty());
        self
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Whether requests to this endpoint carry an `Authorization` header
    pub fn has_credentials(&self) -> bool {
        self.access_token.is_some() || (self.identifier.is_some() && self.key.is_some())
    }

    /// Resolve `path` against the base address
    ///
    /// Absolute URLs (e.g. a `nextLink`) are returned as given.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the result is not a valid URL.
    pub fn map_path(&self, path: &str) -> Result<Url> {
        Ok(self.base_address.join(path).map_err(InfraError::from)?)
    }

    /// Substitute `{0}`, `{1}`, ... in `template` with `args`, then resolve
    /// the result against the base address
    ///
    /// # Errors
    /// Returns `InvalidArgument` if a placeholder has no matching argument
    /// or the result is not a valid URL.
    pub fn map_path_format(&self, template: &str, args: &[&str]) -> Result<Url> {
        self.map_path(&substitute(template, args)?)
    }

    /// Token for the `Authorization` header, valid until `expiry`
    ///
    /// A static access token is returned unchanged. Otherwise, when both
    /// identifier and key are present, a shared access signature is
    /// computed. With neither, requests are anonymous and `None` is
    /// returned.
    pub fn create_access_token(&self, expiry: DateTime<Utc>) -> Option<String> {
        if let Some(token) = &self.access_token {
            return Some(token.clone());
        }

        match (&self.identifier, &self.key) {
            (Some(identifier), Some(key)) => Some(shared_access_token(identifier, key, expiry)),
            _ => None,
        }
    }
}

fn substitute(template: &str, args: &[&str]) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            ApiManagementError::invalid_argument(format!("unterminated placeholder in '{template}'"))
        })?;

        let index: usize = after[..close].parse().map_err(|_| {
            ApiManagementError::invalid_argument(format!(
                "placeholder '{{{}}}' is not a positional index",
                &after[..close]
            ))
        })?;
        let value = args.get(index).ok_or_else(|| {
            ApiManagementError::invalid_argument(format!(
                "placeholder {{{index}}} has no argument ({} given)",
                args.len()
            ))
        })?;

        output.push_str(value);
        rest = &after[close + 1..];
    }
    output.push_str(rest);

    Ok(output)
}

/// Renders the host only.
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_address.host_str().unwrap_or(self.base_address.as_str()))
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_address", &self.base_address.as_str())
            .field("identifier", &self.identifier)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("version", &self.version)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn endpoint(raw: &str) -> Endpoint {
        Endpoint::from_connection_string(raw).unwrap()
    }

    #[test]
    fn uri_takes_precedence_over_service_name() {
        let endpoint = endpoint("serviceName=ignored;uri=https://contoso.example.net/");
        assert_eq!(endpoint.base_address().as_str(), "https://contoso.example.net/");
    }

    #[test]
    fn service_name_builds_management_host() {
        let endpoint = endpoint("serviceName=contoso");
        assert_eq!(
            endpoint.base_address().as_str(),
            "https://contoso.management.azure-api.net/"
        );
        assert_eq!(endpoint.to_string(), "contoso.management.azure-api.net");
    }

    #[test]
    fn version_defaults_when_absent_or_empty() {
        assert_eq!(endpoint("serviceName=x").version(), DEFAULT_API_VERSION);
        assert_eq!(endpoint("serviceName=x;version=").version(), DEFAULT_API_VERSION);
        assert_eq!(endpoint("serviceName=x;version=2015-01-01").version(), "2015-01-01");
    }

    #[test]
    fn missing_address_is_malformed() {
        let err = Endpoint::from_connection_string("identifier=a;key=b").unwrap_err();
        assert!(matches!(err, ApiManagementError::MalformedConnectionString(_)));
    }

    #[test]
    fn invalid_address_is_malformed() {
        let err = Endpoint::from_connection_string("uri=not a url").unwrap_err();
        assert!(matches!(err, ApiManagementError::MalformedConnectionString(_)));
    }

    #[test]
    fn static_token_is_returned_unchanged() {
        let endpoint = endpoint("serviceName=x;identifier=a;key=b;accessToken=static-token");
        assert!(endpoint.has_access_token());
        assert_eq!(endpoint.create_access_token(Utc::now()).as_deref(), Some("static-token"));
    }

    #[test]
    fn credentials_produce_signed_token() {
        let expiry = Utc.with_ymd_and_hms(2014, 2, 14, 0, 0, 0).unwrap();
        let endpoint = endpoint("serviceName=x;identifier=integration;key=s3cr3t");

        let token = endpoint.create_access_token(expiry).unwrap();
        assert!(token.starts_with("uid=integration&ex=2014-02-14T00:00:00.0000000Z&sn="));
    }

    #[test]
    fn partial_credentials_are_anonymous() {
        for raw in ["serviceName=x", "serviceName=x;identifier=a", "serviceName=x;key=b"] {
            let endpoint = endpoint(raw);
            assert!(!endpoint.has_credentials(), "{raw}");
            assert_eq!(endpoint.create_access_token(Utc::now()), None, "{raw}");
        }
    }

    #[test]
    fn builder_matches_descriptor() {
        let built = Endpoint::parse("https://contoso.management.azure-api.net")
            .unwrap()
            .with_credentials("integration", "s3cr3t")
            .with_version(DEFAULT_API_VERSION);
        assert_eq!(built, endpoint("serviceName=contoso;identifier=integration;key=s3cr3t"));
    }

    #[test]
    fn map_path_resolves_against_base() {
        let endpoint = endpoint("uri=https://contoso.example.net");
        assert_eq!(
            endpoint.map_path("/users/42").unwrap().as_str(),
            "https://contoso.example.net/users/42"
        );
        assert_eq!(
            endpoint.map_path("https://elsewhere.example.net/users?$skip=10").unwrap().as_str(),
            "https://elsewhere.example.net/users?$skip=10"
        );
    }

    #[test]
    fn map_path_format_substitutes_positional_arguments() {
        let endpoint = endpoint("uri=https://contoso.example.net");
        let url = endpoint.map_path_format("/apis/{0}/operations/{1}", &["echo", "get"]).unwrap();
        assert_eq!(url.path(), "/apis/echo/operations/get");
    }

    #[test]
    fn map_path_format_rejects_missing_argument() {
        let endpoint = endpoint("uri=https://contoso.example.net");
        let err = endpoint.map_path_format("/users/{1}", &["only-one"]).unwrap_err();
        assert!(matches!(err, ApiManagementError::InvalidArgument(_)));
    }

    #[test]
    fn debug_redacts_secrets() {
        let endpoint = endpoint("serviceName=x;identifier=a;key=super-secret;accessToken=tok-123");
        let rendered = format!("{endpoint:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("tok-123"));
        assert!(rendered.contains("<redacted>"));
    }
}
