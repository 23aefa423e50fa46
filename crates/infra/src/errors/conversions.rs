//! Conversions from external infrastructure errors into domain errors.

use apim_domain::ApiManagementError;
use reqwest::header::InvalidHeaderValue;
use reqwest::Error as HttpError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ApiManagementError);

impl From<InfraError> for ApiManagementError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ApiManagementError> for InfraError {
    fn from(value: ApiManagementError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoApiManagementError {
    fn into_api_management(self) -> ApiManagementError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiManagementError */
/* -------------------------------------------------------------------------- */

impl IntoApiManagementError for HttpError {
    fn into_api_management(self) -> ApiManagementError {
        if self.is_timeout() {
            return ApiManagementError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return ApiManagementError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return ApiManagementError::Config(format!("invalid HTTP client setup: {self}"));
        }

        if self.is_decode() {
            return ApiManagementError::Serialization(format!(
                "failed to decode HTTP response: {self}"
            ));
        }

        ApiManagementError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_api_management())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → ApiManagementError */
/* -------------------------------------------------------------------------- */

impl IntoApiManagementError for UrlError {
    fn into_api_management(self) -> ApiManagementError {
        ApiManagementError::InvalidArgument(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_api_management())
    }
}

/* -------------------------------------------------------------------------- */
/* InvalidHeaderValue → ApiManagementError */
/* -------------------------------------------------------------------------- */

impl IntoApiManagementError for InvalidHeaderValue {
    fn into_api_management(self) -> ApiManagementError {
        ApiManagementError::InvalidArgument(
            "value contains characters not allowed in an HTTP header".into(),
        )
    }
}

impl From<InvalidHeaderValue> for InfraError {
    fn from(value: InvalidHeaderValue) -> Self {
        InfraError(value.into_api_management())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
