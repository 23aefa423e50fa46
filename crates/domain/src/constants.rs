//! Service constants
//!
//! Centralized location for the wire-level constants shared by the
//! endpoint, the signing pipeline and the typed client.

// Versioning
pub const DEFAULT_API_VERSION: &str = "2014-02-14-preview";
pub const API_VERSION_PARAMETER: &str = "api-version";

// Connection descriptor keys (matched case-insensitively)
pub const KEY_URI: &str = "uri";
pub const KEY_SERVICE_NAME: &str = "servicename";
pub const KEY_IDENTIFIER: &str = "identifier";
pub const KEY_KEY: &str = "key";
pub const KEY_VERSION: &str = "version";
pub const KEY_ACCESS_TOKEN: &str = "accesstoken";

/// Well-known configuration name consulted when no descriptor is given.
pub const DEFAULT_CONNECTION_NAME: &str = "ApiManagement";

// Authentication
pub const SHARED_ACCESS_SIGNATURE_SCHEME: &str = "SharedAccessSignature";
pub const TOKEN_VALIDITY_SECS: i64 = 4 * 60 * 60;
pub const TOKEN_REFRESH_THRESHOLD_SECS: i64 = 60;

// Entities
pub const MAX_IDENTIFIER_LENGTH: usize = 256;
pub const USERS_COLLECTION: &str = "users";
pub const GROUPS_COLLECTION: &str = "groups";
pub const PRODUCTS_COLLECTION: &str = "products";
pub const APIS_COLLECTION: &str = "apis";
pub const OPERATIONS_COLLECTION: &str = "operations";

/// Build the default management host for a service name.
pub fn service_host_uri(service_name: &str) -> String {
    format!("https://{service_name}.management.azure-api.net")
}
