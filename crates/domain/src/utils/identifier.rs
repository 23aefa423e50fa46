//! Identifier normalization
//!
//! Entity ids may be given bare (`42`) or as the resource path the service
//! returns in the `id` field (`/users/42`, `users/42/`). Both forms refer
//! to the same entity and normalize to the bare id.

use crate::constants::MAX_IDENTIFIER_LENGTH;
use crate::errors::{ApiManagementError, Result};

/// Extract the bare id from `id`, which may be a `{collection}/{id}` path.
///
/// The collection token is matched case-insensitively and may carry a
/// leading `/`; a single trailing `/` is dropped. Inputs that do not start
/// with the collection are returned unchanged.
///
/// # Errors
/// Returns `InvalidArgument` if `id` is empty.
pub fn normalize_id(collection: &str, id: &str) -> Result<String> {
    if id.is_empty() {
        return Err(ApiManagementError::invalid_argument("id must not be empty"));
    }

    let collection = collection.trim_matches('/');
    let path = id.strip_prefix('/').unwrap_or(id);

    let bare = strip_prefix_ignore_case(path, collection)
        .and_then(|rest| rest.strip_prefix('/'))
        .map(|rest| rest.strip_suffix('/').unwrap_or(rest))
        .filter(|rest| !rest.is_empty());

    Ok(bare.unwrap_or(id).to_string())
}

/// Reject ids longer than the service accepts.
///
/// # Errors
/// Returns `IdentifierTooLong` when `id` exceeds 256 characters.
pub fn validate_id_length(id: &str) -> Result<()> {
    let length = id.chars().count();
    if length > MAX_IDENTIFIER_LENGTH {
        return Err(ApiManagementError::IdentifierTooLong { length, max: MAX_IDENTIFIER_LENGTH });
    }
    Ok(())
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &value[prefix.len()..])
}
