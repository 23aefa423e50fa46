//! API types

use serde::{Deserialize, Serialize};

use super::{EntityCollection, Operation};
use crate::constants::APIS_COLLECTION;

/// API as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Api {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Embedded operations, present when the service expands them
    #[serde(default)]
    pub operations: EntityCollection<Operation>,
    #[serde(skip)]
    pub entity_version: Option<String>,
}

/// Outbound API payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProperties {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&Api> for ApiProperties {
    fn from(api: &Api) -> Self {
        Self {
            name: api.name.clone(),
            description: api.description.clone(),
            service_url: api.service_url.clone(),
            path: api.path.clone(),
        }
    }
}

crate::impl_entity!(Api, ApiProperties, APIS_COLLECTION);
