//! API operation types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::OPERATIONS_COLLECTION;

/// Operation of an API as returned by the service
///
/// Fields this client does not model (request/response descriptions,
/// template parameters) are preserved in `extra` and written back on
/// update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    pub entity_version: Option<String>,
}

/// Outbound operation payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationProperties {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&Operation> for OperationProperties {
    fn from(operation: &Operation) -> Self {
        Self {
            name: operation.name.clone(),
            description: operation.description.clone(),
            method: operation.method.clone(),
            url_template: operation.url_template.clone(),
            extra: operation.extra.clone(),
        }
    }
}

crate::impl_entity!(Operation, OperationProperties, OPERATIONS_COLLECTION);
