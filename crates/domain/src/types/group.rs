//! Group types

use serde::{Deserialize, Serialize};

use crate::constants::GROUPS_COLLECTION;

/// Group as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// System groups (administrators, developers, guests) cannot be modified
    #[serde(default)]
    pub built_in: bool,
    #[serde(skip)]
    pub entity_version: Option<String>,
}

/// Outbound group payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupProperties {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Group> for GroupProperties {
    fn from(group: &Group) -> Self {
        Self { name: group.name.clone(), description: group.description.clone() }
    }
}

crate::impl_entity!(Group, GroupProperties, GROUPS_COLLECTION);
