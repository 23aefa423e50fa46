//! Product types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::PRODUCTS_COLLECTION;

/// Publication state of a product
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductState {
    #[default]
    NotPublished,
    Published,
}

crate::impl_entity_state_conversions!(ProductState {
    NotPublished => "notPublished",
    Published => "published",
});

/// Product as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(default)]
    pub approval_required: bool,
    #[serde(default)]
    pub state: ProductState,
    #[serde(skip)]
    pub entity_version: Option<String>,
}

impl Product {
    pub fn is_published(&self) -> bool {
        self.state == ProductState::Published
    }

    pub fn set_published(&mut self, published: bool) {
        self.state = if published { ProductState::Published } else { ProductState::NotPublished };
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id.as_deref().unwrap_or_default())
    }
}

/// Outbound product payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductProperties {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(default)]
    pub approval_required: bool,
    #[serde(default)]
    pub state: ProductState,
}

impl From<&Product> for ProductProperties {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            terms: product.terms.clone(),
            approval_required: product.approval_required,
            state: product.state,
        }
    }
}

crate::impl_entity!(Product, ProductProperties, PRODUCTS_COLLECTION);
