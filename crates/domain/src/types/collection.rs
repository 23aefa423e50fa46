//! List envelope
//!
//! List responses wrap their items as
//! `{"value": [...], "count": <total>, "nextLink": "<continuation>"}`.
//! Pages are not followed automatically; callers pass `next_link` back to
//! the client to fetch the next page.

use serde::{Deserialize, Serialize};

use crate::utils::serde::null_as_default;

/// One page of a collection listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct EntityCollection<T> {
    #[serde(rename = "value", default = "Vec::new", deserialize_with = "null_as_default")]
    items: Vec<T>,
    #[serde(rename = "count", default)]
    total_count: u64,
    #[serde(rename = "nextLink", default, skip_serializing_if = "Option::is_none")]
    next_link: Option<String>,
}

impl<T> EntityCollection<T> {
    pub fn new(items: Vec<T>, total_count: u64, next_link: Option<String>) -> Self {
        Self { items, total_count, next_link }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Total size of the collection on the server, across all pages
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Continuation link; `None` on the last page
    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref().filter(|link| !link.is_empty())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new(), total_count: 0, next_link: None }
    }
}

impl<T> IntoIterator for EntityCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a EntityCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
