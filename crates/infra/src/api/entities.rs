//! Typed entity operations
//!
//! One implementation of get/get_metadata/list/create/update/delete,
//! shared by every collection through the [`Entity`] trait.
//!
//! A 404 is an expected outcome for reads and writes and is reported as
//! `None`/`false`; every other non-success status is translated into an
//! error.

use std::marker::PhantomData;

use apim_domain::{
    normalize_id, validate_id_length, ApiManagementError, Entity, EntityCollection, Result,
};
use reqwest::header::ETAG;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};
use url::Url;

use super::client::ApiManagementClient;
use super::errors::ErrorTranslator;
use crate::errors::InfraError;

/// Operations on one collection of `E`
pub struct EntityClient<'a, E> {
    client: &'a ApiManagementClient,
    collection: String,
    _entity: PhantomData<fn() -> E>,
}

impl<'a, E: Entity> EntityClient<'a, E> {
    pub(crate) fn new(client: &'a ApiManagementClient, collection: String) -> Self {
        Self { client, collection, _entity: PhantomData }
    }

    /// Collection path relative to the service root, e.g. `users`
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Fetch one entity; `None` if it does not exist
    ///
    /// The returned entity's version is the response `ETag`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty id, `RequestFailed` for any
    /// other non-success status, or a transport/codec error.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn get(&self, id: &str) -> Result<Option<E>> {
        let url = self.entity_url(&self.normalize(id)?)?;
        let response = self.client.execute(Method::GET, url, None, None).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if !status.is_success() => Err(ErrorTranslator::from_response(response).await),
            _ => {
                let version = entity_tag(&response);
                if version.is_none() {
                    warn!("response carried no ETag");
                }
                let mut entity: E = read_json(response).await?;
                entity.set_entity_version(version);
                Ok(Some(entity))
            }
        }
    }

    /// Fetch only the entity version (`ETag`) with a `HEAD` request;
    /// `None` if the entity does not exist
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty id, `RequestFailed` for any
    /// other non-success status, or a transport error.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn get_metadata(&self, id: &str) -> Result<Option<String>> {
        let url = self.entity_url(&self.normalize(id)?)?;
        let response = self.client.execute(Method::HEAD, url, None, None).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if !status.is_success() => Err(ErrorTranslator::from_response(response).await),
            _ => {
                let version = entity_tag(&response);
                if version.is_none() {
                    warn!("response carried no ETag");
                }
                Ok(version)
            }
        }
    }

    /// Fetch the first page of the collection
    ///
    /// # Errors
    /// Returns `RequestFailed` for a non-success status, or a
    /// transport/codec error.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn list(&self) -> Result<EntityCollection<E>> {
        let url = self.client.endpoint().map_path(&format!("/{}", self.collection))?;
        self.fetch_page(url).await
    }

    /// Fetch the page at `next_link`, as returned by a previous page
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an unusable link, `RequestFailed` for
    /// a non-success status, or a transport/codec error.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn list_page(&self, next_link: &str) -> Result<EntityCollection<E>> {
        if next_link.is_empty() {
            return Err(ApiManagementError::invalid_argument("next link must not be empty"));
        }
        let url = self.client.endpoint().map_path(next_link)?;
        self.fetch_page(url).await
    }

    /// Create an entity under `id`
    ///
    /// Returns `false` if the service answered 404.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty id and `IdentifierTooLong`
    /// for an id over 256 characters, both before any request is sent;
    /// `RequestFailed` for any other non-success status.
    #[instrument(skip(self, properties), fields(collection = %self.collection))]
    pub async fn create(&self, id: &str, properties: &E::Properties) -> Result<bool> {
        let id = self.normalize(id)?;
        validate_id_length(&id)?;

        let url = self.entity_url(&id)?;
        let body = serde_json::to_vec(properties)?;
        let response = self.client.execute(Method::PUT, url, Some(body), None).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if !status.is_success() => Err(ErrorTranslator::from_response(response).await),
            status => {
                match entity_tag(&response) {
                    Some(version) => info!(%id, %status, %version, "entity created"),
                    None => warn!(%id, %status, "entity created but response carried no ETag"),
                }
                Ok(true)
            }
        }
    }

    /// Update `entity` with optimistic concurrency
    ///
    /// Sends the entity's properties with `If-Match` set to its version.
    /// On success the entity's version is replaced by the response `ETag`
    /// (cleared if none was returned). Returns `false` if the entity no
    /// longer exists. A stale version surfaces as a `RequestFailed` error
    /// (typically 412).
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the entity has no id or no version.
    #[instrument(skip(self, entity), fields(collection = %self.collection))]
    pub async fn update(&self, entity: &mut E) -> Result<bool> {
        let id = entity
            .id()
            .ok_or_else(|| ApiManagementError::invalid_argument("entity has no id"))?;
        let version = required_version(entity.entity_version())?;

        let id = self.normalize(id)?;
        let url = self.entity_url(&id)?;
        let body = serde_json::to_vec(&entity.properties())?;
        let response = self.client.execute(Method::PATCH, url, Some(body), Some(version)).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if !status.is_success() => Err(ErrorTranslator::from_response(response).await),
            _ => {
                let version = entity_tag(&response);
                if version.is_none() {
                    warn!(%id, "entity updated but response carried no ETag");
                }
                info!(%id, "entity updated");
                entity.set_entity_version(version);
                Ok(true)
            }
        }
    }

    /// Delete the entity `id` if its version still matches
    ///
    /// Returns `true` on 204 and `false` on any other success status.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty id or version, and
    /// `RequestFailed` for any non-success status, 404 included.
    #[instrument(skip(self, entity_version), fields(collection = %self.collection))]
    pub async fn delete(&self, id: &str, entity_version: &str) -> Result<bool> {
        let version = required_version(Some(entity_version))?;
        let id = self.normalize(id)?;
        let url = self.entity_url(&id)?;
        let response = self.client.execute(Method::DELETE, url, None, Some(version)).await?;

        match response.status() {
            StatusCode::NO_CONTENT => {
                info!(%id, "entity deleted");
                Ok(true)
            }
            status if !status.is_success() => Err(ErrorTranslator::from_response(response).await),
            status => {
                warn!(%id, %status, "delete succeeded without 204");
                Ok(false)
            }
        }
    }

    /// Delete `entity` using its own id and version
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the entity has no id or no version; see
    /// [`delete`](Self::delete).
    pub async fn delete_entity(&self, entity: &E) -> Result<bool> {
        let id = entity
            .id()
            .ok_or_else(|| ApiManagementError::invalid_argument("entity has no id"))?;
        let version = required_version(entity.entity_version())?;
        self.delete(id, version).await
    }

    async fn fetch_page(&self, url: Url) -> Result<EntityCollection<E>> {
        let response = self.client.execute(Method::GET, url, None, None).await?;
        if !response.status().is_success() {
            return Err(ErrorTranslator::from_response(response).await);
        }
        read_json(response).await
    }

    /// Bare id for this collection; nested collections also accept the
    /// short `{collection}/{id}` form.
    fn normalize(&self, id: &str) -> Result<String> {
        let bare = normalize_id(&self.collection, id)?;
        if bare == id && self.collection != E::COLLECTION {
            return normalize_id(E::COLLECTION, id);
        }
        Ok(bare)
    }

    fn entity_url(&self, id: &str) -> Result<Url> {
        self.client
            .endpoint()
            .map_path(&format!("/{}/{}", self.collection, urlencoding::encode(id)))
    }
}

fn required_version(version: Option<&str>) -> Result<&str> {
    version
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiManagementError::invalid_argument("entity version is required"))
}

/// Raw `ETag` value, quotes included
fn entity_tag(response: &Response) -> Option<String> {
    response.headers().get(ETAG).and_then(|value| value.to_str().ok()).map(str::to_string)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await.map_err(InfraError::from)?;
    Ok(serde_json::from_slice(&body)?)
}
