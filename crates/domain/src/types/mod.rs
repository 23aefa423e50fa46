//! Entity schemas and wire envelopes
//!
//! Every entity comes in two shapes: the entity as the service returns it
//! (server-assigned `id`, read-only fields, entity-version) and the
//! outbound properties shape sent on create/update, which never carries
//! server-assigned fields.

pub mod api;
pub mod collection;
pub mod error_body;
pub mod group;
pub mod operation;
pub mod product;
pub mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use api::{Api, ApiProperties};
pub use collection::EntityCollection;
pub use error_body::{ErrorBody, ErrorDetail, ErrorEnvelope};
pub use group::{Group, GroupProperties};
pub use operation::{Operation, OperationProperties};
pub use product::{Product, ProductProperties, ProductState};
pub use user::{User, UserProperties, UserState};

/// A resource managed through a collection endpoint.
pub trait Entity: DeserializeOwned + Send + Sync {
    /// Outbound payload for create and update.
    type Properties: Serialize + Send + Sync;

    /// Top-level collection segment, e.g. `users`.
    const COLLECTION: &'static str;

    /// Server-assigned resource path (`/{collection}/{id}`), if known.
    fn id(&self) -> Option<&str>;

    /// Opaque concurrency token taken from the response `ETag`.
    fn entity_version(&self) -> Option<&str>;

    fn set_entity_version(&mut self, version: Option<String>);

    /// Outbound shape of this entity, used by update.
    fn properties(&self) -> Self::Properties;
}
