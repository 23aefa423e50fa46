//! Helpers shared by the entity types and the client

pub mod identifier;
pub mod serde;
