//! Macros for entity boilerplate
//!
//! `impl_entity_state_conversions!` provides Display and FromStr for the
//! string-valued state enums the service uses (`active`/`blocked`,
//! `published`/`notPublished`). `impl_entity!` wires an entity struct to
//! the [`Entity`](crate::types::Entity) trait.
//!
//! # Example
//!
//! ```rust
//! use apim_domain::impl_entity_state_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Public,
//!     Hidden,
//! }
//!
//! impl_entity_state_conversions!(Visibility {
//!     Public => "public",
//!     Hidden => "hidden",
//! });
//! ```

/// Implements Display and FromStr traits for state enums
///
/// # Features
///
/// - Case-insensitive parsing (e.g., "BLOCKED", "blocked", "Blocked" all work)
/// - Display renders the exact wire spelling
/// - Descriptive error messages with enum name
#[macro_export]
macro_rules! impl_entity_state_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

/// Implements [`Entity`](crate::types::Entity) for a struct with `id` and
/// `entity_version` fields whose properties shape converts `From<&Entity>`.
#[macro_export]
macro_rules! impl_entity {
    ($entity:ty, $properties:ty, $collection:expr) => {
        impl $crate::types::Entity for $entity {
            type Properties = $properties;

            const COLLECTION: &'static str = $collection;

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn entity_version(&self) -> Option<&str> {
                self.entity_version.as_deref()
            }

            fn set_entity_version(&mut self, version: Option<String>) {
                self.entity_version = version;
            }

            fn properties(&self) -> Self::Properties {
                <$properties>::from(self)
            }
        }
    };
}
