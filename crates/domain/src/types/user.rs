//! User types
//!
//! Developer accounts registered with the service instance.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::USERS_COLLECTION;

/// Whether a user may sign in and call subscribed APIs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserState {
    #[default]
    Active,
    Blocked,
}

crate::impl_entity_state_conversions!(UserState {
    Active => "active",
    Blocked => "blocked",
});

/// User as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Resource path, e.g. `/users/42`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub state: UserState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<DateTime<Utc>>,
    /// `ETag` of the response this user was read from
    #[serde(skip)]
    pub entity_version: Option<String>,
}

impl User {
    pub fn is_blocked(&self) -> bool {
        self.state == UserState::Blocked
    }

    pub fn set_blocked(&mut self, blocked: bool) {
        self.state = if blocked { UserState::Blocked } else { UserState::Active };
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.first_name, self.last_name, self.email)
    }
}

/// Outbound user payload for create and update
///
/// `password` is write-only: it is never returned by the service, so an
/// update built from a fetched [`User`] leaves it unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProperties {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub state: UserState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl UserProperties {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl From<&User> for UserProperties {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            password: None,
            state: user.state,
            note: user.note.clone(),
        }
    }
}

crate::impl_entity!(User, UserProperties, USERS_COLLECTION);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::Entity;

    #[test]
    fn deserializes_service_payload() {
        let user: User = serde_json::from_value(json!({
            "id": "/users/42",
            "firstName": "Testy",
            "lastName": "McTesterson",
            "email": "no-reply@noreply.org",
            "state": "blocked",
            "registrationDate": "2014-06-24T20:46:56.123Z"
        }))
        .unwrap();

        assert_eq!(user.id(), Some("/users/42"));
        assert!(user.is_blocked());
        assert!(user.registration_date.is_some());
        assert!(user.entity_version().is_none());
        assert_eq!(user.to_string(), "Testy McTesterson (no-reply@noreply.org)");
    }

    #[test]
    fn properties_omit_server_assigned_fields() {
        let mut user = User {
            id: Some("/users/42".to_string()),
            first_name: "Testy".to_string(),
            last_name: "McTesterson".to_string(),
            email: "no-reply@noreply.org".to_string(),
            registration_date: Some(Utc::now()),
            entity_version: Some("\"AAAA\"".to_string()),
            ..User::default()
        };
        user.set_blocked(true);

        let payload = serde_json::to_value(user.properties()).unwrap();
        let object = payload.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("registrationDate"));
        assert!(!object.contains_key("password"));
        assert_eq!(object["state"], "blocked");
        assert_eq!(object["firstName"], "Testy");
    }

    #[test]
    fn new_properties_default_to_active() {
        let props = UserProperties::new("A", "B", "a@b.c").with_password("P@ssw0rd1");
        let payload = serde_json::to_value(&props).unwrap();
        assert_eq!(payload["state"], "active");
        assert_eq!(payload["password"], "P@ssw0rd1");
        assert!(payload.get("note").is_none());
    }
}
