//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "alice")]
    pub user_name: Option<String>,
    #[schema(example = "US")]
    pub country: Option<String>,
}

impl User {
    /// Payload view of this user, without the identifier.
    pub fn payload(&self) -> UserPayload {
        UserPayload {
            user_name: self.user_name.clone(),
            country: self.country.clone(),
        }
    }
}

/// Body of create and update requests.
///
/// Any `id` sent by the client is ignored; the store assigns ids and the
/// request path names the row to update. Missing or `null` fields are
/// stored as NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[schema(example = "alice")]
    pub user_name: Option<String>,
    #[schema(example = "US")]
    pub country: Option<String>,
}

impl UserPayload {
    pub fn new(user_name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            user_name: Some(user_name.into()),
            country: Some(country.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_fields() {
        let user = User {
            id: 7,
            user_name: Some("alice".to_string()),
            country: Some("US".to_string()),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 7, "userName": "alice", "country": "US" })
        );
    }

    #[test]
    fn payload_ignores_client_supplied_id() {
        let payload: UserPayload =
            serde_json::from_str(r#"{"id": 42, "userName": "bob", "country": "NL"}"#).unwrap();
        assert_eq!(payload, UserPayload::new("bob", "NL"));
    }

    #[test]
    fn payload_missing_fields_deserialize_as_none() {
        let payload: UserPayload = serde_json::from_str(r#"{"userName": "dave"}"#).unwrap();
        assert_eq!(payload.user_name.as_deref(), Some("dave"));
        assert_eq!(payload.country, None);

        let empty: UserPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, UserPayload::default());
    }
}
