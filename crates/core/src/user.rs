use serde::{Deserialize, Serialize};

use crate::role::Role;

/// A platform account as returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
}

/// A logged-in credential: the opaque bearer token plus its account.
///
/// Matches the wire shape of the login/register responses, so it
/// deserializes straight from them. Lifetime is owned by the session
/// store: created on login, removed on logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_deserializes_from_login_response() {
        let body = r#"{
            "token": "abc123",
            "user": {"id": 7, "email": "jean@example.com", "name": "Jean", "role": "farmer"}
        }"#;
        let session: Session = serde_json::from_str(body).unwrap();
        assert_eq!(session.token, "abc123");
        assert_eq!(session.user.role, Role::Farmer);
    }

    #[test]
    fn missing_name_defaults_to_empty() {
        let body = r#"{"id": 1, "email": "a@b.c", "role": "admin"}"#;
        let user: User = serde_json::from_str(body).unwrap();
        assert!(user.name.is_empty());
    }
}
