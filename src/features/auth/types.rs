//! Request and response types for auth-related API calls. Request bodies carry
//! plaintext passwords, so they borrow from the form and must never be logged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier as sent by the backend, either a string or an integer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(formatter, "{id}"),
            UserId::Text(id) => formatter.write_str(id),
        }
    }
}

/// Minimal user data cached by the session store for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Present for accounts created through Google sign-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl UserSummary {
    /// True for federated-identity accounts.
    pub fn is_federated(&self) -> bool {
        self.google_id.is_some()
    }
}

/// `GET /user/profile` success body.
#[derive(Clone, Debug, Deserialize)]
pub struct ProfileEnvelope {
    pub user: UserSummary,
}

#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}
