//! Wire DTOs for the authentication API boundary.
//!
//! DESIGN
//! ======
//! The server is loose about its auth response shape: login/register may
//! return the identity nested under `user` or as flat top-level fields, and
//! register may return no token at all. All shape tolerance is normalized
//! here so the session state machine never probes response fields itself.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated principal's profile fields.
///
/// Every field is optional: the server decides which fields a given
/// response carries, and the client copies them verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Identity {
    /// Numeric user id.
    pub id: Option<i64>,
    /// Login name.
    pub username: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Display name.
    pub full_name: Option<String>,
    /// Server-assigned role (e.g. `"USER"`).
    pub role: Option<String>,
}

/// Response body of the login and register endpoints.
///
/// Tolerates both response contracts: a nested `user` object, or flat
/// top-level `username`/`email` fields next to the token. Register may
/// return only a `message` and no token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthResponse {
    /// Bearer credential, absent when the server performed registration
    /// without logging the user in.
    pub token: Option<String>,
    /// Nested identity object, when the server sends one.
    pub user: Option<Identity>,
    /// Flat-shape login name.
    pub username: Option<String>,
    /// Flat-shape email address.
    pub email: Option<String>,
    /// Informational message (e.g. register acknowledgement).
    pub message: Option<String>,
}

impl AuthResponse {
    /// Extract the identity, preferring the nested `user` object and
    /// otherwise assembling one from the flat top-level fields.
    #[must_use]
    pub fn identity(&self) -> Identity {
        self.user.clone().unwrap_or_else(|| Identity {
            username: self.username.clone(),
            email: self.email.clone(),
            ..Identity::default()
        })
    }
}

/// Request body of the register endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login name.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Plaintext password; hashing is the server's concern.
    pub password: String,
    /// Display name, omitted from the body when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Partial identity update, merged last-write-wins per field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPatch {
    /// New login name, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New email address, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New display name, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl IdentityPatch {
    /// Merge this patch over `identity`; absent patch fields leave the
    /// corresponding identity fields untouched.
    pub fn apply(&self, identity: &mut Identity) {
        if let Some(username) = &self.username {
            identity.username = Some(username.clone());
        }
        if let Some(email) = &self.email {
            identity.email = Some(email.clone());
        }
        if let Some(full_name) = &self.full_name {
            identity.full_name = Some(full_name.clone());
        }
    }
}
