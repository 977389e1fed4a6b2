//! Authenticated user identity.

use serde::{Deserialize, Serialize};

/// Public attributes of an authenticated user.
///
/// Produced by the credential directory on a successful login. The password
/// verifier stays inside the directory and is never copied here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Directory-assigned user id.
    pub id: String,
    /// Login key; compared case-sensitively.
    pub email: String,
    /// Display name shown in the navigation shell.
    pub name: String,
    /// Free-form role label, e.g. `Administrator`.
    pub role: String,
}

impl Identity {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role: role.into(),
        }
    }
}
