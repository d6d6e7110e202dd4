// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity, roles and credential exchange payloads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use validator::Validate;

/// Authority prefix used by some backend revisions (`ROLE_ADMIN`).
pub const ROLE_PREFIX: &str = "ROLE_";

/// Application role.
///
/// Backend revisions disagree on the `ROLE_` prefix and on casing, so all
/// spellings are folded into one canonical value on parse.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    User,
    Programador,
    Admin,
    /// Unknown role, kept upper-case without prefix.
    Other(String),
}

impl Role {
    /// Parse any accepted spelling; `None` for empty strings.
    pub fn parse(raw: &str) -> Option<Role> {
        let upper = raw.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix(ROLE_PREFIX).unwrap_or(&upper);
        let role = match bare {
            "" => return None,
            "USER" => Role::User,
            "PROGRAMADOR" | "PROGRAMMER" => Role::Programador,
            "ADMIN" => Role::Admin,
            other => Role::Other(other.to_string()),
        };
        Some(role)
    }

    /// Bare role name as the users endpoint expects it (`ADMIN`).
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "USER",
            Role::Programador => "PROGRAMADOR",
            Role::Admin => "ADMIN",
            Role::Other(name) => name,
        }
    }

    /// Prefixed authority form (`ROLE_ADMIN`), used for persistence.
    pub fn authority(&self) -> String {
        format!("{ROLE_PREFIX}{}", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Role::parse(&value).ok_or_else(|| "empty role name".to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.authority()
    }
}

/// Canonical authority string for a raw role name.
pub fn normalize_role(raw: &str) -> Option<String> {
    Role::parse(raw).map(|r| r.authority())
}

/// Parse a list of raw role strings, dropping blanks and duplicates.
pub fn parse_roles<I, S>(raw: I) -> BTreeSet<Role>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|r| Role::parse(r.as_ref()))
        .collect()
}

/// The authenticated user as held by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub roles: BTreeSet<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Identity {
    /// Derive the identity from a successful credential exchange.
    ///
    /// A response without roles gets `USER`, the role every account has
    /// on the backend; an authenticated identity never has an empty role set.
    pub fn from_auth(response: &AuthResponse) -> Self {
        let mut roles = parse_roles(&response.roles);
        if roles.is_empty() {
            roles.insert(Role::User);
        }
        Self {
            id: response.user_id,
            username: response.username.clone(),
            email: response.email.clone(),
            roles,
            display_name: response.display_name.clone(),
            photo_url: response.photo_url.clone(),
        }
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// UX-level ownership check; the backend remains the authority.
    pub fn owns(&self, owner_id: i64) -> bool {
        self.id == owner_id
    }

    /// Name to show in listings.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Username or email.
    pub identifier: String,
    pub password: String,
}

/// Account registration request.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Mínimo 3 caracteres."))]
    pub username: String,
    #[validate(email(message = "El formato del correo no es válido."))]
    pub email: String,
    #[validate(length(min = 6, message = "Mínimo 6 caracteres."))]
    pub password: String,
}

/// Successful credential exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(alias = "id")]
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Registration outcome. The register endpoint either returns a session
/// in the login shape or just echoes a confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Session(AuthResponse),
    Message(String),
}

impl RegisterOutcome {
    /// Resolve a raw register response body.
    pub fn from_body(body: &str) -> Self {
        let trimmed = body.trim();
        if let Ok(session) = serde_json::from_str::<AuthResponse>(trimmed) {
            return RegisterOutcome::Session(session);
        }
        if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(trimmed) {
            if let Some(msg) = map.get("message").and_then(|v| v.as_str()) {
                return RegisterOutcome::Message(msg.to_string());
            }
        }
        if let Ok(serde_json::Value::String(msg)) = serde_json::from_str(trimmed) {
            return RegisterOutcome::Message(msg);
        }
        RegisterOutcome::Message(trimmed.to_string())
    }
}
