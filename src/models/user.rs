//! User accounts as seen by the admin panel.

use crate::models::auth::{parse_roles, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Account record from `/api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub profile_id: Option<i64>,
    #[serde(default)]
    pub portfolio_id: Option<i64>,
}

fn default_enabled() -> bool {
    true
}

impl UserAccount {
    /// Roles folded into their canonical form.
    pub fn role_set(&self) -> BTreeSet<Role> {
        parse_roles(&self.roles)
    }
}

/// Body of `PUT /api/users/{id}/roles`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolesDto {
    /// Bare role names (`ADMIN`, not `ROLE_ADMIN`).
    pub role_names: Vec<String>,
}

impl UpdateRolesDto {
    pub fn from_roles<'a>(roles: impl IntoIterator<Item = &'a Role>) -> Self {
        let mut role_names: Vec<String> = roles.into_iter().map(|r| r.as_str().to_string()).collect();
        role_names.sort();
        role_names.dedup();
        Self { role_names }
    }
}
