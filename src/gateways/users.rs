// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use crate::error::ApiError;
use crate::gateways::ApiClient;
use crate::models::{UpdateRolesDto, UserAccount};

const BASE: &str = "/api/users";

/// Account administration (admin only on the backend).
#[derive(Clone)]
pub struct UsersGateway {
    api: ApiClient,
}

impl UsersGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.api.get_json(BASE).await
    }

    pub async fn update_roles(&self, id: i64, dto: &UpdateRolesDto) -> Result<UserAccount, ApiError> {
        self.api.put_json(&format!("{BASE}/{id}/roles"), dto).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&format!("{BASE}/{id}")).await
    }
}
