// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use crate::error::ApiError;
use crate::gateways::ApiClient;
use crate::models::{Profile, ProfileUpdateDto};

const ME_PATH: &str = "/api/profile/me";

/// Profile of the logged-in user.
#[derive(Clone)]
pub struct ProfileGateway {
    api: ApiClient,
}

impl ProfileGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn me(&self) -> Result<Profile, ApiError> {
        self.api.get_json(ME_PATH).await
    }

    pub async fn update_me(&self, dto: &ProfileUpdateDto) -> Result<Profile, ApiError> {
        self.api.put_json(ME_PATH, dto).await
    }
}
