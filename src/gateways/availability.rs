// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Programmer availability slots (`/api/availability`).

use crate::error::ApiError;
use crate::gateways::ApiClient;
use crate::models::{AvailabilitySlot, CreateAvailabilityDto, UpdateAvailabilityDto};

const BASE: &str = "/api/availability";

#[derive(Clone)]
pub struct AvailabilityGateway {
    api: ApiClient,
}

impl AvailabilityGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Slots of the logged-in programmer.
    pub async fn mine(&self) -> Result<Vec<AvailabilitySlot>, ApiError> {
        self.api.get_json(&format!("{BASE}/me")).await
    }

    pub async fn by_programmer(&self, programmer_id: i64) -> Result<Vec<AvailabilitySlot>, ApiError> {
        self.api
            .get_json(&format!("{BASE}/programmer/{programmer_id}"))
            .await
    }

    pub async fn create(&self, dto: &CreateAvailabilityDto) -> Result<AvailabilitySlot, ApiError> {
        self.api.post_json(BASE, dto).await
    }

    pub async fn update(
        &self,
        id: i64,
        dto: &UpdateAvailabilityDto,
    ) -> Result<AvailabilitySlot, ApiError> {
        self.api.put_json(&format!("{BASE}/{id}"), dto).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&format!("{BASE}/{id}")).await
    }
}
