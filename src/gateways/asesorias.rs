// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bookings (`/api/asesorias`).

use crate::error::ApiError;
use crate::gateways::ApiClient;
use crate::models::{
    Asesoria, AsesoriaStatus, CreateAsesoriaDto, Modality, Party, Programmer,
    UpdateAsesoriaStatusDto,
};

const BASE: &str = "/api/asesorias";

#[derive(Clone)]
pub struct AsesoriaGateway {
    api: ApiClient,
}

impl AsesoriaGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Request a booking; the backend creates it as `PENDIENTE`.
    pub async fn create(&self, dto: &CreateAsesoriaDto) -> Result<Asesoria, ApiError> {
        self.api.post_json(BASE, dto).await
    }

    /// Bookings of the logged-in user, optionally only those where the user
    /// is on one side.
    pub async fn mine(&self, role: Option<Party>) -> Result<Vec<Asesoria>, ApiError> {
        let path = format!("{BASE}/mis-asesorias");
        match role {
            Some(party) => {
                let role = match party {
                    Party::Client => "client",
                    Party::Programmer => "programmer",
                };
                self.api.get_json_with_query(&path, &[("role", role)]).await
            }
            None => self.api.get_json(&path).await,
        }
    }

    /// Bookings addressed to the logged-in programmer.
    pub async fn received(&self) -> Result<Vec<Asesoria>, ApiError> {
        self.api.get_json(&format!("{BASE}/recibidas")).await
    }

    pub async fn get(&self, id: i64) -> Result<Asesoria, ApiError> {
        self.api.get_json(&format!("{BASE}/{id}")).await
    }

    pub async fn update_status(&self, id: i64, status: AsesoriaStatus) -> Result<Asesoria, ApiError> {
        self.api
            .put_json(
                &format!("{BASE}/{id}/status"),
                &UpdateAsesoriaStatusDto { status },
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&format!("{BASE}/{id}")).await
    }

    /// Programmers open for booking, optionally filtered by modality.
    pub async fn programmers(&self, modality: Option<Modality>) -> Result<Vec<Programmer>, ApiError> {
        let path = format!("{BASE}/programmers");
        match modality {
            Some(m) => {
                self.api
                    .get_json_with_query(&path, &[("modality", m.as_str())])
                    .await
            }
            None => self.api.get_json(&path).await,
        }
    }
}
