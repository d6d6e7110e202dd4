// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin reports (`/api/reports`).

use crate::error::ApiError;
use crate::gateways::ApiClient;
use crate::models::{
    AdminDashboard, DateCount, ProgrammerCount, ProjectsByUser, ReportDocument, ReportFile,
    ReportFilters, ReportFormat, StatusCount,
};
use chrono::Utc;

const BASE: &str = "/api/reports";

#[derive(Clone)]
pub struct ReportsGateway {
    api: ApiClient,
}

impl ReportsGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Booking counts per status.
    pub async fn summary(&self, filters: &ReportFilters) -> Result<Vec<StatusCount>, ApiError> {
        self.api
            .get_json_with_query(&format!("{BASE}/asesorias-summary"), &filters.to_query())
            .await
    }

    pub async fn by_programmer(&self, filters: &ReportFilters) -> Result<Vec<ProgrammerCount>, ApiError> {
        self.api
            .get_json_with_query(&format!("{BASE}/asesorias-by-programmer"), &filters.to_query())
            .await
    }

    pub async fn by_date(&self, filters: &ReportFilters) -> Result<Vec<DateCount>, ApiError> {
        self.api
            .get_json_with_query(&format!("{BASE}/asesorias-by-date"), &filters.to_query())
            .await
    }

    pub async fn projects_by_user(&self, filters: &ReportFilters) -> Result<Vec<ProjectsByUser>, ApiError> {
        self.api
            .get_json_with_query(&format!("{BASE}/projects-by-user"), &filters.to_query())
            .await
    }

    pub async fn dashboard(&self, filters: &ReportFilters) -> Result<AdminDashboard, ApiError> {
        self.api
            .get_json_with_query(&format!("{BASE}/dashboard"), &filters.to_query())
            .await
    }

    /// Download a generated document. The file name is stamped with
    /// today's date, e.g. `asesorias-2026-10-18.pdf`.
    pub async fn download(
        &self,
        document: ReportDocument,
        format: ReportFormat,
        filters: &ReportFilters,
    ) -> Result<ReportFile, ApiError> {
        let path = format!("{BASE}/download/{}", document.download_path(format));
        let (bytes, content_type) = self.api.get_bytes(&path, &filters.to_query()).await?;

        let stem = match document {
            ReportDocument::Asesorias => "asesorias",
            ReportDocument::Projects => "proyectos",
        };
        let file_name = format!(
            "{stem}-{}.{}",
            Utc::now().format("%Y-%m-%d"),
            format.extension()
        );
        tracing::info!(file_name = %file_name, size = bytes.len(), "Report downloaded");

        Ok(ReportFile {
            bytes,
            content_type,
            file_name,
        })
    }
}
