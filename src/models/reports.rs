// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin reports and downloadable documents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammerCount {
    pub programmer_id: i64,
    pub programmer_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsByUser {
    pub user_id: i64,
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    pub total_projects: u64,
    #[serde(default)]
    pub active_projects: u64,
}

/// Everything the admin dashboard shows, in one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_asesorias: u64,
    pub total_programmers: u64,
    pub total_users: u64,
    // The backend field name carries a typo; both spellings are accepted.
    #[serde(default, alias = "asesoriasBySatus")]
    pub asesorias_by_status: Vec<StatusCount>,
    #[serde(default)]
    pub asesorias_by_programmer: Vec<ProgrammerCount>,
    #[serde(default)]
    pub asesorias_by_date: Vec<DateCount>,
    #[serde(default)]
    pub projects_by_user: Vec<ProjectsByUser>,
}

/// Optional report filters, sent as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub programmer_id: Option<i64>,
    pub status: Option<String>,
    pub user_id: Option<i64>,
}

impl ReportFilters {
    /// Query pairs for the set filters, in a stable order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(d) = self.start_date {
            query.push(("startDate", d.format("%Y-%m-%d").to_string()));
        }
        if let Some(d) = self.end_date {
            query.push(("endDate", d.format("%Y-%m-%d").to_string()));
        }
        if let Some(id) = self.programmer_id {
            query.push(("programmerId", id.to_string()));
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            query.push(("status", status.to_string()));
        }
        if let Some(id) = self.user_id {
            query.push(("userId", id.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportDocument {
    Asesorias,
    Projects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    Xlsx,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Xlsx => "xlsx",
        }
    }
}

impl ReportDocument {
    /// Path segment under `/api/reports/download/`.
    pub fn download_path(self, format: ReportFormat) -> String {
        let doc = match self {
            ReportDocument::Asesorias => "asesorias",
            ReportDocument::Projects => "projects",
        };
        format!("{doc}-{}", format.extension())
    }
}

/// A downloaded report payload.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_skip_unset_fields() {
        let filters = ReportFilters {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1),
            status: Some(String::new()),
            user_id: Some(4),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query(),
            vec![("startDate", "2026-01-01".to_string()), ("userId", "4".to_string())]
        );
    }

    #[test]
    fn test_dashboard_accepts_misspelled_field() {
        let json = r#"{"totalAsesorias":3,"totalProgrammers":1,"totalUsers":5,
            "asesoriasBySatus":[{"status":"PENDIENTE","count":3}]}"#;
        let dash: AdminDashboard = serde_json::from_str(json).unwrap();
        assert_eq!(dash.asesorias_by_status.len(), 1);
    }

    #[test]
    fn test_download_paths() {
        assert_eq!(ReportDocument::Asesorias.download_path(ReportFormat::Pdf), "asesorias-pdf");
        assert_eq!(ReportDocument::Projects.download_path(ReportFormat::Xlsx), "projects-xlsx");
    }
}
