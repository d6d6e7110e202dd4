// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Portfolio projects shown on programmer profiles.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: i64,
    /// Owning user; absent on public listings of older backends.
    #[serde(default, alias = "programmerId", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, alias = "repoUrl", skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    /// User ids that liked the project.
    #[serde(default)]
    pub likes: Vec<i64>,
}

impl Portfolio {
    pub fn is_liked_by(&self, user_id: i64) -> bool {
        self.likes.contains(&user_id)
    }
}

/// One page of `/api/portfolios`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPage {
    pub content: Vec<Portfolio>,
    pub total_elements: u64,
    pub total_pages: u32,
    #[serde(default, alias = "number")]
    pub current_page: u32,
}

/// Create/update payload for a project.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDraft {
    #[validate(length(min = 3, max = 120, message = "Mínimo 3 caracteres."))]
    pub title: String,
    #[validate(length(min = 10, message = "Mínimo 10 caracteres."))]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub demo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub repository_url: Option<String>,
    pub technologies: Vec<String>,
}
