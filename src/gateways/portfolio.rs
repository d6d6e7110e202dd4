// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use crate::error::ApiError;
use crate::gateways::ApiClient;
use crate::models::{Portfolio, PortfolioDraft, PortfolioPage};

const BASE: &str = "/api/portfolios";

/// Portfolio projects.
#[derive(Clone)]
pub struct PortfolioGateway {
    api: ApiClient,
}

impl PortfolioGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self, id: i64) -> Result<Portfolio, ApiError> {
        self.api.get_json(&format!("{BASE}/{id}")).await
    }

    /// One page of projects; `page` is zero-based.
    pub async fn list(&self, page: u32, size: u32) -> Result<PortfolioPage, ApiError> {
        self.api
            .get_json_with_query(BASE, &[("page", page), ("size", size)])
            .await
    }

    pub async fn create(&self, draft: &PortfolioDraft) -> Result<Portfolio, ApiError> {
        self.api.post_json(BASE, draft).await
    }

    pub async fn update(&self, id: i64, draft: &PortfolioDraft) -> Result<Portfolio, ApiError> {
        self.api.put_json(&format!("{BASE}/{id}"), draft).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&format!("{BASE}/{id}")).await
    }
}
