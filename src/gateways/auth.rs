// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential exchange with `/api/auth`.

use crate::error::ApiError;
use crate::gateways::ApiClient;
use crate::models::{AuthResponse, LoginRequest, RegisterOutcome, RegisterRequest};

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";

/// Login and registration calls. Both endpoints are public, so no
/// bearer token is ever attached.
#[derive(Clone)]
pub struct AuthGateway {
    api: ApiClient,
}

impl AuthGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a session.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            identifier: identifier.trim().to_string(),
            password: password.to_string(),
        };
        self.api.post_json(LOGIN_PATH, &body).await
    }

    /// Create an account. The body is read as text because the backend
    /// answers either with a session or with a bare confirmation message.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        let body = self.api.post_text(REGISTER_PATH, request).await?;
        Ok(RegisterOutcome::from_body(&body))
    }
}
