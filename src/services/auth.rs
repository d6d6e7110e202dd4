// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, registration and logout against the session store.

use crate::error::{AppError, Result};
use crate::gateways::{AuthGateway, ProfileGateway};
use crate::models::{Identity, Profile, ProfileUpdateDto, RegisterOutcome, RegisterRequest};
use crate::session::SessionStore;
use std::sync::Arc;
use validator::Validate;

/// Glue between the credential gateway and the session store.
#[derive(Clone)]
pub struct AuthService {
    gateway: AuthGateway,
    profile: ProfileGateway,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(gateway: AuthGateway, profile: ProfileGateway, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            profile,
            session,
        }
    }

    /// Log in with a username or email.
    ///
    /// Blank input is rejected before any request is sent. On failure the
    /// session is left exactly as it was.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<Identity> {
        let identifier = identifier.trim();
        if identifier.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Usuario y contraseña son obligatorios.".to_string(),
            ));
        }

        let response = self.gateway.login(identifier, password).await.map_err(|e| {
            tracing::warn!(error = %e, "Login failed");
            AppError::from(e)
        })?;
        self.session.set_session(&response)
    }

    /// Create an account. When the backend answers with a session the user
    /// is logged in straight away.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome> {
        request.validate()?;
        let outcome = self.gateway.register(request).await?;
        match &outcome {
            RegisterOutcome::Session(response) => {
                self.session.set_session(response)?;
            }
            RegisterOutcome::Message(msg) => {
                tracing::info!(username = %request.username, message = %msg, "Account registered");
            }
        }
        Ok(outcome)
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    pub async fn profile(&self) -> Result<Profile> {
        Ok(self.profile.me().await?)
    }

    /// Update the profile and mirror the display data into the session.
    pub async fn update_profile(&self, dto: &ProfileUpdateDto) -> Result<Profile> {
        dto.validate()?;
        let profile = self.profile.update_me(dto).await?;
        self.session.refresh_identity(&profile);
        Ok(profile)
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }
}
