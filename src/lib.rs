// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Asesorías client: book advisory sessions with programmers.
//!
//! This crate is the client side of the platform: it keeps the login
//! session, decides which screens a user may enter, authorizes every
//! outbound request, and drives the booking workflow against the
//! backend REST API.

pub mod config;
pub mod error;
pub mod gateways;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod services;
pub mod session;
pub mod time_utils;

use config::Config;
use gateways::{
    ApiClient, AsesoriaGateway, AuthGateway, AvailabilityGateway, PortfolioGateway,
    ProfileGateway, ReportsGateway, UsersGateway,
};
use middleware::RequestAuthorizer;
use navigation::Navigator;
use services::{AdminService, AuthService, BookingWorkflow, StatusService};
use session::{SessionStorage, SessionStore};
use std::sync::Arc;

/// Everything a front-end needs, wired around one shared session.
#[derive(Clone)]
pub struct AsesoriasClient {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub auth: AuthService,
    pub profile: ProfileGateway,
    pub portfolios: PortfolioGateway,
    pub availability: AvailabilityGateway,
    pub asesorias: AsesoriaGateway,
    pub users: UsersGateway,
    pub reports: ReportsGateway,
    pub status: StatusService,
    pub admin: AdminService,
}

impl AsesoriasClient {
    /// Build the client. The session is hydrated from `storage` here,
    /// before any guard or request can run.
    pub fn new(
        config: Config,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(storage, navigator));
        let authorizer = Arc::new(RequestAuthorizer::new(
            session.clone(),
            config.public_endpoints.clone(),
        ));
        let api = ApiClient::new(&config.api_url, authorizer);

        let profile = ProfileGateway::new(api.clone());
        let portfolios = PortfolioGateway::new(api.clone());
        let asesorias = AsesoriaGateway::new(api.clone());
        let users = UsersGateway::new(api.clone());

        Self {
            auth: AuthService::new(AuthGateway::new(api.clone()), profile.clone(), session.clone()),
            status: StatusService::new(asesorias.clone()),
            admin: AdminService::new(users.clone(), portfolios.clone(), session.clone()),
            availability: AvailabilityGateway::new(api.clone()),
            reports: ReportsGateway::new(api),
            profile,
            portfolios,
            asesorias,
            users,
            session,
            config,
        }
    }

    /// Fresh booking workflow using the configured duration and topic rules.
    pub fn booking(&self) -> BookingWorkflow {
        BookingWorkflow::new(self.config.booking_duration_minutes, self.config.min_topic_length)
    }
}
