// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed gateways over the backend REST API.
//!
//! Each gateway is a thin, stateless wrapper: one HTTP call per method,
//! errors passed through unchanged as [`crate::error::ApiError`].

pub mod asesorias;
pub mod auth;
pub mod availability;
pub mod http;
pub mod portfolio;
pub mod profile;
pub mod reports;
pub mod users;

pub use asesorias::AsesoriaGateway;
pub use auth::AuthGateway;
pub use availability::AvailabilityGateway;
pub use http::ApiClient;
pub use portfolio::PortfolioGateway;
pub use profile::ProfileGateway;
pub use reports::ReportsGateway;
pub use users::UsersGateway;
