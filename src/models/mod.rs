// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod asesoria;
pub mod auth;
pub mod availability;
pub mod portfolio;
pub mod profile;
pub mod reports;
pub mod user;

pub use asesoria::{
    Asesoria, AsesoriaStatus, CreateAsesoriaDto, Party, PartySummary, Programmer,
    UpdateAsesoriaStatusDto,
};
pub use auth::{AuthResponse, Identity, LoginRequest, RegisterOutcome, RegisterRequest, Role};
pub use availability::{
    AvailabilitySlot, CreateAvailabilityDto, DayOfWeek, Modality, UpdateAvailabilityDto,
};
pub use portfolio::{Portfolio, PortfolioDraft, PortfolioPage};
pub use profile::{Profile, ProfileUpdateDto};
pub use reports::{
    AdminDashboard, DateCount, ProgrammerCount, ProjectsByUser, ReportDocument, ReportFile,
    ReportFilters, ReportFormat, StatusCount,
};
pub use user::{UpdateRolesDto, UserAccount};
