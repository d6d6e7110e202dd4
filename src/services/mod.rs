// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - client-side business logic.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod matcher;
pub mod status;

pub use admin::{AdminService, Confirm};
pub use auth::AuthService;
pub use booking::{next_occurrence, BookingConfirmation, BookingWorkflow, WorkflowStep};
pub use status::StatusService;
