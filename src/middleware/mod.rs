// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cross-cutting request and navigation checks (bearer authorization, guards).

pub mod authorizer;
pub mod guards;

pub use authorizer::{AuthorizedRequest, RequestAuthorizer};
pub use guards::{guard_for, GuardDecision};
