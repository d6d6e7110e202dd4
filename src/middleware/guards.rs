// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation guards.
//!
//! Each guard is a pure function of the already-resolved session state.
//! None of them performs I/O, waits on anything, or can fail.

use crate::models::Role;
use crate::navigation::Route;
use crate::session::SessionState;

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectTo(Route),
}

impl GuardDecision {
    pub fn is_allowed(self) -> bool {
        self == GuardDecision::Allow
    }
}

/// Routes that need a logged-in user.
pub fn require_authenticated(session: &SessionState) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectTo(Route::Login)
    }
}

/// Login and register: a logged-in user is sent home instead.
pub fn public_only(session: &SessionState) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::RedirectTo(Route::Home)
    } else {
        GuardDecision::Allow
    }
}

/// Routes restricted to a role. Anonymous users go to login, logged-in
/// users without the role go home.
pub fn require_role(session: &SessionState, role: &Role) -> GuardDecision {
    if !session.is_authenticated() {
        GuardDecision::RedirectTo(Route::Login)
    } else if session.has(role) {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectTo(Route::Home)
    }
}

pub fn require_admin(session: &SessionState) -> GuardDecision {
    require_role(session, &Role::Admin)
}

pub fn require_programmer(session: &SessionState) -> GuardDecision {
    require_role(session, &Role::Programador)
}

/// The guard protecting each route.
pub fn guard_for(route: Route, session: &SessionState) -> GuardDecision {
    match route {
        Route::Login | Route::Register => public_only(session),
        Route::Home
        | Route::Profile
        | Route::Portfolio
        | Route::BookAsesoria
        | Route::MisAsesorias => require_authenticated(session),
        Route::Availability | Route::AsesoriasRecibidas => require_programmer(session),
        Route::Admin | Route::Reports => require_admin(session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::parse_roles;
    use crate::models::Identity;

    fn session(roles: &[&str]) -> SessionState {
        SessionState::authenticated(
            "t",
            Identity {
                id: 1,
                username: "u".to_string(),
                email: String::new(),
                roles: parse_roles(roles),
                display_name: None,
                photo_url: None,
            },
        )
    }

    #[test]
    fn test_guard_totality() {
        let anonymous = SessionState::default();
        let admin = session(&["ROLE_ADMIN"]);
        let user = session(&["USER"]);

        // (authenticated, role matches) for the admin role guard
        let cases = [
            (&anonymous, GuardDecision::RedirectTo(Route::Login)),
            (&user, GuardDecision::RedirectTo(Route::Home)),
            (&admin, GuardDecision::Allow),
        ];
        for (state, expected) in cases {
            assert_eq!(require_admin(state), expected);
        }

        assert_eq!(require_authenticated(&anonymous), GuardDecision::RedirectTo(Route::Login));
        assert_eq!(require_authenticated(&user), GuardDecision::Allow);
        assert_eq!(public_only(&anonymous), GuardDecision::Allow);
        assert_eq!(public_only(&user), GuardDecision::RedirectTo(Route::Home));
    }

    #[test]
    fn test_route_table() {
        let programmer = session(&["PROGRAMADOR"]);
        assert!(guard_for(Route::Availability, &programmer).is_allowed());
        assert!(guard_for(Route::BookAsesoria, &programmer).is_allowed());
        assert_eq!(
            guard_for(Route::Reports, &programmer),
            GuardDecision::RedirectTo(Route::Home)
        );
        assert_eq!(
            guard_for(Route::Login, &programmer),
            GuardDecision::RedirectTo(Route::Home)
        );
    }
}
