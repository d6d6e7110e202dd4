// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use asesorias_client::middleware::{guard_for, GuardDecision};
use asesorias_client::navigation::Route;

mod common;
use common::{login_as, test_client};

const ALL_ROUTES: [Route; 11] = [
    Route::Login,
    Route::Register,
    Route::Home,
    Route::Profile,
    Route::Portfolio,
    Route::BookAsesoria,
    Route::MisAsesorias,
    Route::AsesoriasRecibidas,
    Route::Availability,
    Route::Admin,
    Route::Reports,
];

fn decisions(roles: Option<&[&str]>) -> Vec<(Route, GuardDecision)> {
    let (client, _, _) = test_client("http://127.0.0.1:1");
    if let Some(roles) = roles {
        login_as(&client, 3, "ana", roles);
    }
    let state = client.session.snapshot();
    ALL_ROUTES.iter().map(|r| (*r, guard_for(*r, &state))).collect()
}

#[test]
fn test_user_is_sent_home_from_admin() {
    let (client, _, nav) = test_client("http://127.0.0.1:1");
    login_as(&client, 3, "ana", &["ROLE_USER"]);

    let decision = guard_for(Route::Admin, &client.session.snapshot());

    assert_eq!(decision, GuardDecision::RedirectTo(Route::Home));
    // Deciding a guard never navigates by itself.
    assert!(nav.routes().is_empty());
}

#[test]
fn test_anonymous_only_reaches_public_routes() {
    for (route, decision) in decisions(None) {
        match route {
            Route::Login | Route::Register => assert_eq!(decision, GuardDecision::Allow, "{route:?}"),
            _ => assert_eq!(decision, GuardDecision::RedirectTo(Route::Login), "{route:?}"),
        }
    }
}

#[test]
fn test_plain_user_routes() {
    for (route, decision) in decisions(Some(&["USER"])) {
        let expected = match route {
            Route::Home
            | Route::Profile
            | Route::Portfolio
            | Route::BookAsesoria
            | Route::MisAsesorias => GuardDecision::Allow,
            _ => GuardDecision::RedirectTo(Route::Home),
        };
        assert_eq!(decision, expected, "{route:?}");
    }
}

#[test]
fn test_programmer_routes() {
    for (route, decision) in decisions(Some(&["USER", "ROLE_PROGRAMADOR"])) {
        let expected = match route {
            Route::Login | Route::Register | Route::Admin | Route::Reports => {
                GuardDecision::RedirectTo(Route::Home)
            }
            _ => GuardDecision::Allow,
        };
        assert_eq!(decision, expected, "{route:?}");
    }
}

#[test]
fn test_admin_routes() {
    for (route, decision) in decisions(Some(&["ADMIN"])) {
        let expected = match route {
            Route::Login | Route::Register => GuardDecision::RedirectTo(Route::Home),
            // Admin alone does not grant the programmer screens.
            Route::Availability | Route::AsesoriasRecibidas => GuardDecision::RedirectTo(Route::Home),
            _ => GuardDecision::Allow,
        };
        assert_eq!(decision, expected, "{route:?}");
    }
}

#[test]
fn test_guards_follow_logout() {
    let (client, _, nav) = test_client("http://127.0.0.1:1");
    login_as(&client, 3, "ana", &["ADMIN"]);
    assert!(guard_for(Route::Reports, &client.session.snapshot()).is_allowed());

    client.auth.logout();

    assert_eq!(
        guard_for(Route::Reports, &client.session.snapshot()),
        GuardDecision::RedirectTo(Route::Login)
    );
    assert!(guard_for(Route::Login, &client.session.snapshot()).is_allowed());
    assert_eq!(nav.count(Route::Login), 1);
}
