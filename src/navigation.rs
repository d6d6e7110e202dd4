// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Named routes and the navigation seam used by logout and redirects.

use std::fmt;
use std::sync::Mutex;

/// Application routes a guard or the session layer can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Home,
    Profile,
    Portfolio,
    BookAsesoria,
    MisAsesorias,
    AsesoriasRecibidas,
    Availability,
    Admin,
    Reports,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Home => "/home",
            Route::Profile => "/perfil",
            Route::Portfolio => "/portafolio",
            Route::BookAsesoria => "/reservar-asesoria",
            Route::MisAsesorias => "/mis-asesorias",
            Route::AsesoriasRecibidas => "/asesorias-recibidas",
            Route::Availability => "/disponibilidad",
            Route::Admin => "/admin",
            Route::Reports => "/admin/reportes",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Receives navigation requests (the router in a UI, a log line in the CLI).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only records the request in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "Navigation requested");
    }
}

/// Navigator that remembers every request, in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn count(&self, route: Route) -> usize {
        self.routes().iter().filter(|r| **r == route).count()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(route);
    }
}
