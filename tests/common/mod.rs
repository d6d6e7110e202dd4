// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: an in-process fake backend and client builders.

use asesorias_client::config::Config;
use asesorias_client::models::AuthResponse;
use asesorias_client::navigation::RecordingNavigator;
use asesorias_client::session::{MemoryStorage, SessionStorage};
use asesorias_client::AsesoriasClient;
use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request as the fake backend saw it.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    content_type: String,
    body: Vec<u8>,
}

#[derive(Default)]
struct FakeState {
    routes: Mutex<HashMap<(Method, String), Canned>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Backend stand-in bound to `127.0.0.1:0`. Unknown routes answer 404.
#[allow(dead_code)]
pub struct FakeBackend {
    pub url: String,
    state: Arc<FakeState>,
}

#[allow(dead_code)]
impl FakeBackend {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("No local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake backend failed");
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    /// Answer `method path` with a JSON body.
    pub fn on_json(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.on_raw(method, path, status, "application/json", body.to_string().into_bytes());
    }

    pub fn on_text(&self, method: Method, path: &str, status: u16, body: &str) {
        self.on_raw(method, path, status, "text/plain", body.as_bytes().to_vec());
    }

    pub fn on_raw(&self, method: Method, path: &str, status: u16, content_type: &str, body: Vec<u8>) {
        let canned = Canned {
            status: StatusCode::from_u16(status).expect("valid status"),
            content_type: content_type.to_string(),
            body,
        };
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), canned);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }
}

async fn handle(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let canned = state.routes.lock().unwrap().get(&(method, path)).cloned();
    match canned {
        Some(c) => (c.status, [(header::CONTENT_TYPE, c.content_type)], c.body).into_response(),
        None => (StatusCode::NOT_FOUND, "no route").into_response(),
    }
}

/// Client pointed at `url`, with in-memory storage.
#[allow(dead_code)]
pub fn test_client(url: &str) -> (AsesoriasClient, Arc<MemoryStorage>, Arc<RecordingNavigator>) {
    let storage = Arc::new(MemoryStorage::new());
    let nav = Arc::new(RecordingNavigator::new());
    let client = client_with_storage(url, storage.clone(), nav.clone());
    (client, storage, nav)
}

#[allow(dead_code)]
pub fn client_with_storage(
    url: &str,
    storage: Arc<dyn SessionStorage>,
    nav: Arc<RecordingNavigator>,
) -> AsesoriasClient {
    let config = Config {
        api_url: url.to_string(),
        ..Config::default()
    };
    AsesoriasClient::new(config, storage, nav)
}

#[allow(dead_code)]
pub fn auth_response(id: i64, username: &str, roles: &[&str]) -> AuthResponse {
    AuthResponse {
        token: format!("token-{id}"),
        user_id: id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        display_name: None,
        photo_url: None,
    }
}

/// Log the client in directly, without a backend round trip.
#[allow(dead_code)]
pub fn login_as(client: &AsesoriasClient, id: i64, username: &str, roles: &[&str]) {
    client
        .session
        .set_session(&auth_response(id, username, roles))
        .expect("Failed to set session");
}
