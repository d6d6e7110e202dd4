// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound request authorization.
//!
//! Every request the gateways send passes through [`RequestAuthorizer`]:
//! it attaches `Authorization: Bearer <token>` unless the target is a
//! public endpoint, and on a 401 tears the session down (once) before the
//! error goes back to the caller. No retry, no refresh.

use crate::session::SessionStore;
use reqwest::{RequestBuilder, StatusCode};
use std::sync::Arc;

/// Endpoints that never carry a bearer token.
pub const DEFAULT_PUBLIC_ENDPOINTS: [&str; 2] = ["/api/auth/login", "/api/auth/register"];

/// What the authorizer decided for one request; needed again when the
/// response comes back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Token attached to the request, if any.
    pub token_used: Option<String>,
    /// Whether the target matched the public allowlist.
    pub public: bool,
}

/// A request builder after authorization.
pub struct AuthorizedRequest {
    pub builder: RequestBuilder,
    pub context: RequestContext,
}

/// Attaches the session's bearer token and reacts to 401 responses.
pub struct RequestAuthorizer {
    session: Arc<SessionStore>,
    public_endpoints: Vec<String>,
}

impl RequestAuthorizer {
    pub fn new(session: Arc<SessionStore>, public_endpoints: Vec<String>) -> Self {
        Self {
            session,
            public_endpoints,
        }
    }

    /// Authorizer with the default login/register allowlist.
    pub fn with_default_public_endpoints(session: Arc<SessionStore>) -> Self {
        Self::new(
            session,
            DEFAULT_PUBLIC_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Whether `url` targets an endpoint on the public allowlist.
    pub fn is_public(&self, url: &str) -> bool {
        let path = reqwest::Url::parse(url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| url.to_string());
        self.public_endpoints
            .iter()
            .any(|endpoint| !endpoint.is_empty() && path.contains(endpoint.as_str()))
    }

    /// Attach the bearer token when the target is not public and a token
    /// exists. Without a token the request goes out as-is; the backend
    /// decides whether to reject it.
    pub fn authorize(&self, url: &str, builder: RequestBuilder) -> AuthorizedRequest {
        if self.is_public(url) {
            return AuthorizedRequest {
                builder,
                context: RequestContext {
                    token_used: None,
                    public: true,
                },
            };
        }

        match self.session.token() {
            Some(token) => AuthorizedRequest {
                builder: builder.bearer_auth(&token),
                context: RequestContext {
                    token_used: Some(token),
                    public: false,
                },
            },
            None => AuthorizedRequest {
                builder,
                context: RequestContext::default(),
            },
        }
    }

    /// Inspect a response status. A 401 on an authorized request ends the
    /// session it was sent with; one on a private request sent without a
    /// token sends the user to login. Returns whether a redirect happened.
    /// The caller still reports the original failure.
    pub fn on_status(&self, status: StatusCode, context: &RequestContext) -> bool {
        if status != StatusCode::UNAUTHORIZED || context.public {
            return false;
        }
        match context.token_used.as_deref() {
            Some(token) => self.session.expire_session(token),
            None => self.session.require_login(),
        }
    }
}
