// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP plumbing shared by every gateway.
//!
//! Handles:
//! - URL construction under the configured API base
//! - Bearer authorization (through [`RequestAuthorizer`])
//! - Status classification into [`ApiError`]
//! - JSON, text and binary bodies
//!
//! Exactly one attempt per call; nothing is cached or retried.

use crate::error::ApiError;
use crate::middleware::{AuthorizedRequest, RequestAuthorizer};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Backend REST client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    authorizer: Arc<RequestAuthorizer>,
}

impl ApiClient {
    /// Create a client for `base_url` (a trailing `/` is ignored).
    pub fn new(base_url: &str, authorizer: Arc<RequestAuthorizer>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, authorizer)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str, authorizer: Arc<RequestAuthorizer>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorizer,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn authorizer(&self) -> &Arc<RequestAuthorizer> {
        &self.authorizer
    }

    /// Absolute URL for an API path such as `/api/profile/me`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send one request through the authorizer and check its status.
    async fn send(
        &self,
        method: Method,
        path: &str,
        prepare: impl FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path);
        let builder = prepare(self.http.request(method.clone(), &url));
        let AuthorizedRequest { builder, context } = self.authorizer.authorize(&url, builder);

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %method, path, error = %e, "Request failed before a response");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The 401 handling must happen before the caller sees the error.
        self.authorizer.on_status(status, &context);

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(method = %method, path, status = status.as_u16(), "Backend returned an error");
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("JSON parse error: {}", e)))
    }

    /// Generic GET request with JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, |b| b).await?;
        Self::read_json(response).await
    }

    /// GET with query parameters.
    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.send(Method::GET, path, |b| b.query(query)).await?;
        Self::read_json(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, |b| b.json(body)).await?;
        Self::read_json(response).await
    }

    /// POST a JSON body and return the raw response text, for endpoints
    /// whose success body is not always JSON.
    pub async fn post_text<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, ApiError> {
        let response = self.send(Method::POST, path, |b| b.json(body)).await?;
        response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::PUT, path, |b| b.json(body)).await?;
        Self::read_json(response).await
    }

    /// DELETE; any success status counts, the body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, |b| b).await?;
        Ok(())
    }

    /// GET a binary payload. Returns the bytes and the content type.
    pub async fn get_bytes<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<(Vec<u8>, Option<String>), ApiError> {
        let response = self.send(Method::GET, path, |b| b.query(query)).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok((bytes.to_vec(), content_type))
    }
}
