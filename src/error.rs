// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for gateway calls and client-side operations.
//!
//! Gateways are error-transparent: they classify the HTTP outcome into an
//! [`ApiError`] once and hand it back. Callers (the CLI, or any other view
//! layer) translate errors into user-facing text with
//! [`AppError::user_message`].

use crate::models::AsesoriaStatus;
use crate::session::StorageError;
use serde::Deserialize;

/// Failure of a single backend call, classified by HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {}", .message.as_deref().unwrap_or("validation failed"))]
    Validation { message: Option<String> },

    #[error("Authentication required")]
    Unauthorized { message: Option<String> },

    #[error("Permission denied")]
    Forbidden { message: Option<String> },

    #[error("Resource not found")]
    NotFound { message: Option<String> },

    #[error("Conflict: {}", .message.as_deref().unwrap_or("resource state changed"))]
    Conflict { message: Option<String> },

    #[error("Server error (HTTP {status})")]
    Server { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16, message: Option<String> },
}

/// Error body shape used by the backend (`{"message": .., "details": ..}`).
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    details: Option<String>,
    error: Option<String>,
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            400 | 422 => ApiError::Validation { message },
            401 => ApiError::Unauthorized { message },
            403 => ApiError::Forbidden { message },
            404 => ApiError::NotFound { message },
            409 => ApiError::Conflict { message },
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::UnexpectedStatus { status, message },
        }
    }

    /// HTTP status behind this error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation { .. } => Some(400),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Conflict { .. } => Some(409),
            ApiError::Server { status, .. } | ApiError::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            ApiError::Network(_) | ApiError::Decode(_) => None,
        }
    }

    /// Message supplied by the backend in the error body.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation { message }
            | ApiError::Unauthorized { message }
            | ApiError::Forbidden { message }
            | ApiError::NotFound { message }
            | ApiError::Conflict { message }
            | ApiError::Server { message, .. }
            | ApiError::UnexpectedStatus { message, .. } => message.as_deref(),
            ApiError::Network(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(parsed) => parsed
            .message
            .or(parsed.details)
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty()),
        // Plain-text bodies are passed through, HTML error pages are not.
        Err(_) if !trimmed.starts_with('<') => Some(trimmed.to_string()),
        Err(_) => None,
    }
}

/// Error type returned by services and the session layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid input: {0}")]
    InvalidFields(#[from] validator::ValidationErrors),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: AsesoriaStatus,
        to: AsesoriaStatus,
    },

    #[error("Not permitted: {0}")]
    NotPermitted(String),

    #[error("Booking workflow: {0}")]
    Workflow(String),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub const MSG_INVALID_CREDENTIALS: &str = "Credenciales inválidas. Verifica tu usuario y contraseña.";
pub const MSG_SESSION_EXPIRED: &str = "Tu sesión ha expirado. Inicia sesión nuevamente.";
pub const MSG_FORBIDDEN: &str = "No tienes permisos para realizar esta acción.";
pub const MSG_NOT_FOUND: &str = "El recurso solicitado no existe.";
pub const MSG_SERVER: &str = "Error del servidor. Intenta más tarde.";
pub const MSG_NETWORK: &str = "Error de conexión. Verifica tu conexión a internet.";

impl AppError {
    /// Translate into user-facing text, falling back to `fallback` when the
    /// error carries nothing more specific.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Api(api) => api_message(api, fallback, MSG_SESSION_EXPIRED),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::InvalidFields(errors) => field_messages(errors),
            AppError::InvalidTransition { from, to } => {
                format!("No se puede cambiar el estado de {from} a {to}.")
            }
            AppError::NotPermitted(_) => MSG_FORBIDDEN.to_string(),
            AppError::Workflow(msg) => msg.clone(),
            AppError::Storage(_) | AppError::Internal(_) => fallback.to_string(),
        }
    }

    /// Like [`AppError::user_message`], but a 401 on the login form means
    /// bad credentials rather than an expired session.
    pub fn login_message(&self) -> String {
        match self {
            AppError::Api(api) => {
                api_message(api, "No se pudo iniciar sesión.", MSG_INVALID_CREDENTIALS)
            }
            other => other.user_message("No se pudo iniciar sesión."),
        }
    }

    pub fn api(&self) -> Option<&ApiError> {
        match self {
            AppError::Api(api) => Some(api),
            _ => None,
        }
    }
}

fn api_message(api: &ApiError, fallback: &str, unauthorized: &str) -> String {
    match api {
        ApiError::Unauthorized { .. } => unauthorized.to_string(),
        ApiError::Network(_) => MSG_NETWORK.to_string(),
        ApiError::Server { .. } => MSG_SERVER.to_string(),
        ApiError::Forbidden { message } => message.clone().unwrap_or_else(|| MSG_FORBIDDEN.to_string()),
        ApiError::NotFound { message } => message.clone().unwrap_or_else(|| MSG_NOT_FOUND.to_string()),
        ApiError::Validation { message } | ApiError::Conflict { message } => {
            message.clone().unwrap_or_else(|| fallback.to_string())
        }
        ApiError::UnexpectedStatus { status, message } => message
            .clone()
            .unwrap_or_else(|| format!("Error {status}: {fallback}")),
        ApiError::Decode(_) => fallback.to_string(),
    }
}

fn field_messages(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    // Struct-level (schema) errors are reported under `__all__`.
    messages.sort();
    if messages.is_empty() {
        errors.to_string()
    } else {
        messages.join("; ")
    }
}

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, AppError>;
