// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types.
//!
//! Storage failures and remote failures are kept apart so the UI can tell
//! "never logged in" from "storage unavailable" from "server said no".

/// Local session storage failure.
///
/// Never converted into an absent value: a caller that gets this error must
/// not assume the user is logged out.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Session storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("Session storage corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),

    #[error("Session storage lock poisoned")]
    Poisoned,
}

/// Client error type returned by every service call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Unknown user role")]
    UnknownRole,

    #[error("Doctor identifier not available")]
    MissingDoctorId,

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// True when the remote service rejected the stored credential.
    ///
    /// Callers react by sending the user back to login; nothing here retries.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// True when the failure came from local session storage.
    pub fn is_storage(&self) -> bool {
        matches!(self, ClientError::Storage(_))
    }
}

/// Result type alias for service calls
pub type Result<T> = std::result::Result<T, ClientError>;
