// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session storage.
//!
//! Exactly one session exists per install: the bearer credential plus, for
//! doctors, the cached role-scoped identifier. Stores are shared as
//! `Arc<dyn SessionStore>` and injected wherever a component needs them.

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Persisted session state.
///
/// Field names on disk match the keys the mobile app always used.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer credential issued by the API
    #[serde(rename = "jwt_token", default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    /// Cached doctor id (only set for the doctor role)
    #[serde(rename = "doctor_id", default, skip_serializing_if = "Option::is_none")]
    pub role_identifier: Option<u64>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("role_identifier", &self.role_identifier)
            .finish()
    }
}

/// Durable key-value storage for the session.
///
/// Implementors provide `snapshot` and `update`; both must run under a single
/// lock so a reader never sees a half-applied change.
pub trait SessionStore: Send + Sync {
    /// Read both fields at once.
    fn snapshot(&self) -> Result<Session, StorageError>;

    /// Apply `change` and make the result durable before returning.
    fn update(&self, change: &mut dyn FnMut(&mut Session)) -> Result<(), StorageError>;

    /// Overwrite the stored credential. No validation is performed.
    fn save_credential(&self, token: &str) -> Result<(), StorageError> {
        self.update(&mut |s| s.credential = Some(token.to_string()))
    }

    fn get_credential(&self) -> Result<Option<String>, StorageError> {
        Ok(self.snapshot()?.credential)
    }

    fn save_role_identifier(&self, id: u64) -> Result<(), StorageError> {
        self.update(&mut |s| s.role_identifier = Some(id))
    }

    fn get_role_identifier(&self) -> Result<Option<u64>, StorageError> {
        Ok(self.snapshot()?.role_identifier)
    }

    fn clear_role_identifier(&self) -> Result<(), StorageError> {
        self.update(&mut |s| s.role_identifier = None)
    }

    /// Full logout: drop the credential and the identifier together.
    fn clear(&self) -> Result<(), StorageError> {
        self.update(&mut |s| *s = Session::default())
    }
}
