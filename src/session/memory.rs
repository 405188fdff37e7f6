// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory session store (tests and ephemeral sessions).

use super::{Session, SessionStore};
use crate::error::StorageError;
use std::sync::RwLock;

/// Session store that lives only as long as the process.
#[derive(Default)]
pub struct MemorySessionStore {
    state: RwLock<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing session, e.g. one restored elsewhere.
    pub fn with_session(session: Session) -> Self {
        Self {
            state: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn snapshot(&self) -> Result<Session, StorageError> {
        self.state
            .read()
            .map(|s| s.clone())
            .map_err(|_| StorageError::Poisoned)
    }

    fn update(&self, change: &mut dyn FnMut(&mut Session)) -> Result<(), StorageError> {
        let mut state = self.state.write().map_err(|_| StorageError::Poisoned)?;
        change(&mut state);
        Ok(())
    }
}
