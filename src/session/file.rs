// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed session store.
//!
//! The session is cached in memory and written to an app-private JSON file
//! on every change. Writes go to a sibling temp file that is then renamed
//! over the target, so the file is always either the old or the new state.

use super::{Session, SessionStore};
use crate::error::StorageError;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Session store persisted as a JSON file.
pub struct FileSessionStore {
    path: PathBuf,
    state: RwLock<Session>,
}

impl FileSessionStore {
    /// Open the store, loading any previously persisted session.
    ///
    /// A missing or empty file is a fresh install. Any other read failure,
    /// or a file that is not a valid session, is returned as an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let session = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Session::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Session::default(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            path = %path.display(),
            has_credential = session.credential.is_some(),
            "Session store opened"
        );

        Ok(Self {
            path,
            state: RwLock::new(session),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    /// Write `session` to disk atomically.
    fn persist(&self, session: &Session) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.temp_path();
        let content = serde_json::to_string_pretty(session)?;
        {
            let mut file = File::create(&tmp)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        sync_parent_dir(&self.path)?;
        Ok(())
    }
}

/// Make a completed rename durable.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => File::open(parent)?.sync_all(),
        _ => File::open(".")?.sync_all(),
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

impl SessionStore for FileSessionStore {
    fn snapshot(&self) -> Result<Session, StorageError> {
        self.state
            .read()
            .map(|s| s.clone())
            .map_err(|_| StorageError::Poisoned)
    }

    fn update(&self, change: &mut dyn FnMut(&mut Session)) -> Result<(), StorageError> {
        let mut state = self.state.write().map_err(|_| StorageError::Poisoned)?;

        let mut next = state.clone();
        change(&mut next);
        if next == *state {
            return Ok(());
        }

        // Memory only moves forward once the disk has.
        if let Err(e) = self.persist(&next) {
            tracing::error!(error = %e, path = %self.path.display(), "Failed to persist session");
            return Err(e);
        }
        *state = next;
        Ok(())
    }
}
