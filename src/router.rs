// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role-based navigation gate.
//!
//! Decides which of the three top-level flows the app shows: login, the
//! patient panel or the doctor panel. The decision is always made from the
//! credential in the session store, never from UI state.

use crate::credential::{decode_credential, Role};
use crate::error::{ClientError, StorageError};
use crate::session::SessionStore;
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Top-level application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMode {
    Unauthenticated,
    Patient,
    Doctor,
}

impl From<Role> for AppMode {
    fn from(role: Role) -> Self {
        match role {
            Role::Patient => AppMode::Patient,
            Role::Doctor => AppMode::Doctor,
        }
    }
}

/// Navigation gate driven by the stored credential.
pub struct RoleRouter {
    store: Arc<dyn SessionStore>,
    /// `None` until the startup check has completed.
    mode: RwLock<Option<AppMode>>,
}

impl RoleRouter {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            mode: RwLock::new(None),
        }
    }

    /// Current mode, or `None` while the app is still on the splash screen.
    pub fn current(&self) -> Option<AppMode> {
        *self.mode.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Startup check: route from whatever session survived the last run.
    ///
    /// A storage failure is returned as-is and leaves the mode unresolved.
    pub fn resolve_startup(&self) -> Result<AppMode, StorageError> {
        let token = match self.store.get_credential()? {
            Some(token) if !token.trim().is_empty() => token,
            _ => {
                tracing::debug!("No stored credential, routing to login");
                return Ok(self.transition(AppMode::Unauthenticated));
            }
        };

        self.dispatch(&token)
    }

    /// Route from a credential freshly issued by login or registration.
    ///
    /// The credential is durably stored before any routing decision, so a
    /// process kill right after navigation cannot lose the session.
    pub fn on_credential_issued(&self, token: &str) -> Result<AppMode, StorageError> {
        self.store.save_credential(token)?;
        self.dispatch(token)
    }

    /// Explicit logout. Always ends in `Unauthenticated`.
    ///
    /// The in-memory mode is reset even if clearing storage fails; the
    /// storage error is still returned so the UI can report it.
    pub fn logout(&self) -> Result<AppMode, StorageError> {
        let cleared = self.store.clear();
        let mode = self.transition(AppMode::Unauthenticated);
        if let Err(e) = cleared {
            tracing::error!(error = %e, "Failed to clear session on logout");
            return Err(e);
        }
        tracing::info!("Logged out");
        Ok(mode)
    }

    fn dispatch(&self, token: &str) -> Result<AppMode, StorageError> {
        let claims = decode_credential(token);

        match claims.role {
            Some(Role::Patient) => {
                self.store.clear_role_identifier()?;
                Ok(self.transition(AppMode::Patient))
            }
            Some(Role::Doctor) => {
                // Re-derived on every dispatch so a stale id never outlives its token.
                match claims.user_id {
                    Some(id) => self.store.save_role_identifier(id)?,
                    None => {
                        tracing::warn!("Doctor credential carries no userId");
                        self.store.clear_role_identifier()?;
                    }
                }
                Ok(self.transition(AppMode::Doctor))
            }
            None => {
                tracing::info!("Stored credential is unusable, clearing session");
                self.store.clear()?;
                Ok(self.transition(AppMode::Unauthenticated))
            }
        }
    }

    fn transition(&self, mode: AppMode) -> AppMode {
        let mut current = self.mode.write().unwrap_or_else(|e| e.into_inner());
        if *current != Some(mode) {
            tracing::info!(from = ?*current, to = ?mode, "Application mode changed");
        }
        *current = Some(mode);
        mode
    }
}

/// Run a session-writing router step on the blocking pool.
///
/// Router steps persist the session synchronously; async callers go through
/// here so file I/O never runs on a runtime worker.
pub(crate) async fn off_runtime<T, F>(router: &Arc<RoleRouter>, step: F) -> Result<T, ClientError>
where
    F: FnOnce(&RoleRouter) -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    let router = router.clone();
    let outcome = tokio::task::spawn_blocking(move || step(&router))
        .await
        .map_err(|e| ClientError::Internal(anyhow::anyhow!("Session task failed: {}", e)))?;
    Ok(outcome?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, Session};
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    fn token(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    fn router_with(session: Session) -> (RoleRouter, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::with_session(session));
        (RoleRouter::new(store.clone()), store)
    }

    #[test]
    fn test_unresolved_before_startup() {
        let (router, _) = router_with(Session::default());
        assert_eq!(router.current(), None);
    }

    #[test]
    fn test_blank_credential_routes_to_login() {
        let (router, _) = router_with(Session {
            credential: Some("   ".to_string()),
            role_identifier: None,
        });
        assert_eq!(router.resolve_startup().unwrap(), AppMode::Unauthenticated);
    }

    #[test]
    fn test_patient_dispatch_drops_stale_doctor_id() {
        let (router, store) = router_with(Session {
            credential: Some(token(r#"{"role":"PATIENT"}"#)),
            role_identifier: Some(99),
        });

        assert_eq!(router.resolve_startup().unwrap(), AppMode::Patient);
        assert_eq!(store.get_role_identifier().unwrap(), None);
    }

    #[test]
    fn test_doctor_without_id_clears_identifier() {
        let (router, store) = router_with(Session {
            credential: Some(token(r#"{"role":"DOCTOR"}"#)),
            role_identifier: Some(5),
        });

        assert_eq!(router.resolve_startup().unwrap(), AppMode::Doctor);
        assert_eq!(store.get_role_identifier().unwrap(), None);
    }

    #[test]
    fn test_credential_issued_overwrites_identifier() {
        let (router, store) = router_with(Session::default());

        let first = token(r#"{"role":"DOCTOR","userId":1}"#);
        assert_eq!(router.on_credential_issued(&first).unwrap(), AppMode::Doctor);
        assert_eq!(store.get_role_identifier().unwrap(), Some(1));

        let second = token(r#"{"role":"DOCTOR","userId":2}"#);
        router.on_credential_issued(&second).unwrap();
        assert_eq!(store.get_role_identifier().unwrap(), Some(2));
        assert_eq!(store.get_credential().unwrap(), Some(second));
    }

    #[test]
    fn test_malformed_issued_credential_is_cleared() {
        let (router, store) = router_with(Session::default());

        let mode = router.on_credential_issued("not-a-token").unwrap();
        assert_eq!(mode, AppMode::Unauthenticated);
        assert_eq!(store.get_credential().unwrap(), None);
    }

    #[test]
    fn test_logout_from_patient() {
        let (router, store) = router_with(Session {
            credential: Some(token(r#"{"role":"PATIENT"}"#)),
            role_identifier: None,
        });
        router.resolve_startup().unwrap();

        assert_eq!(router.logout().unwrap(), AppMode::Unauthenticated);
        assert_eq!(router.current(), Some(AppMode::Unauthenticated));
        assert_eq!(store.get_credential().unwrap(), None);
    }
}
