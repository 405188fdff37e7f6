// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role router scenarios.

mod common;

use common::{doctor_token, mint_token, patient_token};
use medvision_client::config::ClientConfig;
use medvision_client::error::StorageError;
use medvision_client::router::{AppMode, RoleRouter};
use medvision_client::session::{MemorySessionStore, Session, SessionStore};
use medvision_client::AppState;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

fn router_with(session: Session) -> (RoleRouter, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::with_session(session));
    (RoleRouter::new(store.clone()), store)
}

fn stored(token: String) -> Session {
    Session {
        credential: Some(token),
        role_identifier: None,
    }
}

/// Store whose every operation fails, as when the backing file is unreadable.
struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn snapshot(&self) -> Result<Session, StorageError> {
        Err(StorageError::Unavailable(std::io::Error::other("disk gone")))
    }

    fn update(&self, _change: &mut dyn FnMut(&mut Session)) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(std::io::Error::other("disk gone")))
    }
}

/// Store that reads fine but can be switched to fail writes.
struct ReadOnlyAfterSwitch {
    inner: MemorySessionStore,
    fail_writes: AtomicBool,
}

impl SessionStore for ReadOnlyAfterSwitch {
    fn snapshot(&self) -> Result<Session, StorageError> {
        self.inner.snapshot()
    }

    fn update(&self, change: &mut dyn FnMut(&mut Session)) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(std::io::Error::other("read-only")));
        }
        self.inner.update(change)
    }
}

/// Store whose writes wait for a signal sent from an async task.
///
/// On a single-threaded runtime the signal can only be sent if the write is
/// running somewhere other than the runtime thread.
struct GatedStore {
    inner: MemorySessionStore,
    gate: Mutex<mpsc::Receiver<()>>,
}

impl SessionStore for GatedStore {
    fn snapshot(&self) -> Result<Session, StorageError> {
        self.inner.snapshot()
    }

    fn update(&self, change: &mut dyn FnMut(&mut Session)) -> Result<(), StorageError> {
        self.gate
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(2))
            .map_err(|_| {
                StorageError::Unavailable(std::io::Error::other("write blocked the runtime thread"))
            })?;
        self.inner.update(change)
    }
}

fn gated_state(session: Session) -> (AppState, mpsc::Sender<()>) {
    let (tx, rx) = mpsc::channel();
    let store = Arc::new(GatedStore {
        inner: MemorySessionStore::with_session(session),
        gate: Mutex::new(rx),
    });
    let state = AppState::new(ClientConfig::default(), store).unwrap();
    (state, tx)
}

#[test]
fn test_scenario_a_no_credential() {
    let (router, _) = router_with(Session::default());
    assert_eq!(router.resolve_startup().unwrap(), AppMode::Unauthenticated);
    assert_eq!(router.current(), Some(AppMode::Unauthenticated));
}

#[test]
fn test_scenario_b_patient() {
    let (router, store) = router_with(stored(patient_token(11)));
    assert_eq!(router.resolve_startup().unwrap(), AppMode::Patient);
    assert_eq!(store.get_role_identifier().unwrap(), None);
}

#[test]
fn test_scenario_c_doctor_caches_identifier() {
    let (router, store) = router_with(stored(doctor_token(7)));
    assert_eq!(router.resolve_startup().unwrap(), AppMode::Doctor);
    assert_eq!(store.get_role_identifier().unwrap(), Some(7));
}

#[test]
fn test_scenario_d_unknown_role_clears_session() {
    let token = mint_token(json!({"role": "NURSE", "userId": 3}));
    let (router, store) = router_with(Session {
        credential: Some(token),
        role_identifier: Some(3),
    });

    assert_eq!(router.resolve_startup().unwrap(), AppMode::Unauthenticated);
    assert_eq!(store.snapshot().unwrap(), Session::default());
}

#[test]
fn test_logout_from_doctor_mode() {
    let (router, store) = router_with(stored(doctor_token(7)));
    assert_eq!(router.resolve_startup().unwrap(), AppMode::Doctor);

    assert_eq!(router.logout().unwrap(), AppMode::Unauthenticated);
    assert_eq!(router.current(), Some(AppMode::Unauthenticated));
    assert_eq!(store.get_credential().unwrap(), None);
    assert_eq!(store.get_role_identifier().unwrap(), None);
}

#[test]
fn test_switching_from_doctor_to_patient() {
    let (router, store) = router_with(Session::default());

    router.on_credential_issued(&doctor_token(7)).unwrap();
    assert_eq!(store.get_role_identifier().unwrap(), Some(7));

    assert_eq!(
        router.on_credential_issued(&patient_token(12)).unwrap(),
        AppMode::Patient
    );
    assert_eq!(store.get_role_identifier().unwrap(), None);
}

#[test]
fn test_startup_storage_failure_propagates() {
    let router = RoleRouter::new(Arc::new(UnavailableStore));

    let err = router.resolve_startup().unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
    assert_eq!(router.current(), None);
}

#[test]
fn test_issued_credential_not_routed_when_save_fails() {
    let router = RoleRouter::new(Arc::new(UnavailableStore));

    assert!(router.on_credential_issued(&patient_token(1)).is_err());
    assert_eq!(router.current(), None);
}

#[test]
fn test_logout_resets_mode_even_when_clear_fails() {
    let store = Arc::new(ReadOnlyAfterSwitch {
        inner: MemorySessionStore::new(),
        fail_writes: AtomicBool::new(false),
    });
    let router = RoleRouter::new(store.clone());
    router.on_credential_issued(&patient_token(4)).unwrap();

    store.fail_writes.store(true, Ordering::SeqCst);
    assert!(router.logout().is_err());
    assert_eq!(router.current(), Some(AppMode::Unauthenticated));
}

#[tokio::test]
async fn test_logout_writes_off_the_runtime_thread() {
    let (state, release) = gated_state(stored(doctor_token(7)));

    // Runs only once the test task yields to the runtime.
    let signal = tokio::spawn(async move { release.send(()).unwrap() });

    assert_eq!(state.logout().await.unwrap(), AppMode::Unauthenticated);
    signal.await.unwrap();
    assert_eq!(state.store.get_credential().unwrap(), None);
}

#[tokio::test]
async fn test_startup_writes_off_the_runtime_thread() {
    let (state, release) = gated_state(stored(patient_token(3)));

    // A patient dispatch clears the identifier, which is a write.
    let signal = tokio::spawn(async move { release.send(()).unwrap() });

    assert_eq!(state.start().await.unwrap(), AppMode::Patient);
    signal.await.unwrap();
}
