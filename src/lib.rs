// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MedVision client: session, role routing and API access for the
//! medical-imaging diagnostic platform.
//!
//! The crate keeps one authenticated session per install, decides whether
//! the app runs in patient or doctor mode from the issued credential, and
//! wraps the remote API in typed services that attach that credential to
//! every call.

pub mod config;
pub mod credential;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;
pub mod session;

use config::ClientConfig;
use error::Result;
use router::{off_runtime, AppMode, RoleRouter};
use services::{AnalysisService, ApiClient, AuthService, DoctorService, PatientService, UserService};
use session::{FileSessionStore, SessionStore};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: ClientConfig,
    pub store: Arc<dyn SessionStore>,
    pub router: Arc<RoleRouter>,
    pub auth: AuthService,
    pub doctor: DoctorService,
    pub patient: PatientService,
    pub analysis: AnalysisService,
    pub users: UserService,
}

impl AppState {
    /// Wire every component to `store`.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let api = ApiClient::new(&config, store.clone())?;
        let router = Arc::new(RoleRouter::new(store.clone()));

        Ok(Self {
            auth: AuthService::new(api.clone(), router.clone()),
            doctor: DoctorService::new(api.clone(), store.clone()),
            patient: PatientService::new(api.clone()),
            analysis: AnalysisService::new(api.clone()),
            users: UserService::new(api, Default::default()),
            config,
            store,
            router,
        })
    }

    /// State backed by the session file named in `config`.
    pub fn open(config: ClientConfig) -> Result<Self> {
        let store = FileSessionStore::open(config.session_file.clone())?;
        Self::new(config, Arc::new(store))
    }

    /// Run the startup check and return the initial mode.
    pub async fn start(&self) -> Result<AppMode> {
        off_runtime(&self.router, |router| router.resolve_startup()).await
    }

    /// Log out and drop per-user caches.
    ///
    /// The caches are dropped after the session, and even if clearing the
    /// session failed.
    pub async fn logout(&self) -> Result<AppMode> {
        let result = self.auth.logout().await;
        self.users.clear_cache();
        result
    }
}
