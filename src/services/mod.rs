// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - typed wrappers over the remote API.

pub mod analysis;
pub mod api;
pub mod auth;
pub mod doctor;
pub mod listing;
pub mod patient;
pub mod user;

pub use analysis::AnalysisService;
pub use api::ApiClient;
pub use auth::AuthService;
pub use doctor::DoctorService;
pub use listing::{
    filter_analyses, filter_patients, unviewed, AnalysisFilterOption, AnalysisSortOption,
    PatientSortOption,
};
pub use patient::PatientService;
pub use user::{AvatarCache, UserService};
