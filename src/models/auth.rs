// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login and registration payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Credentials for `POST auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Gender as accepted by patient registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

/// Body of `POST auth/register/patient`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub gender: Gender,
}

impl fmt::Debug for PatientRegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatientRegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("birth_date", &self.birth_date)
            .field("gender", &self.gender)
            .finish_non_exhaustive()
    }
}

/// Response of login and registration.
#[derive(Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}
