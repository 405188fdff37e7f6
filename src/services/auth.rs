// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication and profile service.
//!
//! Login and registration are the only calls that establish trust; both hand
//! the issued credential straight to the role router.

use crate::error::{ClientError, Result};
use crate::models::{
    AuthResponse, DoctorEditRequest, LoginRequest, PatientEditRequest, PatientRegisterRequest,
    ProfileDetails, UserProfile, UserProfileResponse,
};
use crate::router::{off_runtime, AppMode, RoleRouter};
use crate::services::api::ApiClient;
use reqwest::multipart::{Form, Part};
use std::sync::Arc;

/// Login, registration, logout and own-profile operations.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    router: Arc<RoleRouter>,
}

impl AuthService {
    pub fn new(api: ApiClient, router: Arc<RoleRouter>) -> Self {
        Self { api, router }
    }

    /// Log in and route to the mode the issued credential grants.
    ///
    /// Returns `UnknownRole` if the server issued a credential this client
    /// cannot route on; the session is cleared in that case.
    pub async fn login(&self, email: &str, password: &str) -> Result<AppMode> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let builder = self.api.post("auth/login")?.json(&request);
        let response: AuthResponse = self.api.json(builder).await?;

        tracing::info!("Login succeeded, routing on issued credential");
        self.route_issued(response.token).await
    }

    /// Register a new patient account and log in with the issued credential.
    pub async fn register_patient(&self, request: &PatientRegisterRequest) -> Result<AppMode> {
        let builder = self.api.post("auth/register/patient")?.json(request);
        let response: AuthResponse = self.api.json(builder).await?;

        tracing::info!("Registration succeeded, routing on issued credential");
        self.route_issued(response.token).await
    }

    /// Clear the session and return to the login flow.
    pub async fn logout(&self) -> Result<AppMode> {
        off_runtime(&self.router, |router| router.logout()).await
    }

    async fn route_issued(&self, token: String) -> Result<AppMode> {
        let mode =
            off_runtime(&self.router, move |router| router.on_credential_issued(&token)).await?;
        match mode {
            AppMode::Unauthenticated => Err(ClientError::UnknownRole),
            mode => Ok(mode),
        }
    }

    /// Profile of the logged-in user.
    pub async fn profile(&self) -> Result<UserProfile> {
        let dto: UserProfileResponse = self.api.get_json("auth/profile").await?;
        UserProfile::try_from(dto)
    }

    /// Save profile edits through the endpoint matching the profile's role.
    pub async fn update_profile(&self, profile: &UserProfile) -> Result<()> {
        let builder = match &profile.details {
            ProfileDetails::Patient(details) => {
                let body = PatientEditRequest::from_profile(&profile.name, details)?;
                self.api.put("auth/edit/patient")?.json(&body)
            }
            ProfileDetails::Doctor(details) => {
                let body = DoctorEditRequest::from_profile(&profile.name, details)?;
                self.api.put("auth/edit/doctor")?.json(&body)
            }
        };

        self.api.empty(builder).await?;
        tracing::info!(user_id = profile.id, role = %profile.role(), "Profile updated");
        Ok(())
    }

    /// Own avatar image bytes.
    pub async fn avatar(&self) -> Result<Vec<u8>> {
        let bytes = self.api.get_bytes("auth/avatar").await?;
        tracing::debug!(size = bytes.len(), "Avatar loaded");
        Ok(bytes)
    }

    /// Upload a new avatar. Returns the server's response text (the avatar URL).
    pub async fn upload_avatar(&self, image: Vec<u8>, file_name: &str) -> Result<String> {
        let part = Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str("image/*")
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("Invalid avatar mime type: {}", e)))?;
        let form = Form::new().part("file", part);

        let builder = self.api.post("auth/avatar")?.multipart(form);
        self.api.text(builder).await
    }
}
