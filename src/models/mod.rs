// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire models for the MedVision API.

pub mod analysis;
pub mod auth;
pub mod patient;
pub mod user;

pub use analysis::{
    AddNoteRequest, AnalysisNoteResponse, AnalysisStatus, ComparisonReport,
    DiagnosisHistoryRequest, DiagnosisHistoryResponse, ImageAnalysisResponse, ImageFileResponse,
    UpdateStatusRequest,
};
pub use auth::{AuthResponse, Gender, LoginRequest, PatientRegisterRequest};
pub use patient::PatientResponse;
pub use user::{
    DoctorDetails, DoctorEditRequest, PatientDetails, PatientEditRequest, ProfileDetails,
    UserProfile, UserProfileResponse, UserResponse,
};
