// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User and profile models.

use crate::credential::Role;
use crate::error::ClientError;
use serde::{Deserialize, Serialize};

/// User summary embedded in analyses, files and patients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: u64,
    pub user_name: String,
    pub email: String,
    pub user_role: String,
    pub creation_datetime: String,
    pub avatar_url: Option<String>,
}

/// Flat profile returned by `GET auth/profile`.
///
/// Patient-only and doctor-only fields share one shape on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfileResponse {
    pub role: String,
    pub id: u64,
    pub name: String,
    pub email: String,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub chronic_diseases: Option<String>,
    pub allergies: Option<String>,
    pub address: Option<String>,
    pub last_exam_date: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub license_number: Option<String>,
    pub education: Option<String>,
    pub achievements: Option<String>,
    pub medical_institution: Option<String>,
}

/// Profile of the logged-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub details: ProfileDetails,
}

impl UserProfile {
    pub fn role(&self) -> Role {
        match self.details {
            ProfileDetails::Patient(_) => Role::Patient,
            ProfileDetails::Doctor(_) => Role::Doctor,
        }
    }
}

/// Role-specific part of a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileDetails {
    Patient(PatientDetails),
    Doctor(DoctorDetails),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientDetails {
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub chronic_diseases: Option<String>,
    pub allergies: Option<String>,
    pub address: Option<String>,
    pub last_exam_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorDetails {
    pub position: Option<String>,
    pub department: Option<String>,
    pub license_number: Option<String>,
    pub education: Option<String>,
    pub achievements: Option<String>,
    pub medical_institution: Option<String>,
}

impl TryFrom<UserProfileResponse> for UserProfile {
    type Error = ClientError;

    fn try_from(dto: UserProfileResponse) -> Result<Self, Self::Error> {
        let role: Role = dto.role.parse().map_err(|_| ClientError::UnknownRole)?;

        let details = match role {
            Role::Patient => ProfileDetails::Patient(PatientDetails {
                birth_date: dto.birth_date,
                gender: dto.gender,
                height_cm: dto.height_cm,
                weight_kg: dto.weight_kg,
                chronic_diseases: dto.chronic_diseases,
                allergies: dto.allergies,
                address: dto.address,
                last_exam_date: dto.last_exam_date,
            }),
            Role::Doctor => ProfileDetails::Doctor(DoctorDetails {
                position: dto.position,
                department: dto.department,
                license_number: dto.license_number,
                education: dto.education,
                achievements: dto.achievements,
                medical_institution: dto.medical_institution,
            }),
        };

        Ok(Self {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            details,
        })
    }
}

/// Body of `PUT auth/edit/patient`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientEditRequest {
    pub name: String,
    pub birth_date: String,
    pub gender: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub chronic_diseases: Option<String>,
    pub allergies: Option<String>,
    pub address: Option<String>,
}

impl PatientEditRequest {
    pub fn from_profile(name: &str, details: &PatientDetails) -> Result<Self, ClientError> {
        Ok(Self {
            name: name.to_string(),
            birth_date: required("birth date", &details.birth_date)?,
            gender: required("gender", &details.gender)?,
            height_cm: details.height_cm,
            weight_kg: details.weight_kg,
            chronic_diseases: details.chronic_diseases.clone(),
            allergies: details.allergies.clone(),
            address: details.address.clone(),
        })
    }
}

/// Body of `PUT auth/edit/doctor`. Every field is required by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorEditRequest {
    pub name: String,
    pub position: String,
    pub department: String,
    pub license_number: String,
    pub education: String,
    pub achievements: String,
    pub medical_institution: String,
}

impl DoctorEditRequest {
    pub fn from_profile(name: &str, details: &DoctorDetails) -> Result<Self, ClientError> {
        Ok(Self {
            name: name.to_string(),
            position: required("position", &details.position)?,
            department: required("department", &details.department)?,
            license_number: required("license number", &details.license_number)?,
            education: required("education", &details.education)?,
            achievements: required("achievements", &details.achievements)?,
            medical_institution: required("medical institution", &details.medical_institution)?,
        })
    }
}

fn required(field: &str, value: &Option<String>) -> Result<String, ClientError> {
    value
        .clone()
        .ok_or_else(|| ClientError::InvalidProfile(format!("{} is required", field)))
}
