// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Patient record as seen by doctors.

use super::user::UserResponse;
use serde::{Deserialize, Serialize};

/// Patient returned by `GET doctor/patients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientResponse {
    pub patient_id: u64,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub chronic_diseases: Option<String>,
    pub allergies: Option<String>,
    pub address: Option<String>,
    pub last_exam_date: Option<String>,
    pub user: UserResponse,
}
