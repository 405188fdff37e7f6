// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Image analysis models: results, files, notes and diagnosis history.

use super::user::UserResponse;
use serde::{Deserialize, Serialize};

/// Review status of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisStatus {
    Pending,
    Reviewed,
    RequiresRevision,
}

/// Result of one image analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysisResponse {
    pub image_analysis_id: u64,
    pub analysis_accuracy: Option<f32>,
    pub analysis_precision: Option<f32>,
    pub analysis_recall: Option<f32>,
    pub analysis_details: Option<String>,
    pub analysis_diagnosis: Option<String>,
    pub treatment_recommendations: Option<String>,
    /// ISO-8601 local date-time
    pub creation_datetime: String,
    pub analysis_status: String,
    pub viewed: bool,
    pub diagnosis_class: Option<i32>,
    pub image_file: Option<ImageFileResponse>,
    pub heatmap_file: Option<ImageFileResponse>,
    pub patient: UserResponse,
    pub doctor: UserResponse,
}

impl ImageAnalysisResponse {
    /// Parsed status; `None` if the server sent a value this client does not know.
    pub fn status(&self) -> Option<AnalysisStatus> {
        serde_json::from_value(serde_json::Value::String(self.analysis_status.clone())).ok()
    }
}

/// Stored image or heatmap file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFileResponse {
    pub image_file_id: u64,
    pub image_file_url: String,
    pub image_file_name: String,
    pub image_file_type: String,
    pub uploaded_at: String,
    pub uploaded_by: UserResponse,
}

/// Side-by-side comparison of two analyses.
///
/// Images are base64 strings; the diff heatmap likewise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub from_id: u64,
    pub to_id: u64,
    pub analysis_details_from: Option<String>,
    pub analysis_details_to: Option<String>,
    pub diagnosis_text_from: Option<String>,
    pub diagnosis_text_to: Option<String>,
    pub treatment_recommendations_from: Option<String>,
    pub treatment_recommendations_to: Option<String>,
    pub diagnosis_class_from: i32,
    pub diagnosis_class_to: i32,
    pub from_image_base64: String,
    pub to_image_base64: String,
    pub diff_heatmap: String,
    pub accuracy_from: Option<f32>,
    pub accuracy_to: Option<f32>,
    pub precision_from: Option<f32>,
    pub precision_to: Option<f32>,
    pub recall_from: Option<f32>,
    pub recall_to: Option<f32>,
    pub created_at_from: String,
    pub created_at_to: String,
}

/// Doctor annotation over a region of an analysed image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisNoteResponse {
    pub analysis_note_id: u64,
    pub note_text: String,
    pub note_area_x: i32,
    pub note_area_y: i32,
    pub note_area_width: i32,
    pub note_area_height: i32,
    pub creation_datetime: String,
    pub image_analysis_id: u64,
    pub image_file_id: u64,
    pub heatmap_file_id: u64,
    pub doctor_id: u64,
}

/// Body of `POST doctor/analyses/{id}/notes`. The area is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNoteRequest {
    pub note_text: String,
    pub note_area_x: Option<i32>,
    pub note_area_y: Option<i32>,
    pub note_area_width: Option<i32>,
    pub note_area_height: Option<i32>,
}

/// Body of `POST diagnosis`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisHistoryRequest {
    pub analysis_id: u64,
    pub diagnosis_text: String,
    pub doctor_id: Option<u64>,
    pub reason: String,
    pub analysis_details: String,
    pub treatment_recommendations: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisHistoryResponse {
    pub id: u64,
    pub diagnosis_text: String,
    pub doctor_name: Option<String>,
    pub reason: String,
    pub timestamp: String,
    pub analysis_details: Option<String>,
    pub treatment_recommendations: Option<String>,
}

/// Body of `PUT analysis/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpdateStatusRequest {
    pub status: AnalysisStatus,
}
