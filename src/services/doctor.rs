// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Doctor-mode API operations.
//!
//! Calls that act on behalf of the doctor (uploads, notes, diagnoses) take
//! the doctor id from the session store, where the role router cached it.

use crate::error::{ClientError, Result};
use crate::models::{
    AddNoteRequest, AnalysisNoteResponse, DiagnosisHistoryRequest, DiagnosisHistoryResponse,
    ImageAnalysisResponse, PatientResponse,
};
use crate::services::api::ApiClient;
use crate::session::SessionStore;
use reqwest::multipart::{Form, Part};
use std::sync::Arc;

#[derive(Clone)]
pub struct DoctorService {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
}

impl DoctorService {
    pub fn new(api: ApiClient, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store }
    }

    /// Doctor id cached at login.
    pub fn current_doctor_id(&self) -> Result<u64> {
        self.store
            .get_role_identifier()?
            .ok_or(ClientError::MissingDoctorId)
    }

    /// Upload an image for a patient and start its analysis.
    ///
    /// Returns the server's response text.
    pub async fn upload_and_analyze(
        &self,
        image: Vec<u8>,
        file_name: &str,
        patient_id: u64,
    ) -> Result<String> {
        let doctor_id = self.current_doctor_id()?;

        let part = Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str("image/*")
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("Invalid image mime type: {}", e)))?;
        let form = Form::new()
            .part("file", part)
            .text("patientId", patient_id.to_string())
            .text("doctorId", doctor_id.to_string());

        tracing::info!(patient_id, doctor_id, "Uploading image for analysis");
        let builder = self.api.post("doctor/images/analyze")?.multipart(form);
        self.api.text(builder).await
    }

    pub async fn analysis(&self, id: u64) -> Result<ImageAnalysisResponse> {
        self.api.get_json(&format!("doctor/analysis/{}", id)).await
    }

    pub async fn heatmap(&self, id: u64) -> Result<Vec<u8>> {
        self.api.get_bytes(&format!("doctor/heatmap/{}", id)).await
    }

    pub async fn image(&self, id: u64) -> Result<Vec<u8>> {
        self.api.get_bytes(&format!("doctor/image/{}", id)).await
    }

    pub async fn patients(&self) -> Result<Vec<PatientResponse>> {
        self.api.get_json("doctor/patients").await
    }

    pub async fn patient(&self, id: u64) -> Result<PatientResponse> {
        self.api.get_json(&format!("doctor/patients/{}", id)).await
    }

    /// Attach a note to an analysis as the current doctor.
    pub async fn add_note(&self, analysis_id: u64, note: &AddNoteRequest) -> Result<()> {
        let doctor_id = self.current_doctor_id()?;
        let builder = self
            .api
            .post(&format!("doctor/analyses/{}/notes", analysis_id))?
            .query(&[("doctorId", doctor_id)])
            .json(note);
        self.api.empty(builder).await
    }

    pub async fn analysis_notes(&self, analysis_id: u64) -> Result<Vec<AnalysisNoteResponse>> {
        self.api
            .get_json(&format!("doctor/analyses/{}/notes", analysis_id))
            .await
    }

    /// Record a new diagnosis. An unset `doctor_id` is filled from the session.
    pub async fn update_diagnosis(
        &self,
        request: &DiagnosisHistoryRequest,
    ) -> Result<DiagnosisHistoryResponse> {
        let mut body = request.clone();
        if body.doctor_id.is_none() {
            body.doctor_id = self.store.get_role_identifier()?;
        }

        let builder = self.api.post("diagnosis")?.json(&body);
        self.api.json(builder).await
    }

    pub async fn diagnosis_history(&self, analysis_id: u64) -> Result<Vec<DiagnosisHistoryResponse>> {
        self.api
            .get_json(&format!("diagnosis/analysis/{}", analysis_id))
            .await
    }
}
