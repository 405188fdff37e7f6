// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Analysis lookup, comparison and status operations.

use crate::error::Result;
use crate::models::{AnalysisStatus, ComparisonReport, ImageAnalysisResponse, UpdateStatusRequest};
use crate::services::api::ApiClient;

#[derive(Clone)]
pub struct AnalysisService {
    api: ApiClient,
}

impl AnalysisService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn by_patient(&self, patient_id: u64) -> Result<Vec<ImageAnalysisResponse>> {
        self.api
            .get_json(&format!("analysis/patient/{}", patient_id))
            .await
    }

    pub async fn by_id(&self, id: u64) -> Result<ImageAnalysisResponse> {
        self.api.get_json(&format!("analysis/{}", id)).await
    }

    /// Compare two analyses of the same patient.
    pub async fn compare(&self, from_id: u64, to_id: u64) -> Result<ComparisonReport> {
        let builder = self
            .api
            .get("analysis/compare")?
            .query(&[("fromId", from_id), ("toId", to_id)]);
        self.api.json(builder).await
    }

    /// Comparison report rendered as PDF bytes.
    pub async fn comparison_pdf(&self, from_id: u64, to_id: u64) -> Result<Vec<u8>> {
        let builder = self
            .api
            .get("analysis/compare/pdf")?
            .query(&[("fromId", from_id), ("toId", to_id)]);
        self.api.bytes(builder).await
    }

    pub async fn update_status(&self, id: u64, status: AnalysisStatus) -> Result<()> {
        let builder = self
            .api
            .put(&format!("analysis/{}/status", id))?
            .json(&UpdateStatusRequest { status });
        self.api.empty(builder).await?;
        tracing::info!(analysis_id = id, ?status, "Analysis status updated");
        Ok(())
    }
}
