// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Patient-mode API operations.

use crate::error::{ClientError, Result};
use crate::models::ImageAnalysisResponse;
use crate::services::api::ApiClient;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::collections::HashMap;

#[derive(Clone)]
pub struct PatientService {
    api: ApiClient,
}

impl PatientService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn my_analyses(&self) -> Result<Vec<ImageAnalysisResponse>> {
        self.api.get_json("patient/analyses").await
    }

    pub async fn unviewed_analyses(&self) -> Result<Vec<ImageAnalysisResponse>> {
        self.api.get_json("patient/analyses/unviewed").await
    }

    pub async fn analysis(&self, id: u64) -> Result<ImageAnalysisResponse> {
        self.api
            .get_json(&format!("patient/analyses/{}", id))
            .await
    }

    /// All heatmaps of the patient's analyses, keyed by analysis id.
    pub async fn heatmaps(&self) -> Result<HashMap<u64, Vec<u8>>> {
        let raw: HashMap<String, String> = self.api.get_json("patient/heatmaps").await?;
        Ok(decode_image_map(raw))
    }

    /// All source images of the patient's analyses, keyed by analysis id.
    pub async fn images(&self) -> Result<HashMap<u64, Vec<u8>>> {
        let raw: HashMap<String, String> = self.api.get_json("patient/images").await?;
        Ok(decode_image_map(raw))
    }

    pub async fn heatmap(&self, analysis_id: u64) -> Result<Vec<u8>> {
        self.heatmaps()
            .await?
            .remove(&analysis_id)
            .ok_or_else(|| ClientError::NotFound(format!("heatmap for analysis {}", analysis_id)))
    }

    pub async fn image(&self, analysis_id: u64) -> Result<Vec<u8>> {
        self.images()
            .await?
            .remove(&analysis_id)
            .ok_or_else(|| ClientError::NotFound(format!("image for analysis {}", analysis_id)))
    }

    /// Export an analysis report as PDF bytes.
    pub async fn export_pdf(&self, analysis_id: u64) -> Result<Vec<u8>> {
        self.api
            .get_bytes(&format!("patient/analyses/pdf/{}", analysis_id))
            .await
    }
}

/// Decode `{ "<id>": "<base64>" }`, dropping entries with a bad id or payload.
pub(crate) fn decode_image_map(raw: HashMap<String, String>) -> HashMap<u64, Vec<u8>> {
    raw.into_iter()
        .filter_map(|(key, value)| {
            let id = key.trim().parse::<u64>().ok()?;
            match BASE64.decode(value.trim()) {
                Ok(bytes) => Some((id, bytes)),
                Err(e) => {
                    tracing::warn!(analysis_id = id, error = %e, "Skipping undecodable image");
                    None
                }
            }
        })
        .collect()
}
