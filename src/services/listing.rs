// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side search, filter and sort over fetched lists.
//!
//! Lists are small (one doctor's patients, one patient's analyses), so these
//! are plain functions returning new vectors.

use crate::models::{ImageAnalysisResponse, PatientResponse};
use chrono::{DateTime, NaiveDateTime};
use std::cmp::Ordering;

/// Patient list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatientSortOption {
    #[default]
    Name,
    /// Birth date ascending; unknown birth dates first.
    Age,
    /// Most recent exam first; never-examined last.
    LastExam,
}

/// Analysis list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisSortOption {
    #[default]
    DateDesc,
    DateAsc,
    AccuracyDesc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisFilterOption {
    #[default]
    All,
    ViewedOnly,
    UnviewedOnly,
}

impl AnalysisFilterOption {
    fn matches(&self, analysis: &ImageAnalysisResponse) -> bool {
        match self {
            AnalysisFilterOption::All => true,
            AnalysisFilterOption::ViewedOnly => analysis.viewed,
            AnalysisFilterOption::UnviewedOnly => !analysis.viewed,
        }
    }
}

/// Patients whose name contains `query` (case-insensitive), sorted.
pub fn filter_patients(
    patients: &[PatientResponse],
    query: &str,
    sort: PatientSortOption,
) -> Vec<PatientResponse> {
    let needle = query.to_lowercase();

    let mut result: Vec<PatientResponse> = patients
        .iter()
        .filter(|p| p.user.user_name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    match sort {
        PatientSortOption::Name => result.sort_by(|a, b| a.user.user_name.cmp(&b.user.user_name)),
        PatientSortOption::Age => result.sort_by(|a, b| a.birth_date.cmp(&b.birth_date)),
        PatientSortOption::LastExam => {
            result.sort_by(|a, b| b.last_exam_date.cmp(&a.last_exam_date))
        }
    }

    result
}

/// Analyses matching `query` and `filter`, sorted.
///
/// The query is searched in the diagnosis, details, recommendations and the
/// doctor's name.
pub fn filter_analyses(
    analyses: &[ImageAnalysisResponse],
    query: &str,
    sort: AnalysisSortOption,
    filter: AnalysisFilterOption,
) -> Vec<ImageAnalysisResponse> {
    let needle = query.to_lowercase();

    let mut result: Vec<ImageAnalysisResponse> = analyses
        .iter()
        .filter(|a| search_text(a).contains(&needle))
        .filter(|a| filter.matches(a))
        .cloned()
        .collect();

    match sort {
        AnalysisSortOption::DateDesc => {
            result.sort_by(|a, b| created_at(b).cmp(&created_at(a)))
        }
        AnalysisSortOption::DateAsc => result.sort_by(|a, b| created_at(a).cmp(&created_at(b))),
        AnalysisSortOption::AccuracyDesc => result.sort_by(|a, b| accuracy_desc(a, b)),
    }

    result
}

/// Analyses the patient has not opened yet, in their original order.
pub fn unviewed(analyses: &[ImageAnalysisResponse]) -> Vec<ImageAnalysisResponse> {
    analyses.iter().filter(|a| !a.viewed).cloned().collect()
}

fn search_text(analysis: &ImageAnalysisResponse) -> String {
    [
        analysis.analysis_diagnosis.as_deref(),
        analysis.analysis_details.as_deref(),
        analysis.treatment_recommendations.as_deref(),
        Some(analysis.doctor.user_name.as_str()),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

/// Creation time as a sort key; unparsable timestamps sort as the minimum.
fn created_at(analysis: &ImageAnalysisResponse) -> NaiveDateTime {
    parse_iso_datetime(&analysis.creation_datetime).unwrap_or(NaiveDateTime::MIN)
}

/// ISO-8601 date-time. Offset timestamps are normalized to UTC so mixed
/// offsets order by instant; naive ones are taken as already UTC.
fn parse_iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok())
}

fn accuracy_desc(a: &ImageAnalysisResponse, b: &ImageAnalysisResponse) -> Ordering {
    let a = a.analysis_accuracy.unwrap_or(0.0);
    let b = b.analysis_accuracy.unwrap_or(0.0);
    b.total_cmp(&a)
}
