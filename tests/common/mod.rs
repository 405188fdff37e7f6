// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::Router;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use medvision_client::config::ClientConfig;
use medvision_client::session::{MemorySessionStore, SessionStore};
use medvision_client::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Key the mock server "signs" with. The client never verifies it.
pub const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

/// Mint an HS256 token carrying `claims`, the way the real server does.
#[allow(dead_code)]
pub fn mint_token(claims: Value) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .expect("Failed to create JWT")
}

fn expiry() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        + 86400
}

#[allow(dead_code)]
pub fn patient_token(user_id: u64) -> String {
    mint_token(json!({
        "sub": format!("patient{}@example.com", user_id),
        "role": "PATIENT",
        "userId": user_id,
        "exp": expiry(),
    }))
}

#[allow(dead_code)]
pub fn doctor_token(user_id: u64) -> String {
    mint_token(json!({
        "sub": format!("doctor{}@example.com", user_id),
        "role": "DOCTOR",
        "userId": user_id,
        "exp": expiry(),
    }))
}

/// Serve `router` on an ephemeral local port and return the API base URL.
///
/// Routes are expected under `/api/`.
#[allow(dead_code)]
pub async fn spawn_mock_api(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock API");
    let addr = listener.local_addr().expect("Mock API has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock API server failed");
    });

    format!("http://{}/api/", addr)
}

/// App state against `base_url`, backed by an in-memory session.
#[allow(dead_code)]
pub fn test_state(base_url: &str) -> (AppState, Arc<MemorySessionStore>) {
    let config = ClientConfig {
        api_base_url: base_url.to_string(),
        request_timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    };
    let store = Arc::new(MemorySessionStore::new());
    let shared: Arc<dyn SessionStore> = store.clone();
    let state = AppState::new(config, shared).expect("Failed to build app state");
    (state, store)
}

#[allow(dead_code)]
pub fn user_json(id: u64, name: &str, role: &str) -> Value {
    json!({
        "userId": id,
        "userName": name,
        "email": format!("user{}@example.com", id),
        "userRole": role,
        "creationDatetime": "2025-01-01T09:00:00",
        "avatarUrl": null
    })
}

#[allow(dead_code)]
pub fn analysis_json(id: u64, created: &str, viewed: bool) -> Value {
    json!({
        "imageAnalysisId": id,
        "analysisAccuracy": 0.91,
        "analysisPrecision": 0.88,
        "analysisRecall": 0.85,
        "analysisDetails": "Opacity in the lower left lobe",
        "analysisDiagnosis": "Pneumonia",
        "treatmentRecommendations": "Antibiotics",
        "creationDatetime": created,
        "analysisStatus": "PENDING",
        "viewed": viewed,
        "diagnosisClass": 1,
        "imageFile": null,
        "heatmapFile": null,
        "patient": user_json(2, "Olena Kovalenko", "PATIENT"),
        "doctor": user_json(7, "Taras Shevchenko", "DOCTOR")
    })
}

#[allow(dead_code)]
pub fn patient_json(id: u64, name: &str) -> Value {
    json!({
        "patientId": id,
        "birthDate": "1985-04-12",
        "gender": "FEMALE",
        "heightCm": 168.0,
        "weightKg": 61.5,
        "chronicDiseases": null,
        "allergies": "Penicillin",
        "address": null,
        "lastExamDate": "2025-03-02",
        "user": user_json(id + 100, name, "PATIENT")
    })
}
