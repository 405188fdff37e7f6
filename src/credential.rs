// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential decoding.
//!
//! The bearer credential issued by the MedVision API is a three-segment
//! claims token. The client only needs the `role` and `userId` claims to pick
//! an application mode, so it reads the payload segment and never checks the
//! signature; the server does that on every request.

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig},
        DecodePaddingMode,
    },
    Engine as _,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// base64url that accepts the payload with or without `=` padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Access level carried by a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "PATIENT",
            Role::Doctor => "DOCTOR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role tag is neither patient nor doctor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("PATIENT") {
            Ok(Role::Patient)
        } else if s.eq_ignore_ascii_case("DOCTOR") {
            Ok(Role::Doctor)
        } else {
            Err(ParseRoleError(s.to_string()))
        }
    }
}

/// Claims extracted from a credential.
///
/// `role == None` means the credential must be treated as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CredentialClaims {
    pub role: Option<Role>,
    /// Role-scoped identifier (`userId` claim)
    pub user_id: Option<u64>,
}

impl CredentialClaims {
    /// True when the credential carries a role the client can route on.
    pub fn is_usable(&self) -> bool {
        self.role.is_some()
    }
}

/// Extract role and user id from a credential.
///
/// Total and deterministic: any malformed input yields
/// `CredentialClaims::default()` rather than an error.
pub fn decode_credential(token: &str) -> CredentialClaims {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        tracing::debug!(
            segments = segments.len(),
            "Credential does not have 3 segments"
        );
        return CredentialClaims::default();
    }

    let payload = match PAYLOAD_ENGINE.decode(segments[1]) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "Credential payload is not base64url");
            return CredentialClaims::default();
        }
    };

    let claims = match serde_json::from_slice::<Value>(&payload) {
        Ok(Value::Object(claims)) => claims,
        Ok(_) => {
            tracing::debug!("Credential payload is not a JSON object");
            return CredentialClaims::default();
        }
        Err(e) => {
            tracing::debug!(error = %e, "Credential payload is not JSON");
            return CredentialClaims::default();
        }
    };

    let role = claims
        .get("role")
        .and_then(Value::as_str)
        .and_then(|r| r.parse::<Role>().ok());

    let user_id = claims
        .get("userId")
        .or_else(|| claims.get("user_id"))
        .and_then(numeric_claim);

    tracing::debug!(role = ?role, user_id = ?user_id, "Decoded credential claims");

    CredentialClaims { role, user_id }
}

/// Accept a JSON number or a string of digits.
fn numeric_claim(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
