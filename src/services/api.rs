// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MedVision HTTP API client.
//!
//! Handles:
//! - Base URL joining
//! - Bearer credential injection (via `RequestAuthenticator`)
//! - Uniform status checking: 401/403 become `Unauthorized`, any other
//!   non-2xx becomes `Api("HTTP <status>: <body>")`
//!
//! There is no retry or backoff; failures go straight to the caller.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::middleware::RequestAuthenticator;
use crate::session::SessionStore;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Shared low-level API client. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    authenticator: RequestAuthenticator,
}

impl ApiClient {
    /// Create a client for `config.api_base_url` that authenticates from `store`.
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            authenticator: RequestAuthenticator::new(store),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `auth/login`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start an authenticated request.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let builder = self.http.request(method, self.url(path));
        Ok(self.authenticator.authorize(builder)?)
    }

    pub(crate) fn get(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::GET, path)
    }

    pub(crate) fn post(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::POST, path)
    }

    pub(crate) fn put(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::PUT, path)
    }

    /// Send a request and check its status.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let response = self.execute(builder).await?;
        check_response(response).await
    }

    /// Send a request without checking its status.
    async fn execute(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let request = builder
            .build()
            .map_err(|e| ClientError::Http(e.to_string()))?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::warn!(%method, %path, error = %e, "API request failed");
            ClientError::Http(e.to_string())
        })?;

        tracing::debug!(%method, %path, status = response.status().as_u16(), "API response");
        Ok(response)
    }

    /// Send and parse a JSON body.
    pub(crate) async fn json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        self.send(builder)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("JSON parse error: {}", e)))
    }

    /// Send and discard the body.
    pub(crate) async fn empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await?;
        Ok(())
    }

    /// Send and return the body as text.
    pub(crate) async fn text(&self, builder: RequestBuilder) -> Result<String> {
        self.send(builder)
            .await?
            .text()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Send and return the raw body (images, heatmaps, PDFs).
    pub(crate) async fn bytes(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        let body = self
            .send(builder)
            .await?
            .bytes()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;
        Ok(body.to_vec())
    }

    /// Generic GET request with JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.get(path)?;
        self.json(builder).await
    }

    /// Generic GET request with a binary response.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let builder = self.get(path)?;
        self.bytes(builder).await
    }

    /// GET a binary resource that may legitimately be absent.
    ///
    /// 404 yields `None`; every other failure is returned as from `send`.
    pub(crate) async fn get_optional_bytes(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let response = self.execute(self.get(path)?).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = check_response(response)
            .await?
            .bytes()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;
        Ok(Some(body.to_vec()))
    }
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        tracing::warn!(status = status.as_u16(), "Credential rejected by API");
        return Err(ClientError::Unauthorized);
    }

    Err(ClientError::Api(format!("HTTP {}: {}", status, body)))
}
