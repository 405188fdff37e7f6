// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer authentication for outbound requests.

use crate::error::StorageError;
use crate::session::SessionStore;
use reqwest::RequestBuilder;
use std::sync::Arc;

/// Attaches the stored credential to every outbound request.
///
/// The credential is read at request-build time, so a login or logout is
/// picked up by the very next request. No retry or refresh happens here: a
/// rejected credential surfaces to the caller as `ClientError::Unauthorized`.
#[derive(Clone)]
pub struct RequestAuthenticator {
    store: Arc<dyn SessionStore>,
}

impl RequestAuthenticator {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Add `Authorization: Bearer <credential>` if a credential is stored.
    ///
    /// Without one the request goes out unauthenticated and the server
    /// decides whether to reject it.
    pub fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, StorageError> {
        match self.store.get_credential()? {
            Some(token) => Ok(request.bearer_auth(token)),
            None => {
                tracing::debug!("No stored credential, sending request unauthenticated");
                Ok(request)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use reqwest::header::AUTHORIZATION;

    fn build(auth: &RequestAuthenticator) -> reqwest::Request {
        let client = reqwest::Client::new();
        auth.authorize(client.get("http://localhost/api/auth/profile"))
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_attaches_bearer_header() {
        let store = Arc::new(MemorySessionStore::new());
        store.save_credential("h.p.s").unwrap();
        let auth = RequestAuthenticator::new(store);

        let request = build(&auth);
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer h.p.s"
        );
    }

    #[test]
    fn test_no_credential_no_header() {
        let auth = RequestAuthenticator::new(Arc::new(MemorySessionStore::new()));
        let request = build(&auth);
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_reads_credential_per_request() {
        let store = Arc::new(MemorySessionStore::new());
        let auth = RequestAuthenticator::new(store.clone());

        store.save_credential("first.p.s").unwrap();
        assert_eq!(
            build(&auth).headers().get(AUTHORIZATION).unwrap(),
            "Bearer first.p.s"
        );

        store.clear().unwrap();
        assert!(build(&auth).headers().get(AUTHORIZATION).is_none());
    }
}
