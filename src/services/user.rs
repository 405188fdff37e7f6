// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Other users' avatars, with an in-memory cache.

use crate::error::Result;
use crate::services::api::ApiClient;
use dashmap::DashMap;
use futures_util::{stream, StreamExt};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const MAX_CONCURRENT_AVATAR_FETCHES: usize = 8;

/// Avatar bytes keyed by user id. A `None` avatar means the user has none.
///
/// Entries are tagged with the generation in which their fetch started.
/// `clear` starts a new generation, so a fetch still in flight when the
/// session ends can never be served to the next session.
#[derive(Default)]
pub struct AvatarCache {
    entries: DashMap<u64, CachedAvatar>,
    generation: AtomicU64,
}

struct CachedAvatar {
    generation: u64,
    avatar: Option<Arc<Vec<u8>>>,
}

impl AvatarCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Cached answer for `user_id` from the current generation.
    fn get(&self, user_id: u64) -> Option<Option<Arc<Vec<u8>>>> {
        let current = self.generation();
        self.entries
            .get(&user_id)
            .filter(|entry| entry.generation == current)
            .map(|entry| entry.avatar.clone())
    }

    fn insert(&self, user_id: u64, generation: u64, avatar: Option<Arc<Vec<u8>>>) {
        if generation != self.generation() {
            tracing::debug!(user_id, "Dropping avatar fetched before cache was cleared");
            return;
        }
        self.entries.insert(user_id, CachedAvatar { generation, avatar });
    }

    fn remove(&self, user_id: u64) {
        self.entries.remove(&user_id);
    }

    fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        let current = self.generation();
        self.entries
            .iter()
            .filter(|entry| entry.generation == current)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
    /// Shared across clones so every screen sees the same avatars.
    avatars: Arc<AvatarCache>,
}

impl UserService {
    pub fn new(api: ApiClient, avatars: Arc<AvatarCache>) -> Self {
        Self { api, avatars }
    }

    /// Fetch an avatar, bypassing the cache.
    pub async fn avatar(&self, user_id: u64) -> Result<Vec<u8>> {
        self.api
            .get_bytes(&format!("users/{}/avatar", user_id))
            .await
    }

    /// Cached avatar lookup. `Ok(None)` means the user has no avatar.
    ///
    /// Only answers are cached: an image, or a 404 for "no avatar". Any
    /// failure (rejected credential, network, server error) is returned to
    /// the caller and the next lookup asks the server again.
    pub async fn cached_avatar(&self, user_id: u64) -> Result<Option<Arc<Vec<u8>>>> {
        let generation = self.avatars.generation();
        if let Some(cached) = self.avatars.get(user_id) {
            return Ok(cached);
        }

        let fetched = self
            .api
            .get_optional_bytes(&format!("users/{}/avatar", user_id))
            .await?
            .map(Arc::new);

        self.avatars.insert(user_id, generation, fetched.clone());
        Ok(fetched)
    }

    /// Warm the cache for `user_ids`. Returns how many avatars are available.
    ///
    /// Failed fetches are logged and skipped, except a rejected credential,
    /// which is returned so the caller can send the user back to login.
    pub async fn prefetch_avatars(&self, user_ids: &[u64]) -> Result<usize> {
        let unique: HashSet<u64> = user_ids.iter().copied().collect();

        let results: Vec<(u64, Result<Option<Arc<Vec<u8>>>>)> = stream::iter(unique)
            .map(|user_id| async move { (user_id, self.cached_avatar(user_id).await) })
            .buffer_unordered(MAX_CONCURRENT_AVATAR_FETCHES)
            .collect()
            .await;

        let mut available = 0;
        for (user_id, result) in results {
            match result {
                Ok(Some(_)) => available += 1,
                Ok(None) => {}
                Err(e) if e.is_unauthorized() => return Err(e),
                Err(e) => tracing::warn!(user_id, error = %e, "Failed to prefetch avatar"),
            }
        }
        Ok(available)
    }

    /// Forget one cached avatar (e.g. after it changed).
    pub fn invalidate(&self, user_id: u64) {
        self.avatars.remove(user_id);
    }

    /// Drop all cached avatars, including any fetch still in flight (on logout).
    pub fn clear_cache(&self) {
        self.avatars.clear();
    }
}
