// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound request middleware.

pub mod auth;

pub use auth::RequestAuthenticator;
