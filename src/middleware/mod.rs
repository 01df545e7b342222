// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (owner identification, admin gate).

pub mod admin;
pub mod owner;

pub use admin::require_admin;
pub use owner::{identify_owner, require_owner, Owner};
