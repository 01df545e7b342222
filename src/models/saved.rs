// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saved-activity bookmarks.

use crate::models::Activity;
use serde::{Deserialize, Serialize};

/// Bookmark join record between an owner and a catalog activity.
///
/// `activity_id` is a weak reference: the activity may since have been
/// removed from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedActivity {
    pub id: String,
    pub owner_id: String,
    pub activity_id: String,
    #[serde(default)]
    pub is_used: bool,
    pub saved_at: String,
}

/// Bookmark joined with its activity for `GET /api/saved-activities`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedActivityWithDetails {
    #[serde(flatten)]
    pub saved: SavedActivity,
    pub activity: Option<Activity>,
}
