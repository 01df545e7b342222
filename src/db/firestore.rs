// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Activities (the recommendation catalog)
//! - Kid profiles (one per owner)
//! - Saved activities (owner bookmarks)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Activity, KidProfile, SavedActivity};
use futures_util::{stream, StreamExt};

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any bearer token, so hand it an unsigned one.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore Emulator");

        Ok(Self { client })
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Read the whole catalog.
    pub async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn get_activity(&self, id: &str) -> Result<Option<Activity>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::ACTIVITIES)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace an activity (document ID is the activity ID).
    pub async fn put_activity(&self, activity: &Activity) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::ACTIVITIES)
            .document_id(&activity.id)
            .object(activity)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Store many activities with bounded concurrency.
    pub async fn put_activities(&self, activities: &[Activity]) -> Result<(), AppError> {
        stream::iter(activities)
            .map(|activity| self.put_activity(activity))
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;
        Ok(())
    }

    /// Delete an activity. Returns `false` if it did not exist.
    pub async fn delete_activity(&self, id: &str) -> Result<bool, AppError> {
        if self.get_activity(id).await?.is_none() {
            return Ok(false);
        }

        self.client
            .fluent()
            .delete()
            .from(collections::ACTIVITIES)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(true)
    }

    /// All activities with exactly this title.
    pub async fn find_activities_by_title(&self, title: &str) -> Result<Vec<Activity>, AppError> {
        let title = title.to_string();
        self.client
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| q.field("title").eq(title.clone()))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Profile Operations ──────────────────────────────────────

    pub async fn get_profile(&self, id: &str) -> Result<Option<KidProfile>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::KID_PROFILES)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// The owner's profile, if they have one.
    pub async fn get_profile_for_owner(
        &self,
        owner_id: &str,
    ) -> Result<Option<KidProfile>, AppError> {
        let owner_id = owner_id.to_string();
        let profiles: Vec<KidProfile> = self
            .client
            .fluent()
            .select()
            .from(collections::KID_PROFILES)
            .filter(move |q| q.field("ownerId").eq(owner_id.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(profiles.into_iter().next())
    }

    pub async fn put_profile(&self, profile: &KidProfile) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::KID_PROFILES)
            .document_id(&profile.id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Saved Activity Operations ───────────────────────────────

    /// Bookmarks for an owner, oldest first.
    pub async fn list_saved(&self, owner_id: &str) -> Result<Vec<SavedActivity>, AppError> {
        let owner_id = owner_id.to_string();
        let mut saved: Vec<SavedActivity> = self
            .client
            .fluent()
            .select()
            .from(collections::SAVED_ACTIVITIES)
            .filter(move |q| q.field("ownerId").eq(owner_id.clone()))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Sorted here to avoid a composite index on (ownerId, savedAt)
        saved.sort_by(|a, b| a.saved_at.cmp(&b.saved_at));
        Ok(saved)
    }

    pub async fn get_saved(&self, id: &str) -> Result<Option<SavedActivity>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::SAVED_ACTIVITIES)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn put_saved(&self, saved: &SavedActivity) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::SAVED_ACTIVITIES)
            .document_id(&saved.id)
            .object(saved)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a bookmark. Returns `false` if it did not exist.
    pub async fn delete_saved(&self, id: &str) -> Result<bool, AppError> {
        if self.get_saved(id).await?.is_none() {
            return Ok(false);
        }

        self.client
            .fluent()
            .delete()
            .from(collections::SAVED_ACTIVITIES)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(true)
    }
}
