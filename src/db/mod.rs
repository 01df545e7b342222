// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore in production, in-memory for development).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{Activity, KidProfile, SavedActivity};

/// Collection names as constants.
pub mod collections {
    pub const ACTIVITIES: &str = "activities";
    pub const KID_PROFILES: &str = "kid_profiles";
    pub const SAVED_ACTIVITIES: &str = "saved_activities";
}

/// Storage backend selected at startup.
#[derive(Clone)]
pub enum Database {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl Database {
    /// Fresh, empty in-memory database.
    pub fn in_memory() -> Self {
        Database::Memory(MemoryDb::new())
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Database::Firestore(_) => "firestore",
            Database::Memory(_) => "memory",
        }
    }

    // ─── Activity Operations ─────────────────────────────────────

    pub async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        match self {
            Database::Firestore(db) => db.list_activities().await,
            Database::Memory(db) => Ok(db.list_activities()),
        }
    }

    pub async fn get_activity(&self, id: &str) -> Result<Option<Activity>, AppError> {
        match self {
            Database::Firestore(db) => db.get_activity(id).await,
            Database::Memory(db) => Ok(db.get_activity(id)),
        }
    }

    pub async fn put_activity(&self, activity: &Activity) -> Result<(), AppError> {
        match self {
            Database::Firestore(db) => db.put_activity(activity).await,
            Database::Memory(db) => {
                db.put_activity(activity);
                Ok(())
            }
        }
    }

    pub async fn put_activities(&self, activities: &[Activity]) -> Result<(), AppError> {
        match self {
            Database::Firestore(db) => db.put_activities(activities).await,
            Database::Memory(db) => {
                activities.iter().for_each(|a| db.put_activity(a));
                Ok(())
            }
        }
    }

    pub async fn delete_activity(&self, id: &str) -> Result<bool, AppError> {
        match self {
            Database::Firestore(db) => db.delete_activity(id).await,
            Database::Memory(db) => Ok(db.delete_activity(id)),
        }
    }

    pub async fn find_activities_by_title(&self, title: &str) -> Result<Vec<Activity>, AppError> {
        match self {
            Database::Firestore(db) => db.find_activities_by_title(title).await,
            Database::Memory(db) => Ok(db.find_activities_by_title(title)),
        }
    }

    // ─── Profile Operations ──────────────────────────────────────

    pub async fn get_profile(&self, id: &str) -> Result<Option<KidProfile>, AppError> {
        match self {
            Database::Firestore(db) => db.get_profile(id).await,
            Database::Memory(db) => Ok(db.get_profile(id)),
        }
    }

    pub async fn get_profile_for_owner(
        &self,
        owner_id: &str,
    ) -> Result<Option<KidProfile>, AppError> {
        match self {
            Database::Firestore(db) => db.get_profile_for_owner(owner_id).await,
            Database::Memory(db) => Ok(db.get_profile_for_owner(owner_id)),
        }
    }

    pub async fn put_profile(&self, profile: &KidProfile) -> Result<(), AppError> {
        match self {
            Database::Firestore(db) => db.put_profile(profile).await,
            Database::Memory(db) => {
                db.put_profile(profile);
                Ok(())
            }
        }
    }

    // ─── Saved Activity Operations ───────────────────────────────

    pub async fn list_saved(&self, owner_id: &str) -> Result<Vec<SavedActivity>, AppError> {
        match self {
            Database::Firestore(db) => db.list_saved(owner_id).await,
            Database::Memory(db) => Ok(db.list_saved(owner_id)),
        }
    }

    pub async fn get_saved(&self, id: &str) -> Result<Option<SavedActivity>, AppError> {
        match self {
            Database::Firestore(db) => db.get_saved(id).await,
            Database::Memory(db) => Ok(db.get_saved(id)),
        }
    }

    pub async fn put_saved(&self, saved: &SavedActivity) -> Result<(), AppError> {
        match self {
            Database::Firestore(db) => db.put_saved(saved).await,
            Database::Memory(db) => {
                db.put_saved(saved);
                Ok(())
            }
        }
    }

    pub async fn delete_saved(&self, id: &str) -> Result<bool, AppError> {
        match self {
            Database::Firestore(db) => db.delete_saved(id).await,
            Database::Memory(db) => Ok(db.delete_saved(id)),
        }
    }
}
