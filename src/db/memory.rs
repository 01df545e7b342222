// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store used for local development and tests.
//!
//! Each collection is a `DashMap` keyed by document ID. Documents remember
//! their insertion sequence so listings come back in insertion order, which
//! keeps ranking ties deterministic.

use crate::models::{Activity, KidProfile, SavedActivity};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// One document collection.
struct Collection<T> {
    next_seq: AtomicU64,
    docs: DashMap<String, (u64, T)>,
}

impl<T: Clone> Collection<T> {
    fn new() -> Self {
        Self {
            next_seq: AtomicU64::new(0),
            docs: DashMap::new(),
        }
    }

    /// Insert or replace. A replaced document keeps its original position.
    fn put(&self, id: &str, doc: T) {
        let mut entry = self
            .docs
            .entry(id.to_string())
            .or_insert_with(|| (self.next_seq.fetch_add(1, Ordering::Relaxed), doc.clone()));
        entry.1 = doc;
    }

    fn get(&self, id: &str) -> Option<T> {
        self.docs.get(id).map(|e| e.1.clone())
    }

    fn remove(&self, id: &str) -> bool {
        self.docs.remove(id).is_some()
    }

    /// Documents passing `keep`, in insertion order.
    fn list_where(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let mut docs: Vec<(u64, T)> = self
            .docs
            .iter()
            .filter(|e| keep(&e.value().1))
            .map(|e| e.value().clone())
            .collect();
        docs.sort_by_key(|(seq, _)| *seq);
        docs.into_iter().map(|(_, doc)| doc).collect()
    }
}

/// In-memory database. Clones share the same data.
#[derive(Clone)]
pub struct MemoryDb {
    activities: Arc<Collection<Activity>>,
    profiles: Arc<Collection<KidProfile>>,
    saved: Arc<Collection<SavedActivity>>,
}

impl Default for MemoryDb {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDb {
    pub fn new() -> Self {
        Self {
            activities: Arc::new(Collection::new()),
            profiles: Arc::new(Collection::new()),
            saved: Arc::new(Collection::new()),
        }
    }

    // ─── Activity Operations ─────────────────────────────────────

    pub fn list_activities(&self) -> Vec<Activity> {
        self.activities.list_where(|_| true)
    }

    pub fn get_activity(&self, id: &str) -> Option<Activity> {
        self.activities.get(id)
    }

    pub fn put_activity(&self, activity: &Activity) {
        self.activities.put(&activity.id, activity.clone());
    }

    pub fn delete_activity(&self, id: &str) -> bool {
        self.activities.remove(id)
    }

    pub fn find_activities_by_title(&self, title: &str) -> Vec<Activity> {
        self.activities.list_where(|a| a.title == title)
    }

    // ─── Profile Operations ──────────────────────────────────────

    pub fn get_profile(&self, id: &str) -> Option<KidProfile> {
        self.profiles.get(id)
    }

    pub fn get_profile_for_owner(&self, owner_id: &str) -> Option<KidProfile> {
        self.profiles
            .list_where(|p| p.owner_id == owner_id)
            .into_iter()
            .next()
    }

    pub fn put_profile(&self, profile: &KidProfile) {
        self.profiles.put(&profile.id, profile.clone());
    }

    // ─── Saved Activity Operations ───────────────────────────────

    pub fn list_saved(&self, owner_id: &str) -> Vec<SavedActivity> {
        self.saved.list_where(|s| s.owner_id == owner_id)
    }

    pub fn get_saved(&self, id: &str) -> Option<SavedActivity> {
        self.saved.get(id)
    }

    pub fn put_saved(&self, saved: &SavedActivity) {
        self.saved.put(&saved.id, saved.clone());
    }

    pub fn delete_saved(&self, id: &str) -> bool {
        self.saved.remove(id)
    }
}
