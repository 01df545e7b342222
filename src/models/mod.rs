// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod coverage;
pub mod filters;
pub mod profile;
pub mod saved;

pub use activity::{
    Activity, ActivityDraft, EnergyLevel, Location, MaterialsNeeded, MessLevel, WhoPlaying,
};
pub use coverage::{CoverageReport, FilterCombination, PrioritizedGap};
pub use filters::ActivityFilters;
pub use profile::KidProfile;
pub use saved::SavedActivity;
