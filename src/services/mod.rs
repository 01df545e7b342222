// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod backfill;
pub mod catalog;
pub mod coverage;
pub mod curation;
pub mod generator;
pub mod matcher;

pub use backfill::{backfill_gaps, BackfillOptions, BackfillOutcome};
pub use catalog::{load_seed_file, seed_if_empty, CatalogError};
pub use coverage::CoverageAnalyzer;
pub use curation::{apply_curation, CurationPlan, CurationReport};
pub use generator::{DraftSource, GeneratorService};
pub use matcher::{ActivityMatcher, AgePolicy};
