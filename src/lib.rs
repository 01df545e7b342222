// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! PlaySpark: screen-free activity recommendations for kids
//!
//! This crate provides the backend API that matches a child's age,
//! interests and the parent's filters against an activity catalog, and the
//! administrative tooling that keeps that catalog covered.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::{ActivityMatcher, AgePolicy, CoverageAnalyzer, GeneratorService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub matcher: ActivityMatcher,
    pub coverage: CoverageAnalyzer,
    pub generator: GeneratorService,
}

impl AppState {
    /// Wire services from configuration.
    pub fn new(config: Config, db: Database) -> Self {
        let matcher = ActivityMatcher::new(AgePolicy::with_buffer(config.age_buffer_years));
        let coverage = CoverageAnalyzer::new(config.low_coverage_threshold);
        let generator = GeneratorService::from_config(&config);

        Self {
            config,
            db,
            matcher,
            coverage,
            generator,
        }
    }
}
