// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog coverage report types.

use crate::models::activity::{EnergyLevel, Location, WhoPlaying};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A two-year age window that the catalog should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBucket {
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
}

/// Age windows checked by coverage analysis.
pub const AGE_BUCKETS: [AgeBucket; 3] = [
    AgeBucket {
        label: "5-6",
        min: 5,
        max: 6,
    },
    AgeBucket {
        label: "6-7",
        min: 6,
        max: 7,
    },
    AgeBucket {
        label: "7-8",
        min: 7,
        max: 8,
    },
];

/// One point in the energy × location × who × age cross-product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FilterCombination {
    pub energy_level: EnergyLevel,
    pub location: Location,
    pub who_playing: WhoPlaying,
    pub age_range: String,
    pub min_age: u32,
    pub max_age: u32,
    pub activity_count: usize,
}

impl FilterCombination {
    /// Short label for logs ("5-6 calm indoor together").
    pub fn describe(&self) -> String {
        format!(
            "{} {} {} {}",
            self.age_range,
            self.energy_level.as_str(),
            self.location.as_str(),
            self.who_playing.as_str()
        )
    }
}

/// Result of a coverage pass over the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    /// Every combination with its activity count
    pub combinations: Vec<FilterCombination>,
    /// Combinations with no supporting activity
    pub missing_combinations: Vec<FilterCombination>,
    /// Combinations with some support, but below the target threshold
    pub low_coverage_combinations: Vec<FilterCombination>,
    pub total_combinations: usize,
    pub covered_combinations: usize,
    /// `100 * covered / total`, always within [0, 100]
    pub coverage_percentage: f64,
}

/// A gap with its remediation priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedGap {
    #[serde(flatten)]
    pub combination: FilterCombination,
    pub priority: u32,
}
