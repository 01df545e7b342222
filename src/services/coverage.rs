// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog coverage analysis.
//!
//! Counts, for every energy × location × who × age-bucket combination, how
//! many catalog activities could be recommended for it, and ranks the
//! under-served combinations for backfill.

use crate::models::coverage::{AgeBucket, AGE_BUCKETS};
use crate::models::{
    Activity, CoverageReport, EnergyLevel, FilterCombination, Location, PrioritizedGap,
    WhoPlaying,
};

/// Default count below which a covered combination is still "low".
pub const DEFAULT_LOW_COVERAGE_THRESHOLD: usize = 2;

/// Stateless coverage report generator.
#[derive(Debug, Clone, Copy)]
pub struct CoverageAnalyzer {
    low_coverage_threshold: usize,
}

impl Default for CoverageAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_COVERAGE_THRESHOLD)
    }
}

impl CoverageAnalyzer {
    pub fn new(low_coverage_threshold: usize) -> Self {
        Self {
            low_coverage_threshold,
        }
    }

    pub fn low_coverage_threshold(&self) -> usize {
        self.low_coverage_threshold
    }

    /// Build the coverage report for a catalog snapshot.
    ///
    /// An empty catalog is valid and reports every combination as missing.
    pub fn analyze(&self, catalog: &[Activity]) -> CoverageReport {
        let mut combinations = Vec::with_capacity(
            EnergyLevel::ALL.len() * Location::ALL.len() * WhoPlaying::ALL.len() * AGE_BUCKETS.len(),
        );

        for energy_level in EnergyLevel::ALL {
            for location in Location::ALL {
                for who_playing in WhoPlaying::ALL {
                    for bucket in AGE_BUCKETS {
                        let activity_count = catalog
                            .iter()
                            .filter(|a| {
                                a.energy_level == Some(energy_level)
                                    && a.location == Some(location)
                                    && a.who_playing == Some(who_playing)
                                    && covers_bucket(a, &bucket)
                            })
                            .count();

                        combinations.push(FilterCombination {
                            energy_level,
                            location,
                            who_playing,
                            age_range: bucket.label.to_string(),
                            min_age: bucket.min,
                            max_age: bucket.max,
                            activity_count,
                        });
                    }
                }
            }
        }

        let missing_combinations: Vec<FilterCombination> = combinations
            .iter()
            .filter(|c| c.activity_count == 0)
            .cloned()
            .collect();
        let low_coverage_combinations: Vec<FilterCombination> = combinations
            .iter()
            .filter(|c| c.activity_count > 0 && c.activity_count < self.low_coverage_threshold)
            .cloned()
            .collect();

        let total_combinations = combinations.len();
        let covered_combinations = total_combinations - missing_combinations.len();
        let coverage_percentage = if total_combinations == 0 {
            0.0
        } else {
            100.0 * covered_combinations as f64 / total_combinations as f64
        };

        tracing::debug!(
            catalog_size = catalog.len(),
            total_combinations,
            covered_combinations,
            missing = missing_combinations.len(),
            low = low_coverage_combinations.len(),
            "Coverage analyzed"
        );

        CoverageReport {
            combinations,
            missing_combinations,
            low_coverage_combinations,
            total_combinations,
            covered_combinations,
            coverage_percentage,
        }
    }

    /// Order the report's gaps for backfill, highest priority first.
    ///
    /// Missing combinations precede low ones before sorting, and the sort is
    /// stable, so equal priorities keep that order.
    pub fn prioritize(report: &CoverageReport) -> Vec<PrioritizedGap> {
        let mut gaps: Vec<PrioritizedGap> = report
            .missing_combinations
            .iter()
            .chain(report.low_coverage_combinations.iter())
            .map(|c| PrioritizedGap {
                combination: c.clone(),
                priority: gap_priority(c),
            })
            .collect();

        gaps.sort_by(|a, b| b.priority.cmp(&a.priority));
        gaps
    }
}

/// An activity covers a bucket only if its range contains the whole bucket.
fn covers_bucket(activity: &Activity, bucket: &AgeBucket) -> bool {
    activity
        .age_bounds()
        .is_some_and(|(min, max)| min <= bucket.min && bucket.max <= max)
}

/// Remediation priority of one gap.
pub fn gap_priority(combination: &FilterCombination) -> u32 {
    let mut priority = 0;

    if combination.activity_count == 0 {
        priority += 100;
    }

    priority += match combination.energy_level {
        EnergyLevel::Focused | EnergyLevel::Active => 20,
        EnergyLevel::Silly => 15,
        EnergyLevel::Calm => 0,
    };

    if combination.location == Location::Indoor {
        priority += 10;
    }

    if combination.who_playing == WhoPlaying::Together {
        priority += 10;
    }

    priority
}
