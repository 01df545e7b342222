// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity matching and interest ranking.
//!
//! A request is answered in two passes over one catalog snapshot:
//! 1. Drop activities that fail the age, play-mode, energy, location, mess
//!    or materials predicates
//! 2. Stable-sort the survivors so that activities serving one of the
//!    child's interests come first

use crate::models::{
    Activity, ActivityFilters, EnergyLevel, Location, MaterialsNeeded, WhoPlaying,
};
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// How strictly an activity's age bounds are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgePolicy {
    /// Years of slack allowed on each side of `[min, max]`. Zero is exact.
    pub buffer_years: u32,
}

impl AgePolicy {
    pub const EXACT: AgePolicy = AgePolicy { buffer_years: 0 };

    pub fn with_buffer(buffer_years: u32) -> Self {
        Self { buffer_years }
    }

    fn admits(&self, age: u32, min: u32, max: u32) -> bool {
        let low = min.saturating_sub(self.buffer_years);
        let high = max.saturating_add(self.buffer_years);
        (low..=high).contains(&age)
    }
}

/// Selects and ranks catalog activities for one child.
impl Default for AgePolicy {
    fn default() -> Self {
        Self::EXACT
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityMatcher {
    age_policy: AgePolicy,
}

impl ActivityMatcher {
    pub fn new(age_policy: AgePolicy) -> Self {
        Self { age_policy }
    }

    /// Whether `age` falls inside the activity's effective age bounds.
    ///
    /// Activities without usable age information are always eligible.
    pub fn is_age_eligible(&self, activity: &Activity, age: u32) -> bool {
        match activity.age_bounds() {
            Some((min, max)) => self.age_policy.admits(age, min, max),
            None => true,
        }
    }

    /// Whether an activity passes every predicate for this request.
    pub fn matches(&self, activity: &Activity, filters: &ActivityFilters, age: u32) -> bool {
        if !self.is_age_eligible(activity, age) {
            return false;
        }

        if filters
            .who_playing
            .is_some_and(|w| activity.who_playing != Some(w))
        {
            return false;
        }

        if filters
            .energy_level
            .is_some_and(|e| activity.energy_level != Some(e))
        {
            return false;
        }

        if filters
            .location
            .is_some_and(|l| activity.location != Some(l))
        {
            return false;
        }

        if let Some(mess) = filters.mess_level {
            let ok = match activity.mess_level {
                Some(level) => level == mess,
                None => activity.has_tag(mess.as_str()),
            };
            if !ok {
                return false;
            }
        }

        if let Some(requested) = filters.materials_needed {
            let ok = match activity.materials_needed {
                Some(needed) => needed.satisfies(requested),
                None => match requested {
                    MaterialsNeeded::Basic => {
                        activity.has_tag("basic") || activity.has_tag("none")
                    }
                    other => activity.has_tag(other.as_str()),
                },
            };
            if !ok {
                return false;
            }
        }

        true
    }

    /// Filter and rank `activities` for a request.
    ///
    /// The result is ordered by interest match (matching first); ties keep
    /// their input order. An empty result is not an error.
    pub fn rank(
        &self,
        activities: &[Activity],
        filters: &ActivityFilters,
        interests: &[String],
        age: u32,
    ) -> Vec<Activity> {
        let mut matched: Vec<Activity> = activities
            .iter()
            .filter(|a| self.matches(a, filters, age))
            .cloned()
            .collect();

        // sort_by_key is stable, so equal scores keep catalog order
        matched.sort_by_key(|a| Reverse(interest_score(a, interests)));
        matched
    }

    /// Summarize what the age-eligible part of the catalog offers.
    ///
    /// Used to explain empty recommendation results in the logs.
    pub fn eligible_summary(&self, activities: &[Activity], age: u32) -> EligibleSummary {
        let eligible: Vec<&Activity> = activities
            .iter()
            .filter(|a| self.is_age_eligible(a, age))
            .collect();

        EligibleSummary {
            count: eligible.len(),
            energy_levels: eligible.iter().filter_map(|a| a.energy_level).collect(),
            locations: eligible.iter().filter_map(|a| a.location).collect(),
            who_playing: eligible.iter().filter_map(|a| a.who_playing).collect(),
        }
    }
}

/// 1 if the activity serves any requested interest, else 0.
pub fn interest_score(activity: &Activity, interests: &[String]) -> u8 {
    u8::from(activity.serves_any_interest(interests))
}

/// Distinct targeting values among age-eligible activities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibleSummary {
    pub count: usize,
    pub energy_levels: BTreeSet<EnergyLevel>,
    pub locations: BTreeSet<Location>,
    pub who_playing: BTreeSet<WhoPlaying>,
}
