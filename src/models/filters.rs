// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transient query object for activity recommendations.

use crate::models::activity::{EnergyLevel, Location, MaterialsNeeded, MessLevel, WhoPlaying};
use serde::{Deserialize, Serialize};

/// Minutes the parent has available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeAvailable {
    #[serde(rename = "15")]
    FifteenMinutes,
    #[serde(rename = "30")]
    ThirtyMinutes,
    #[serde(rename = "60")]
    SixtyMinutes,
}

/// Filters sent with a recommendation request. Every field is optional.
///
/// Unknown enum values fail deserialization, so the matcher never sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFilters {
    #[serde(default)]
    pub who_playing: Option<WhoPlaying>,
    /// Accepted for compatibility; not consulted when matching.
    #[serde(default)]
    pub time_available: Option<TimeAvailable>,
    #[serde(default)]
    pub energy_level: Option<EnergyLevel>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub mess_level: Option<MessLevel>,
    #[serde(default)]
    pub materials_needed: Option<MaterialsNeeded>,
    /// Accepted for compatibility; not consulted when matching.
    #[serde(default = "default_allow_repeats")]
    pub allow_repeats: bool,
}

fn default_allow_repeats() -> bool {
    true
}

impl Default for ActivityFilters {
    fn default() -> Self {
        Self {
            who_playing: None,
            time_available: None,
            energy_level: None,
            location: None,
            mess_level: None,
            materials_needed: None,
            allow_repeats: true,
        }
    }
}
