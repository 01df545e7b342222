// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity catalog model for storage and API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// How much energy an activity asks of the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Calm,
    Focused,
    Active,
    Silly,
}

impl EnergyLevel {
    pub const ALL: [EnergyLevel; 4] = [
        EnergyLevel::Calm,
        EnergyLevel::Focused,
        EnergyLevel::Active,
        EnergyLevel::Silly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::Calm => "calm",
            EnergyLevel::Focused => "focused",
            EnergyLevel::Active => "active",
            EnergyLevel::Silly => "silly",
        }
    }
}

/// Where the activity happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Indoor,
    Outdoor,
}

impl Location {
    pub const ALL: [Location; 2] = [Location::Indoor, Location::Outdoor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Indoor => "indoor",
            Location::Outdoor => "outdoor",
        }
    }
}

/// Who is taking part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum WhoPlaying {
    Alone,
    Together,
    Group,
}

impl WhoPlaying {
    pub const ALL: [WhoPlaying; 3] = [WhoPlaying::Alone, WhoPlaying::Together, WhoPlaying::Group];

    pub fn as_str(&self) -> &'static str {
        match self {
            WhoPlaying::Alone => "alone",
            WhoPlaying::Together => "together",
            WhoPlaying::Group => "group",
        }
    }
}

/// Mess tolerance. Serialized names match the filter values sent by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum MessLevel {
    NoMess,
    LittleMess,
    Messy,
}

impl MessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessLevel::NoMess => "nomess",
            MessLevel::LittleMess => "littlemess",
            MessLevel::Messy => "messy",
        }
    }
}

/// Materials an activity needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum MaterialsNeeded {
    #[serde(rename = "none")]
    Nothing,
    Basic,
    Special,
}

impl MaterialsNeeded {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialsNeeded::Nothing => "none",
            MaterialsNeeded::Basic => "basic",
            MaterialsNeeded::Special => "special",
        }
    }

    /// Whether an activity needing `self` satisfies a request for `requested`.
    ///
    /// Asking for "basic" also accepts activities that need nothing at all.
    pub fn satisfies(&self, requested: MaterialsNeeded) -> bool {
        match requested {
            MaterialsNeeded::Basic => {
                matches!(self, MaterialsNeeded::Basic | MaterialsNeeded::Nothing)
            }
            other => *self == other,
        }
    }
}

/// Developmental stage label used for display and curation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DevelopmentStage {
    Toddler,
    EarlyPreschool,
    LatePreschool,
    Kindergarten,
    EarlyElementary,
    LateElementary,
}

/// A single material line, e.g. "📄 Paper".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Material {
    #[validate(length(max = 16))]
    pub emoji: String,
    #[validate(length(min = 1, max = 80))]
    pub name: String,
}

/// An expanded step with parent-facing guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedStep {
    pub step: String,
    pub description: String,
    #[serde(default)]
    pub tips: Vec<String>,
    /// Variation text keyed by age label ("5-6 years").
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub age_variations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variations {
    pub easier: String,
    pub harder: String,
}

/// Structured background for the "View Details" panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedInfo {
    #[serde(default)]
    pub learning_benefits: Vec<String>,
    #[serde(default)]
    pub safety_tips: Vec<String>,
    pub variations: Variations,
    #[serde(default)]
    pub parent_tips: Vec<String>,
}

/// Stored activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Opaque identifier (also used as document ID)
    pub id: String,
    pub title: String,
    pub materials: Vec<Material>,
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_steps: Option<Vec<DetailedStep>>,
    #[serde(default)]
    pub detailed_info: Option<DetailedInfo>,
    pub why_great: String,
    /// Legacy display string ("5-6"); `min_age`/`max_age` win when both are set
    pub age_range: String,
    #[serde(default)]
    pub min_age: Option<u32>,
    #[serde(default)]
    pub max_age: Option<u32>,
    #[serde(default)]
    pub development_stage: Option<DevelopmentStage>,
    /// Free-text duration label ("30 min")
    pub duration: String,
    /// Thematic labels. Older records also carry mess/material hints here.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub energy_level: Option<EnergyLevel>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub who_playing: Option<WhoPlaying>,
    #[serde(default)]
    pub mess_level: Option<MessLevel>,
    #[serde(default)]
    pub materials_needed: Option<MaterialsNeeded>,
    /// Interest-category ids this activity serves
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Activity {
    /// Effective inclusive age bounds.
    ///
    /// Explicit `min_age`/`max_age` take precedence; otherwise the legacy
    /// `age_range` string is parsed. `None` means no age constraint.
    pub fn age_bounds(&self) -> Option<(u32, u32)> {
        match (self.min_age, self.max_age) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => parse_age_range(&self.age_range),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether any of the activity's interests appear in `interests`.
    pub fn serves_any_interest(&self, interests: &[String]) -> bool {
        self.interests.iter().any(|i| interests.contains(i))
    }
}

/// Parse a legacy `"<min>-<max>"` age range.
///
/// Returns `None` for anything that isn't two non-negative integers with
/// `min <= max`.
pub fn parse_age_range(raw: &str) -> Option<(u32, u32)> {
    let (min, max) = raw.split_once('-')?;
    let min: u32 = min.trim().parse().ok()?;
    let max: u32 = max.trim().parse().ok()?;
    (min <= max).then_some((min, max))
}

/// Oldest age an activity may target.
pub const MAX_CHILD_AGE: u32 = 18;

/// A new activity before it has an ID.
///
/// This is the shape accepted from seed files, administrators and the
/// text-generation collaborator, and it is validated before insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_age_bounds"))]
pub struct ActivityDraft {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[validate(length(min = 1, max = 20), nested)]
    pub materials: Vec<Material>,
    #[validate(length(min = 1, max = 12))]
    pub steps: Vec<String>,
    #[serde(default)]
    pub detailed_steps: Option<Vec<DetailedStep>>,
    #[serde(default)]
    pub detailed_info: Option<DetailedInfo>,
    #[validate(length(min = 1, max = 1000))]
    pub why_great: String,
    #[validate(length(min = 1, max = 20))]
    pub age_range: String,
    #[serde(default)]
    #[validate(range(max = 18))]
    pub min_age: Option<u32>,
    #[serde(default)]
    #[validate(range(max = 18))]
    pub max_age: Option<u32>,
    #[serde(default)]
    pub development_stage: Option<DevelopmentStage>,
    #[validate(length(min = 1, max = 40))]
    pub duration: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub tags: Vec<String>,
    #[serde(default)]
    pub energy_level: Option<EnergyLevel>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub who_playing: Option<WhoPlaying>,
    #[serde(default)]
    pub mess_level: Option<MessLevel>,
    #[serde(default)]
    pub materials_needed: Option<MaterialsNeeded>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub interests: Vec<String>,
}

fn validate_age_bounds(draft: &ActivityDraft) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (draft.min_age, draft.max_age) {
        if min > max {
            let mut err = ValidationError::new("age_bounds");
            err.message = Some("minAge must not exceed maxAge".into());
            return Err(err);
        }
    }
    if draft.steps.iter().any(|s| s.trim().is_empty()) {
        let mut err = ValidationError::new("empty_step");
        err.message = Some("steps must not be blank".into());
        return Err(err);
    }
    Ok(())
}

impl ActivityDraft {
    /// Assign an identity and turn the draft into a stored activity.
    pub fn into_activity(self, id: String) -> Activity {
        Activity {
            id,
            title: self.title.trim().to_string(),
            materials: self.materials,
            steps: self.steps,
            detailed_steps: self.detailed_steps,
            detailed_info: self.detailed_info,
            why_great: self.why_great,
            age_range: self.age_range,
            min_age: self.min_age,
            max_age: self.max_age,
            development_stage: self.development_stage,
            duration: self.duration,
            tags: self.tags,
            energy_level: self.energy_level,
            location: self.location,
            who_playing: self.who_playing,
            mess_level: self.mess_level,
            materials_needed: self.materials_needed,
            interests: self.interests,
        }
    }

    /// Same as [`ActivityDraft::into_activity`] with a fresh random ID.
    pub fn into_new_activity(self) -> Activity {
        self.into_activity(uuid::Uuid::new_v4().to_string())
    }
}
