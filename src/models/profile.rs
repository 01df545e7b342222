// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Kid profile model.

use crate::time_utils::{age_in_years, parse_month};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// One child's identity and preferences, owned by a single caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KidProfile {
    /// Profile ID (also used as document ID)
    pub id: String,
    /// Owner resolved by the upstream session layer
    pub owner_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Month name ("March")
    pub birth_month: String,
    pub birth_year: i32,
    #[serde(default)]
    pub interests: Vec<String>,
    pub created_at: String,
}

impl KidProfile {
    /// Age in whole years on `today`.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        age_in_years(parse_month(&self.birth_month), self.birth_year, today)
    }

    /// Apply a partial update. Fields left `None` are untouched.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = Some(name);
        }
        if let Some(month) = update.birth_month {
            self.birth_month = month;
        }
        if let Some(year) = update.birth_year {
            self.birth_year = year;
        }
        if let Some(interests) = update.interests {
            self.interests = interests;
        }
    }
}

/// Body of `POST /api/profile`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewKidProfile {
    #[validate(length(max = 60))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_month_name"))]
    pub birth_month: String,
    #[validate(range(min = 1900, max = 2100))]
    pub birth_year: i32,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub interests: Vec<String>,
}

/// Body of `PUT /api/profile/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[validate(length(max = 60))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_month_name"))]
    pub birth_month: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub birth_year: Option<i32>,
    #[validate(length(max = 20))]
    pub interests: Option<Vec<String>>,
}

fn validate_month_name(month: &str) -> Result<(), ValidationError> {
    if parse_month(month).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("month_name"))
    }
}

/// Profile as returned by the API, with the derived age.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: KidProfile,
    pub age: u32,
}
