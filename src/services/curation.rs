// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Administrative catalog curation.
//!
//! A plan is applied in three passes, in this order:
//! 1. Remove every activity whose title is listed (duplicate cleanup)
//! 2. Rename titles
//! 3. Attach `detailedInfo` to activities matched by (title, ageRange)
//!
//! Each entry is independent; one that matches nothing is reported, not
//! treated as an error.

use crate::db::Database;
use crate::error::AppError;
use crate::models::activity::DetailedInfo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurationPlan {
    #[serde(default)]
    pub remove_titles: Vec<String>,
    #[serde(default)]
    pub renames: Vec<TitleRename>,
    #[serde(default)]
    pub enhancements: Vec<Enhancement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleRename {
    pub old_title: String,
    pub new_title: String,
}

/// Detailed background for one (title, ageRange) pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enhancement {
    pub title: String,
    pub age_range: String,
    pub detailed_info: DetailedInfo,
}

/// Number of activity records touched by each pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurationReport {
    pub removed: usize,
    pub renamed: usize,
    pub enhanced: usize,
    /// Titles from the plan that matched no activity
    pub not_found: Vec<String>,
}

/// Apply a curation plan to the catalog.
pub async fn apply_curation(db: &Database, plan: CurationPlan) -> Result<CurationReport, AppError> {
    let mut report = CurationReport::default();

    for title in plan.remove_titles {
        let matches = db.find_activities_by_title(&title).await?;
        if matches.is_empty() {
            report.not_found.push(title);
            continue;
        }
        for activity in matches {
            if db.delete_activity(&activity.id).await? {
                report.removed += 1;
            }
        }
        tracing::info!(title = %title, "Removed activity");
    }

    for rename in plan.renames {
        let new_title = rename.new_title.trim();
        if new_title.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Empty new title for '{}'",
                rename.old_title
            )));
        }

        let matches = db.find_activities_by_title(&rename.old_title).await?;
        if matches.is_empty() {
            report.not_found.push(rename.old_title);
            continue;
        }
        for mut activity in matches {
            activity.title = new_title.to_string();
            db.put_activity(&activity).await?;
            report.renamed += 1;
        }
        tracing::info!(from = %rename.old_title, to = %new_title, "Renamed activity");
    }

    for enhancement in plan.enhancements {
        let matches: Vec<_> = db
            .find_activities_by_title(&enhancement.title)
            .await?
            .into_iter()
            .filter(|a| a.age_range == enhancement.age_range)
            .collect();
        if matches.is_empty() {
            report.not_found.push(enhancement.title);
            continue;
        }
        for mut activity in matches {
            activity.detailed_info = Some(enhancement.detailed_info.clone());
            db.put_activity(&activity).await?;
            report.enhanced += 1;
        }
        tracing::info!(
            title = %enhancement.title,
            age_range = %enhancement.age_range,
            "Enhanced activity"
        );
    }

    tracing::info!(
        removed = report.removed,
        renamed = report.renamed,
        enhanced = report.enhanced,
        not_found = report.not_found.len(),
        "Curation plan applied"
    );

    Ok(report)
}
