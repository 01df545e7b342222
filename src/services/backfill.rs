// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog backfill: ask a draft source for activities to fill the highest
//! priority coverage gaps.

use crate::db::Database;
use crate::error::AppError;
use crate::models::ActivityDraft;
use crate::services::coverage::CoverageAnalyzer;
use crate::services::generator::DraftSource;
use serde::Serialize;
use std::time::Duration;
use validator::Validate;

/// How much of the gap list a single run works through.
#[derive(Debug, Clone, Copy)]
pub struct BackfillOptions {
    /// Maximum number of gaps to request drafts for
    pub max_combinations: usize,
    /// Pause between consecutive draft requests
    pub delay: Duration,
}

/// A gap whose drafts could not be produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillFailure {
    pub combination: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillOutcome {
    /// Gaps drafts were requested for
    pub gaps_attempted: usize,
    /// IDs of inserted activities
    pub inserted: Vec<String>,
    /// Drafts rejected by validation
    pub rejected: usize,
    pub failures: Vec<BackfillFailure>,
    pub coverage_before: f64,
    pub coverage_after: f64,
}

/// Run one backfill pass.
///
/// Failures for a single gap are logged and reported; they never abort the
/// remaining gaps. Storage errors do.
pub async fn backfill_gaps<S>(
    db: &Database,
    analyzer: &CoverageAnalyzer,
    source: &S,
    options: BackfillOptions,
) -> Result<BackfillOutcome, AppError>
where
    S: DraftSource + Sync,
{
    let catalog = db.list_activities().await?;
    let report = analyzer.analyze(&catalog);
    let gaps: Vec<_> = CoverageAnalyzer::prioritize(&report)
        .into_iter()
        .take(options.max_combinations)
        .collect();

    tracing::info!(
        gaps = gaps.len(),
        coverage = report.coverage_percentage,
        "Starting catalog backfill"
    );

    let mut inserted = Vec::new();
    let mut rejected = 0;
    let mut failures = Vec::new();

    for (i, gap) in gaps.iter().enumerate() {
        if i > 0 && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }

        let combination = &gap.combination;
        let wanted = analyzer
            .low_coverage_threshold()
            .saturating_sub(combination.activity_count)
            .max(1);

        let drafts = match source.generate_drafts(combination, wanted).await {
            Ok(drafts) => drafts,
            Err(e) => {
                tracing::warn!(
                    combination = %combination.describe(),
                    error = %e,
                    "Draft generation failed for gap"
                );
                failures.push(BackfillFailure {
                    combination: combination.describe(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        for draft in drafts.into_iter().take(wanted) {
            if let Err(e) = draft.validate() {
                tracing::warn!(title = %draft.title, error = %e, "Rejected generated draft");
                rejected += 1;
                continue;
            }
            let activity = ActivityDraft::into_new_activity(draft);
            db.put_activity(&activity).await?;
            inserted.push(activity.id);
        }

        tracing::info!(
            combination = %combination.describe(),
            priority = gap.priority,
            total_inserted = inserted.len(),
            "Gap processed"
        );
    }

    let coverage_after = if inserted.is_empty() {
        report.coverage_percentage
    } else {
        analyzer
            .analyze(&db.list_activities().await?)
            .coverage_percentage
    };

    tracing::info!(
        inserted = inserted.len(),
        rejected,
        failures = failures.len(),
        coverage_before = report.coverage_percentage,
        coverage_after,
        "Catalog backfill complete"
    );

    Ok(BackfillOutcome {
        gaps_attempted: gaps.len(),
        inserted,
        rejected,
        failures,
        coverage_before: report.coverage_percentage,
        coverage_after,
    })
}
