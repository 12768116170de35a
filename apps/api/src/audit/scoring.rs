//! Deterministic resume scoring.
//!
//! The extractor only reports facts; every number a client sees is computed
//! here from fixed deductions, so the same metrics always yield the same scores.

use serde::{Deserialize, Serialize};

use crate::audit::models::RawForensicMetrics;

pub const ATS_WEIGHT: f64 = 0.6;
pub const IMPACT_WEIGHT: f64 = 0.4;

const COLUMNS_TABLES_PENALTY: i64 = 20;
const PHOTO_PENALTY: i64 = 15;
const GRAPHIC_ICONS_PENALTY: i64 = 10;
const CREATIVE_HEADERS_PENALTY: i64 = 10;
const DATE_FORMAT_PENALTY: i64 = 10;

/// Numbered bullets below this share of all bullets cost `LOW_METRICS_PENALTY`.
const MIN_BULLET_RATIO: f64 = 0.3;
const LOW_METRICS_PENALTY: i64 = 10;
const NO_METRICS_PENALTY: i64 = 15;
const WEAK_VERB_PENALTY: i64 = 4;
const WEAK_VERB_CAP: i64 = 20;
const MISSING_SKILL_PENALTY: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall: u32,
    pub ats_score: u32,
    pub impact_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Ats,
    Impact,
}

/// One applied penalty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub category: ScoreCategory,
    pub reason: String,
    pub points: u32,
}

/// Computes the three scores for a resume.
pub fn score(metrics: &RawForensicMetrics, missing_skills_count: usize) -> ScoreResult {
    let (ats_penalty, impact_penalty) = explain(metrics, missing_skills_count).iter().fold(
        (0_i64, 0_i64),
        |(ats, impact), d| match d.category {
            ScoreCategory::Ats => (ats.saturating_add(i64::from(d.points)), impact),
            ScoreCategory::Impact => (ats, impact.saturating_add(i64::from(d.points))),
        },
    );

    let ats = clamp_score(100 - ats_penalty);
    let impact = clamp_score(100_i64.saturating_sub(impact_penalty));
    let overall = (f64::from(ats) * ATS_WEIGHT + f64::from(impact) * IMPACT_WEIGHT).floor() as u32;

    ScoreResult {
        overall,
        ats_score: ats,
        impact_score: impact,
    }
}

/// Lists every non-zero penalty `score` applies, ATS traps first.
pub fn explain(metrics: &RawForensicMetrics, missing_skills_count: usize) -> Vec<Deduction> {
    let mut deductions = Vec::new();
    let mut push = |category, reason: String, points: i64| {
        if points > 0 {
            deductions.push(Deduction {
                category,
                reason,
                points: u32::try_from(points).unwrap_or(u32::MAX),
            });
        }
    };

    let traps = [
        (metrics.has_columns_tables, COLUMNS_TABLES_PENALTY, "Multi-column layout or tables"),
        (metrics.has_photo, PHOTO_PENALTY, "Photo embedded in resume"),
        (metrics.has_graphic_icons, GRAPHIC_ICONS_PENALTY, "Graphic icons"),
        (metrics.has_creative_headers, CREATIVE_HEADERS_PENALTY, "Non-standard section headers"),
        (metrics.date_format_issues, DATE_FORMAT_PENALTY, "Inconsistent date formats"),
    ];
    for (flagged, points, reason) in traps {
        if flagged {
            push(ScoreCategory::Ats, reason.to_string(), points);
        }
    }

    let ratio = bullet_ratio(metrics);
    if ratio < MIN_BULLET_RATIO {
        let reason = if metrics.total_bullet_points == 0 {
            "No bullet points".to_string()
        } else {
            format!(
                "Only {}/{} bullets contain numbers",
                metrics.bullets_with_numbers, metrics.total_bullet_points
            )
        };
        push(ScoreCategory::Impact, reason, LOW_METRICS_PENALTY);
    }
    // Stacks with the low-ratio penalty above.
    if ratio == 0.0 && metrics.total_bullet_points > 0 {
        push(
            ScoreCategory::Impact,
            "No bullet contains a number".to_string(),
            NO_METRICS_PENALTY,
        );
    }

    push(
        ScoreCategory::Impact,
        format!("{} weak verb usages", metrics.weak_verbs_count),
        (i64::from(metrics.weak_verbs_count) * WEAK_VERB_PENALTY).min(WEAK_VERB_CAP),
    );

    let missing = i64::try_from(missing_skills_count).unwrap_or(i64::MAX);
    push(
        ScoreCategory::Impact,
        format!("{missing_skills_count} missing critical skills"),
        missing.saturating_mul(MISSING_SKILL_PENALTY),
    );

    deductions
}

/// Share of bullets that carry a number; 0 when there are no bullets.
pub fn bullet_ratio(metrics: &RawForensicMetrics) -> f64 {
    if metrics.total_bullet_points > 0 {
        f64::from(metrics.bullets_with_numbers) / f64::from(metrics.total_bullet_points)
    } else {
        0.0
    }
}

fn clamp_score(raw: i64) -> u32 {
    raw.clamp(0, 100) as u32
}
