use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::audit::scoring::{Deduction, ScoreResult};

/// Structural and content facts the extractor reports for one resume.
/// Every field is required: a reply missing any of them is rejected before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawForensicMetrics {
    pub has_columns_tables: bool,
    pub has_photo: bool,
    pub has_graphic_icons: bool,
    pub has_creative_headers: bool,
    pub date_format_issues: bool,
    pub total_bullet_points: u32,
    pub bullets_with_numbers: u32,
    pub weak_verbs_count: u32,
    pub word_count: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("bullets_with_numbers ({with_numbers}) exceeds total_bullet_points ({total})")]
    BulletsWithNumbersExceedTotal { with_numbers: u32, total: u32 },
}

impl RawForensicMetrics {
    /// Checks the cross-field invariants serde cannot express.
    pub fn validate(&self) -> Result<(), MetricsError> {
        if self.bullets_with_numbers > self.total_bullet_points {
            return Err(MetricsError::BulletsWithNumbersExceedTotal {
                with_numbers: self.bullets_with_numbers,
                total: self.total_bullet_points,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaData {
    pub candidate_name: String,
    pub detected_language: String,
    pub inferred_target_role: String,
    pub years_experience: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryVerdict {
    pub headline: String,
    pub executive_summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralAudit {
    pub issues_found: Vec<String>,
    pub is_parsable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub hard_skills_found: Vec<String>,
    pub missing_critical_skills: Vec<String>,
    pub buzzwords_to_remove: Vec<String>,
}

/// Everything the extractor returns for a resume. Scores are deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForensicExtraction {
    pub meta_data: MetaData,
    pub raw_metrics: RawForensicMetrics,
    pub summary_verdict: SummaryVerdict,
    pub structural_audit: StructuralAudit,
    pub keyword_analysis: KeywordAnalysis,
    pub action_plan: Vec<String>,
}

/// Scores as rendered to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub overall_score: u32,
    pub ats_compatibility: u32,
    pub content_impact: u32,
}

impl From<ScoreResult> for Scores {
    fn from(result: ScoreResult) -> Self {
        Self {
            overall_score: result.overall,
            ats_compatibility: result.ats_score,
            content_impact: result.impact_score,
        }
    }
}

/// Full audit report returned by `POST /api/v1/audits`.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub audit_id: Uuid,
    pub audited_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extraction: ForensicExtraction,
    pub scores: Scores,
    pub deductions: Vec<Deduction>,
}
