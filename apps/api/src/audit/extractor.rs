//! Fact extraction — pluggable, trait-based seam in front of the model.
//!
//! Default: `GeminiFactExtractor`. `AppState` holds an `Arc<dyn FactExtractor>`
//! so handlers never depend on a specific backend.

use async_trait::async_trait;
use tracing::info;

use crate::audit::models::ForensicExtraction;
use crate::audit::prompts::{audit_response_schema, audit_system_instruction, AUDIT_USER_PROMPT};
use crate::audit::upload::ResumeUpload;
use crate::errors::AppError;
use crate::llm_client::{GenerationOptions, InlineFile, LlmClient};

#[async_trait]
pub trait FactExtractor: Send + Sync {
    async fn extract(&self, upload: &ResumeUpload) -> Result<ForensicExtraction, AppError>;
}

/// Extracts forensic facts with a single Gemini call at temperature 0.
pub struct GeminiFactExtractor {
    llm: LlmClient,
    system: String,
    options: GenerationOptions,
}

impl GeminiFactExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system: audit_system_instruction(),
            options: GenerationOptions {
                temperature: 0.0,
                response_schema: Some(audit_response_schema()),
            },
        }
    }
}

#[async_trait]
impl FactExtractor for GeminiFactExtractor {
    async fn extract(&self, upload: &ResumeUpload) -> Result<ForensicExtraction, AppError> {
        info!(
            file_name = %upload.file_name,
            mime_type = upload.mime_type,
            bytes = upload.data.len(),
            "Requesting forensic extraction"
        );

        let file = InlineFile {
            mime_type: upload.mime_type,
            data: &upload.data,
        };
        let extraction: ForensicExtraction = self
            .llm
            .call_json(&self.system, AUDIT_USER_PROMPT, Some(file), &self.options)
            .await
            .map_err(|e| AppError::Extraction(format!("Failed to extract resume facts: {e}")))?;

        extraction.raw_metrics.validate().map_err(|e| {
            AppError::Extraction(format!("Extractor returned inconsistent metrics: {e}"))
        })?;

        Ok(extraction)
    }
}
