// Resume audit prompt templates.
// All prompts and the response schema for the audit module are defined here.

use serde_json::{json, Value};

use crate::llm_client::prompts::{FACTS_ONLY_INSTRUCTION, JSON_ONLY_SYSTEM};

pub const AUDIT_USER_PROMPT: &str =
    "Analyze this resume and extract forensic metrics. Be cynical and precise.";

const AUDIT_SYSTEM_HEADER: &str = "You are \"Prophet V2.0\", a forensic resume auditor.";

const AUDIT_OUTPUT_SCHEMA: &str = r#"Output Schema:
{
  "meta_data": { "candidate_name": string, "detected_language": string, "inferred_target_role": string, "years_experience": number },
  "raw_metrics": {
    "has_columns_tables": boolean,
    "has_photo": boolean,
    "has_graphic_icons": boolean,
    "has_creative_headers": boolean,
    "date_format_issues": boolean,
    "total_bullet_points": integer,
    "bullets_with_numbers": integer,
    "weak_verbs_count": integer,
    "word_count": integer
  },
  "summary_verdict": { "headline": string, "executive_summary": string },
  "structural_audit": { "issues_found": string[], "is_parsable": boolean },
  "keyword_analysis": { "hard_skills_found": string[], "missing_critical_skills": string[], "buzzwords_to_remove": string[] },
  "action_plan": string[]
}

RULES:
1. bullets_with_numbers counts bullets containing at least one number, percentage, or currency amount; it can never exceed total_bullet_points.
2. weak_verbs_count counts usages of weak verbs such as "helped", "worked on", "responsible for", "assisted".
3. missing_critical_skills lists skills expected for the inferred target role that the resume never mentions.
4. action_plan lists concrete fixes, most important first."#;

/// Builds the system instruction sent with every audit call.
pub fn audit_system_instruction() -> String {
    format!("{AUDIT_SYSTEM_HEADER}\n{FACTS_ONLY_INSTRUCTION}\n{JSON_ONLY_SYSTEM}\n\n{AUDIT_OUTPUT_SCHEMA}")
}

/// Response schema handed to the model so counts come back as integers.
pub fn audit_response_schema() -> Value {
    let string_list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "meta_data": {
                "type": "OBJECT",
                "properties": {
                    "candidate_name": { "type": "STRING" },
                    "detected_language": { "type": "STRING" },
                    "inferred_target_role": { "type": "STRING" },
                    "years_experience": { "type": "NUMBER" }
                },
                "required": ["candidate_name", "detected_language", "inferred_target_role", "years_experience"]
            },
            "raw_metrics": {
                "type": "OBJECT",
                "properties": {
                    "has_columns_tables": { "type": "BOOLEAN" },
                    "has_photo": { "type": "BOOLEAN" },
                    "has_graphic_icons": { "type": "BOOLEAN" },
                    "has_creative_headers": { "type": "BOOLEAN" },
                    "date_format_issues": { "type": "BOOLEAN" },
                    "total_bullet_points": { "type": "INTEGER" },
                    "bullets_with_numbers": { "type": "INTEGER" },
                    "weak_verbs_count": { "type": "INTEGER" },
                    "word_count": { "type": "INTEGER" }
                },
                "required": [
                    "has_columns_tables", "has_photo", "has_graphic_icons", "has_creative_headers",
                    "date_format_issues", "total_bullet_points", "bullets_with_numbers",
                    "weak_verbs_count", "word_count"
                ]
            },
            "summary_verdict": {
                "type": "OBJECT",
                "properties": {
                    "headline": { "type": "STRING" },
                    "executive_summary": { "type": "STRING" }
                },
                "required": ["headline", "executive_summary"]
            },
            "structural_audit": {
                "type": "OBJECT",
                "properties": {
                    "issues_found": string_list,
                    "is_parsable": { "type": "BOOLEAN" }
                },
                "required": ["issues_found", "is_parsable"]
            },
            "keyword_analysis": {
                "type": "OBJECT",
                "properties": {
                    "hard_skills_found": string_list,
                    "missing_critical_skills": string_list,
                    "buzzwords_to_remove": string_list
                },
                "required": ["hard_skills_found", "missing_critical_skills", "buzzwords_to_remove"]
            },
            "action_plan": string_list
        },
        "required": [
            "meta_data", "raw_metrics", "summary_verdict", "structural_audit",
            "keyword_analysis", "action_plan"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_instruction_forbids_scoring() {
        let system = audit_system_instruction();
        assert!(system.contains("Do NOT calculate any scores"));
        assert!(system.contains("\"raw_metrics\""));
    }

    #[test]
    fn test_schema_requires_every_metric() {
        let schema = audit_response_schema();
        let required = schema["properties"]["raw_metrics"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 9);
        assert_eq!(
            schema["properties"]["raw_metrics"]["properties"]["word_count"]["type"],
            "INTEGER"
        );
    }
}
