// Shared prompt fragments.
// Each service that needs model calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments only.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Fragment that forbids the model from doing our arithmetic.
pub const FACTS_ONLY_INSTRUCTION: &str = "\
    Your task is to extract RAW FACTS only. Do NOT calculate any scores yourself. \
    Count exactly what is on the page; never estimate, round, or infer.";
