// Resume audit: upload handling, fact extraction and deterministic scoring.
// All model calls go through llm_client; scoring never touches the network.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod scoring;
pub mod upload;
