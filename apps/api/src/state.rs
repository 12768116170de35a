use std::sync::Arc;

use crate::audit::extractor::FactExtractor;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable fact extractor. Default: GeminiFactExtractor.
    pub extractor: Arc<dyn FactExtractor>,
}
