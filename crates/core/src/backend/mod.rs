pub mod http;
pub mod mock;

use crate::config::{BackendKind, Settings};
use crate::domain::records::{
    LandingPageMockup, PlaybookResult, ProspectRecord, SuggestionFilters, SuggestionItem,
    ValuationResult,
};
use crate::error::EngineResult;
use std::sync::Arc;

pub use http::HttpBackend;
pub use mock::{Latency, MockBackend};

/// The five domain-intelligence operations, each resolving once.
#[async_trait::async_trait]
pub trait IntelBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn value_domain(&self, domain: &str) -> EngineResult<ValuationResult>;

    async fn generate_suggestions(
        &self,
        keywords: &str,
        filters: &SuggestionFilters,
    ) -> EngineResult<Vec<SuggestionItem>>;

    async fn generate_playbook(&self, domain: &str) -> EngineResult<PlaybookResult>;

    async fn generate_prospects(&self, domain: &str) -> EngineResult<Vec<ProspectRecord>>;

    async fn generate_landing_page_mockups(
        &self,
        domain: &str,
        industry: &str,
    ) -> EngineResult<Vec<LandingPageMockup>>;
}

pub fn from_settings(settings: &Settings) -> anyhow::Result<Arc<dyn IntelBackend>> {
    let backend: Arc<dyn IntelBackend> = match settings.backend {
        BackendKind::Mock => Arc::new(MockBackend::from_settings(settings)),
        BackendKind::Http => Arc::new(HttpBackend::from_settings(settings)?),
    };
    tracing::info!(backend = backend.name(), "domain intelligence backend ready");
    Ok(backend)
}
