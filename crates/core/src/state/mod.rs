//! Session-scoped container for the latest domain-intelligence results.

mod cancel;

pub use cancel::CancelToken;

use crate::backend::IntelBackend;
use crate::domain::records::{
    DomainEntry, LandingPageMockup, PlaybookResult, ProspectRecord, SuggestionFilters,
    SuggestionItem, ValuationResult,
};
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Point-in-time copy of everything the container holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    pub domains: Vec<DomainEntry>,
    pub current_domain: Option<String>,
    pub valuation_results: Option<ValuationResult>,
    pub suggestions: Vec<SuggestionItem>,
    pub playbook: Option<PlaybookResult>,
    pub prospects: Vec<ProspectRecord>,
    pub landing_page_mockups: Vec<LandingPageMockup>,
}

/// Owns one [`ApplicationState`] and is its only writer.
///
/// Each trigger awaits the backend and, on success, replaces the fields it
/// owns in one write. Failed or cancelled calls leave the state as it was.
/// Calls are not serialized: when two triggers for the same field overlap,
/// whichever resolves last wins.
pub struct DomainStore {
    backend: Arc<dyn IntelBackend>,
    state: RwLock<ApplicationState>,
}

impl DomainStore {
    pub fn new(backend: Arc<dyn IntelBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(ApplicationState::default()),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn snapshot(&self) -> ApplicationState {
        self.state.read().await.clone()
    }

    /// Appends to the tracked domains. No validation or deduplication.
    pub async fn add_domain(&self, name: impl Into<String>, value: i64) -> DomainEntry {
        let entry = DomainEntry {
            name: name.into(),
            value,
            added_date: chrono::Utc::now(),
        };
        self.state.write().await.domains.push(entry.clone());
        tracing::debug!(domain = %entry.name, value, "tracked domain added");
        entry
    }

    pub async fn set_current_domain(&self, domain: Option<String>) {
        self.state.write().await.current_domain = domain;
    }

    pub async fn value_domain(
        &self,
        domain: &str,
        cancel: &CancelToken,
    ) -> EngineResult<ValuationResult> {
        let result = run("value_domain", cancel, self.backend.value_domain(domain)).await?;

        let mut state = self.state.write().await;
        state.valuation_results = Some(result.clone());
        state.current_domain = Some(domain.to_string());
        tracing::debug!(%domain, estimated_value = result.estimated_value, "valuation replaced");
        Ok(result)
    }

    pub async fn generate_suggestions(
        &self,
        keywords: &str,
        filters: &SuggestionFilters,
        cancel: &CancelToken,
    ) -> EngineResult<Vec<SuggestionItem>> {
        let items = run(
            "generate_suggestions",
            cancel,
            self.backend.generate_suggestions(keywords, filters),
        )
        .await?;

        self.state.write().await.suggestions = items.clone();
        tracing::debug!(%keywords, count = items.len(), "suggestions replaced");
        Ok(items)
    }

    pub async fn generate_playbook(
        &self,
        domain: &str,
        cancel: &CancelToken,
    ) -> EngineResult<PlaybookResult> {
        let playbook = run(
            "generate_playbook",
            cancel,
            self.backend.generate_playbook(domain),
        )
        .await?;

        self.state.write().await.playbook = Some(playbook.clone());
        tracing::debug!(%domain, industries = ?playbook.target_industries, "playbook replaced");
        Ok(playbook)
    }

    pub async fn generate_prospects(
        &self,
        domain: &str,
        cancel: &CancelToken,
    ) -> EngineResult<Vec<ProspectRecord>> {
        let prospects = run(
            "generate_prospects",
            cancel,
            self.backend.generate_prospects(domain),
        )
        .await?;

        self.state.write().await.prospects = prospects.clone();
        tracing::debug!(%domain, count = prospects.len(), "prospects replaced");
        Ok(prospects)
    }

    pub async fn generate_landing_page_mockups(
        &self,
        domain: &str,
        industry: &str,
        cancel: &CancelToken,
    ) -> EngineResult<Vec<LandingPageMockup>> {
        let mockups = run(
            "generate_landing_page_mockups",
            cancel,
            self.backend.generate_landing_page_mockups(domain, industry),
        )
        .await?;

        let mut state = self.state.write().await;
        state.landing_page_mockups = mockups.clone();
        state.current_domain = Some(domain.to_string());
        tracing::debug!(%domain, %industry, "landing page mockups replaced");
        Ok(mockups)
    }
}

async fn run<T, F>(op: &'static str, cancel: &CancelToken, fut: F) -> EngineResult<T>
where
    F: Future<Output = EngineResult<T>>,
{
    if cancel.is_cancelled() {
        return Err(EngineError::Cancelled);
    }

    tracing::debug!(op, "operation started");
    let res = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(EngineError::Cancelled),
        res = fut => res,
    };

    match &res {
        Ok(_) => tracing::debug!(op, "operation finished"),
        Err(EngineError::Cancelled) => tracing::debug!(op, "operation cancelled"),
        Err(err) => tracing::error!(op, error = %err, "operation failed"),
    }
    res
}
