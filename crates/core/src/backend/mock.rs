use crate::backend::IntelBackend;
use crate::config::Settings;
use crate::domain::records::{
    LandingPageMockup, PlaybookResult, ProspectRecord, SuggestionFilters, SuggestionItem,
    ValuationResult,
};
use crate::engine::{self, RandomSource, SeededRandom, ThreadRandom};
use crate::error::EngineResult;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Simulated round-trip time per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub valuation: Duration,
    pub suggestions: Duration,
    pub playbook: Duration,
    pub prospects: Duration,
    pub mockups: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            valuation: Duration::from_millis(1000),
            suggestions: Duration::from_millis(1500),
            playbook: Duration::from_millis(2000),
            prospects: Duration::from_millis(1800),
            mockups: Duration::from_millis(2000),
        }
    }
}

impl Latency {
    pub fn uniform(d: Duration) -> Self {
        Self {
            valuation: d,
            suggestions: d,
            playbook: d,
            prospects: d,
            mockups: d,
        }
    }

    pub fn instant() -> Self {
        Self::uniform(Duration::ZERO)
    }
}

/// Engine-backed implementation: waits out the simulated latency, then
/// computes the result from the shared random source.
pub struct MockBackend {
    rng: Mutex<Box<dyn RandomSource>>,
    latency: Latency,
}

impl MockBackend {
    pub fn new(rng: Box<dyn RandomSource>, latency: Latency) -> Self {
        Self {
            rng: Mutex::new(rng),
            latency,
        }
    }

    pub fn seeded(seed: u64, latency: Latency) -> Self {
        Self::new(Box::new(SeededRandom::new(seed)), latency)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let latency = settings
            .latency_ms
            .map(|ms| Latency::uniform(Duration::from_millis(ms)))
            .unwrap_or_default();
        let rng: Box<dyn RandomSource> = match settings.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(ThreadRandom),
        };
        Self::new(rng, latency)
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    fn rng(&self) -> MutexGuard<'_, Box<dyn RandomSource>> {
        // A panic mid-draw leaves the source usable.
        self.rng.lock().unwrap_or_else(|e| e.into_inner())
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait::async_trait]
impl IntelBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn value_domain(&self, domain: &str) -> EngineResult<ValuationResult> {
        simulate(self.latency.valuation).await;
        let mut rng = self.rng();
        engine::value_domain(rng.as_mut(), domain, chrono::Utc::now())
    }

    async fn generate_suggestions(
        &self,
        keywords: &str,
        filters: &SuggestionFilters,
    ) -> EngineResult<Vec<SuggestionItem>> {
        simulate(self.latency.suggestions).await;
        let mut rng = self.rng();
        Ok(engine::generate_suggestions(rng.as_mut(), keywords, filters))
    }

    async fn generate_playbook(&self, domain: &str) -> EngineResult<PlaybookResult> {
        simulate(self.latency.playbook).await;
        let mut rng = self.rng();
        Ok(engine::generate_playbook(rng.as_mut(), domain))
    }

    async fn generate_prospects(&self, domain: &str) -> EngineResult<Vec<ProspectRecord>> {
        simulate(self.latency.prospects).await;
        let mut rng = self.rng();
        Ok(engine::generate_prospects(rng.as_mut(), domain))
    }

    async fn generate_landing_page_mockups(
        &self,
        domain: &str,
        industry: &str,
    ) -> EngineResult<Vec<LandingPageMockup>> {
        simulate(self.latency.mockups).await;
        Ok(engine::generate_landing_page_mockups(domain, industry))
    }
}
