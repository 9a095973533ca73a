use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use domainintel_core::backend::IntelBackend;
use domainintel_core::domain::records::{
    DomainEntry, LandingPageMockup, PlaybookResult, ProspectRecord, SuggestionFilters,
    SuggestionItem, ValuationResult,
};
use domainintel_core::domain::validation::is_valid_domain;
use domainintel_core::error::EngineError;
use domainintel_core::export;
use domainintel_core::state::{ApplicationState, CancelToken, DomainStore};

/// How long sessions live and how many may exist at once.
#[derive(Debug, Clone, Copy)]
pub struct SessionPolicy {
    pub idle_ttl: Duration,
    pub max_sessions: usize,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
        }
    }
}

impl SessionPolicy {
    fn sweep_interval(&self) -> Duration {
        self.idle_ttl
            .min(Duration::from_secs(60))
            .max(Duration::from_secs(1))
    }
}

struct Session {
    store: Arc<DomainStore>,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn IntelBackend>,
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    policy: SessionPolicy,
    shutdown: CancelToken,
}

impl AppState {
    pub fn new(backend: Arc<dyn IntelBackend>) -> Self {
        Self::with_policy(backend, SessionPolicy::default())
    }

    pub fn with_policy(backend: Arc<dyn IntelBackend>, policy: SessionPolicy) -> Self {
        Self {
            backend,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            policy,
            shutdown: CancelToken::new(),
        }
    }

    /// Cancelled on shutdown; every in-flight trigger observes it.
    pub fn shutdown_token(&self) -> CancelToken {
        self.shutdown.clone()
    }

    async fn session(&self, id: Uuid) -> Result<Arc<DomainStore>, StatusCode> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
        session.last_seen = Instant::now();
        Ok(session.store.clone())
    }

    /// Drops every session idle for at least the policy TTL as of `now`.
    pub async fn evict_idle(&self, now: Instant) -> usize {
        let ttl = self.policy.idle_ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now.saturating_duration_since(s.last_seen) < ttl);
        before - sessions.len()
    }

    /// Periodically evicts idle sessions until the shutdown token fires.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(state.policy.sweep_interval());
            loop {
                tokio::select! {
                    biased;
                    _ = state.shutdown.cancelled() => break,
                    _ = tick.tick() => {
                        let evicted = state.evict_idle(Instant::now()).await;
                        if evicted > 0 {
                            tracing::info!(evicted, "idle sessions evicted");
                        }
                    }
                }
            }
            tracing::debug!("session sweeper stopped");
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", axum::routing::delete(delete_session))
        .route("/sessions/:id/state", get(get_state))
        .route("/sessions/:id/domains", post(add_domain))
        .route("/sessions/:id/current-domain", put(set_current_domain))
        .route("/sessions/:id/valuation", post(value_domain))
        .route("/sessions/:id/suggestions", post(generate_suggestions))
        .route("/sessions/:id/playbook", post(generate_playbook))
        .route("/sessions/:id/prospects", post(generate_prospects))
        .route("/sessions/:id/prospects.csv", get(export_prospects))
        .route("/sessions/:id/mockups", post(generate_mockups))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionCreated {
    session_id: Uuid,
    backend: &'static str,
}

#[derive(Debug, Deserialize)]
struct DomainRequest {
    domain: String,
}

#[derive(Debug, Deserialize)]
struct AddDomainRequest {
    name: String,
    value: i64,
}

#[derive(Debug, Deserialize)]
struct CurrentDomainRequest {
    domain: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SuggestionsRequest {
    keywords: String,
    #[serde(flatten)]
    filters: SuggestionFilters,
}

#[derive(Debug, Deserialize)]
struct MockupsRequest {
    domain: String,
    industry: String,
}

fn engine_status(err: EngineError) -> StatusCode {
    match err {
        EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        EngineError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        EngineError::ServiceUnavailable(_) => {
            sentry_anyhow::capture_anyhow(&anyhow::Error::new(err));
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

fn require_valid_domain(domain: &str) -> Result<(), StatusCode> {
    if is_valid_domain(domain) {
        Ok(())
    } else {
        tracing::debug!(%domain, "rejected malformed domain");
        Err(StatusCode::BAD_REQUEST)
    }
}

async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionCreated>), StatusCode> {
    if state.sessions.read().await.len() >= state.policy.max_sessions {
        state.evict_idle(Instant::now()).await;
    }

    let id = Uuid::new_v4();
    let store = Arc::new(DomainStore::new(state.backend.clone()));
    {
        let mut sessions = state.sessions.write().await;
        if sessions.len() >= state.policy.max_sessions {
            tracing::warn!(live = sessions.len(), "session limit reached");
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
        sessions.insert(
            id,
            Session {
                store: store.clone(),
                last_seen: Instant::now(),
            },
        );
    }
    tracing::info!(session_id = %id, backend = store.backend_name(), "session created");

    Ok((
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id: id,
            backend: store.backend_name(),
        }),
    ))
}

async fn delete_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    match state.sessions.write().await.remove(&id) {
        Some(_) => {
            tracing::info!(session_id = %id, "session discarded");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn get_state(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationState>, StatusCode> {
    let store = state.session(id).await?;
    Ok(Json(store.snapshot().await))
}

async fn add_domain(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddDomainRequest>,
) -> Result<(StatusCode, Json<DomainEntry>), StatusCode> {
    let store = state.session(id).await?;
    let entry = store.add_domain(req.name, req.value).await;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn set_current_domain(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CurrentDomainRequest>,
) -> Result<StatusCode, StatusCode> {
    let store = state.session(id).await?;
    store.set_current_domain(req.domain).await;
    Ok(StatusCode::NO_CONTENT)
}

async fn value_domain(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DomainRequest>,
) -> Result<Json<ValuationResult>, StatusCode> {
    let store = state.session(id).await?;
    require_valid_domain(&req.domain)?;
    store
        .value_domain(&req.domain, &state.shutdown)
        .await
        .map(Json)
        .map_err(engine_status)
}

async fn generate_suggestions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SuggestionsRequest>,
) -> Result<Json<Vec<SuggestionItem>>, StatusCode> {
    let store = state.session(id).await?;
    store
        .generate_suggestions(&req.keywords, &req.filters, &state.shutdown)
        .await
        .map(Json)
        .map_err(engine_status)
}

async fn generate_playbook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DomainRequest>,
) -> Result<Json<PlaybookResult>, StatusCode> {
    let store = state.session(id).await?;
    require_valid_domain(&req.domain)?;
    store
        .generate_playbook(&req.domain, &state.shutdown)
        .await
        .map(Json)
        .map_err(engine_status)
}

async fn generate_prospects(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DomainRequest>,
) -> Result<Json<Vec<ProspectRecord>>, StatusCode> {
    let store = state.session(id).await?;
    require_valid_domain(&req.domain)?;
    store
        .generate_prospects(&req.domain, &state.shutdown)
        .await
        .map(Json)
        .map_err(engine_status)
}

async fn export_prospects(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, StatusCode> {
    let store = state.session(id).await?;
    let snapshot = store.snapshot().await;
    if snapshot.prospects.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }

    let domain = snapshot.current_domain.as_deref().unwrap_or("domain");
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::prospects_file_name(domain)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export::prospects_csv(&snapshot.prospects),
    ))
}

async fn generate_mockups(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MockupsRequest>,
) -> Result<Json<Vec<LandingPageMockup>>, StatusCode> {
    let store = state.session(id).await?;
    require_valid_domain(&req.domain)?;
    store
        .generate_landing_page_mockups(&req.domain, &req.industry, &state.shutdown)
        .await
        .map(Json)
        .map_err(engine_status)
}
