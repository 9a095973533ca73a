use crate::backend::IntelBackend;
use crate::config::Settings;
use crate::domain::contract::{
    validate_and_into_prospects, RemotePlaybook, RemoteProspect, RemoteSuggestion, RemoteValuation,
};
use crate::domain::records::{
    LandingPageMockup, PlaybookResult, ProspectRecord, SuggestionFilters, SuggestionItem,
    ValuationResult,
};
use crate::engine;
use crate::error::{EngineError, EngineResult};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF_DOUBLINGS: u32 = 6;

/// Client for the hosted domain-intelligence API.
///
/// Landing-page mockups have no remote endpoint and are rendered locally.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    token: String,
    retries: u32,
    backoff: Duration,
}

enum Failure {
    Retryable(String),
    Fatal(EngineError),
}

impl HttpBackend {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let token = settings.require_api_token()?.to_string();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .build()
            .context("failed to build domain intelligence http client")?;

        Ok(Self {
            http,
            base_url: settings.api_base_url.clone(),
            token,
            retries: settings.http_retries.max(1),
            backoff: DEFAULT_BACKOFF,
        })
    }

    /// Base delay between attempts; doubles after each failure.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn headers(&self) -> EngineResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| EngineError::unavailable("api token is not a valid header value"))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, Failure> {
        let res = request
            .send()
            .await
            .map_err(|e| Failure::Retryable(format!("request failed: {e}")))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| Failure::Retryable(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let message = error_message(status, &text);
            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    Failure::Fatal(EngineError::InvalidInput(message))
                }
                s if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => {
                    Failure::Retryable(message)
                }
                _ => Failure::Fatal(EngineError::ServiceUnavailable(message)),
            });
        }

        serde_json::from_str::<T>(&text).map_err(|e| {
            Failure::Fatal(EngineError::unavailable(format!(
                "unexpected response shape: {e}"
            )))
        })
    }

    async fn call<T, F>(&self, op: &'static str, build: F) -> EngineResult<T>
    where
        T: DeserializeOwned,
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder + Send + Sync,
    {
        let headers = self.headers()?;
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let request = build(&self.http).headers(headers.clone());
            match self.send_once::<T>(request).await {
                Ok(parsed) => return Ok(parsed),
                Err(Failure::Fatal(err)) => {
                    tracing::error!(op, error = %err, "domain intelligence call failed");
                    return Err(err);
                }
                Err(Failure::Retryable(detail)) => {
                    if attempt >= self.retries {
                        tracing::error!(op, attempt, error = %detail, "domain intelligence call failed; giving up");
                        return Err(EngineError::ServiceUnavailable(detail));
                    }
                    let backoff = backoff_for(self.backoff, attempt);
                    tracing::warn!(op, attempt, ?backoff, error = %detail, "domain intelligence call failed; retrying");
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

fn backoff_for(base: Duration, attempt: u32) -> Duration {
    let doublings = attempt.saturating_sub(1).min(MAX_BACKOFF_DOUBLINGS);
    base.saturating_mul(1u32 << doublings)
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            format!(
                "Error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )
            .trim_end()
            .to_string()
        })
}

fn invalid_response(err: anyhow::Error) -> EngineError {
    EngineError::unavailable(format!("invalid response: {err:#}"))
}

#[async_trait::async_trait]
impl IntelBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn value_domain(&self, domain: &str) -> EngineResult<ValuationResult> {
        let url = self.url("/domains/valuation");
        let body = json!({ "domain": domain });
        let remote: RemoteValuation = self
            .call("value_domain", |http| http.post(&url).json(&body))
            .await?;
        remote
            .validate_and_into_valuation(domain, chrono::Utc::now())
            .map_err(invalid_response)
    }

    async fn generate_suggestions(
        &self,
        keywords: &str,
        filters: &SuggestionFilters,
    ) -> EngineResult<Vec<SuggestionItem>> {
        let url = self.url("/domains/suggestions");
        let mut body = json!({ "keywords": keywords });
        if let Some(tld) = filters.tld() {
            body["tld"] = json!(tld);
        }
        if let Some(max_length) = filters.max_length {
            body["maxLength"] = json!(max_length);
        }
        if let Some(min_value) = filters.min_value {
            body["minValue"] = json!(min_value);
        }

        let remote: Vec<RemoteSuggestion> = self
            .call("generate_suggestions", |http| http.post(&url).json(&body))
            .await?;
        let items = remote
            .into_iter()
            .map(RemoteSuggestion::validate_and_into_item)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(invalid_response)?;

        // The service may ignore filters it does not support.
        Ok(filters.apply(items))
    }

    async fn generate_playbook(&self, domain: &str) -> EngineResult<PlaybookResult> {
        let url = self.url("/playbooks");
        let body = json!({ "domain": domain });
        let remote: RemotePlaybook = self
            .call("generate_playbook", |http| http.post(&url).json(&body))
            .await?;
        remote
            .validate_and_into_playbook(domain)
            .map_err(invalid_response)
    }

    async fn generate_prospects(&self, domain: &str) -> EngineResult<Vec<ProspectRecord>> {
        let url = self.url("/prospects");
        let remote: Vec<RemoteProspect> = self
            .call("generate_prospects", |http| {
                http.get(&url).query(&[("domain", domain)])
            })
            .await?;
        validate_and_into_prospects(remote).map_err(invalid_response)
    }

    async fn generate_landing_page_mockups(
        &self,
        domain: &str,
        industry: &str,
    ) -> EngineResult<Vec<LandingPageMockup>> {
        Ok(engine::generate_landing_page_mockups(domain, industry))
    }
}
