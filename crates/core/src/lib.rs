pub mod backend;
pub mod domain;
pub mod engine;
pub mod error;
pub mod export;
pub mod state;

pub mod config {
    use anyhow::{bail, Context};

    const DEFAULT_API_BASE_URL: &str = "https://api.domainintel.com/v1";
    const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_HTTP_RETRIES: u32 = 3;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BackendKind {
        Mock,
        Http,
    }

    impl std::str::FromStr for BackendKind {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> anyhow::Result<Self> {
            match s.trim().to_ascii_lowercase().as_str() {
                "" | "mock" => Ok(Self::Mock),
                "http" => Ok(Self::Http),
                other => bail!("unknown DOMAININTEL_BACKEND: {other} (expected mock or http)"),
            }
        }
    }

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub backend: BackendKind,
        pub api_base_url: String,
        pub api_token: Option<String>,
        pub http_timeout_secs: u64,
        pub http_retries: u32,
        pub latency_ms: Option<u64>,
        pub seed: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                backend: BackendKind::Mock,
                api_base_url: DEFAULT_API_BASE_URL.to_string(),
                api_token: None,
                http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
                http_retries: DEFAULT_HTTP_RETRIES,
                latency_ms: None,
                seed: None,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let backend = match std::env::var("DOMAININTEL_BACKEND") {
                Ok(s) => s.parse()?,
                Err(_) => BackendKind::Mock,
            };

            Ok(Self {
                backend,
                api_base_url: std::env::var("DOMAININTEL_API_BASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
                api_token: std::env::var("DOMAININTEL_API_TOKEN").ok(),
                http_timeout_secs: parse_env("DOMAININTEL_HTTP_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
                http_retries: parse_env("DOMAININTEL_HTTP_RETRIES")?
                    .unwrap_or(DEFAULT_HTTP_RETRIES),
                latency_ms: parse_env("DOMAININTEL_LATENCY_MS")?,
                seed: parse_env("DOMAININTEL_SEED")?,
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_api_token(&self) -> anyhow::Result<&str> {
            self.api_token
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .context("DOMAININTEL_API_TOKEN is required for the http backend")
        }
    }

    fn parse_env<T>(key: &str) -> anyhow::Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match std::env::var(key) {
            Ok(s) if !s.trim().is_empty() => s
                .trim()
                .parse::<T>()
                .map(Some)
                .with_context(|| format!("{key} is not a valid number: {s}")),
            _ => Ok(None),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn backend_kind_parses_known_values() {
            assert_eq!("mock".parse::<BackendKind>().unwrap(), BackendKind::Mock);
            assert_eq!("HTTP".parse::<BackendKind>().unwrap(), BackendKind::Http);
            assert_eq!("".parse::<BackendKind>().unwrap(), BackendKind::Mock);
            assert!("grpc".parse::<BackendKind>().is_err());
        }

        #[test]
        fn api_token_is_required_when_blank() {
            let settings = Settings {
                api_token: Some("  ".to_string()),
                ..Settings::default()
            };
            assert!(settings.require_api_token().is_err());

            let settings = Settings {
                api_token: Some("secret".to_string()),
                ..Settings::default()
            };
            assert_eq!(settings.require_api_token().unwrap(), "secret");
        }
    }
}
