use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domainintel_core::backend::{self, IntelBackend, MockBackend};
use domainintel_core::config::{BackendKind, Settings};
use domainintel_core::domain::format::format_usd;
use domainintel_core::domain::records::SuggestionFilters;
use domainintel_core::domain::validation::is_valid_domain;
use domainintel_core::export;
use domainintel_core::state::{CancelToken, DomainStore};

#[derive(Debug, Parser)]
#[command(name = "domainintel", about = "Domain valuation and sales tooling")]
struct Args {
    /// Seed the mock engine for reproducible output.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Skip the simulated latency of the mock engine.
    #[arg(long, global = true)]
    instant: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate the market value of a domain.
    Value { domain: String },

    /// Suggest domains built from keyword pairs.
    Suggest {
        #[arg(required = true)]
        keywords: Vec<String>,
        #[arg(long)]
        tld: Option<String>,
        #[arg(long)]
        max_length: Option<usize>,
        #[arg(long)]
        min_value: Option<i64>,
    },

    /// Generate a sales playbook for a domain.
    Playbook { domain: String },

    /// Find prospective buyers for a domain.
    Prospects {
        domain: String,
        /// Print CSV instead of JSON.
        #[arg(long)]
        csv: bool,
    },

    /// Describe landing-page mockups for a domain and industry.
    Mockups { domain: String, industry: String },
}

impl Command {
    fn domain(&self) -> Option<&str> {
        match self {
            Command::Value { domain }
            | Command::Playbook { domain }
            | Command::Prospects { domain, .. }
            | Command::Mockups { domain, .. } => Some(domain),
            Command::Suggest { .. } => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Some(domain) = args.command.domain() {
        anyhow::ensure!(is_valid_domain(domain), "not a valid domain name: {domain}");
    }

    let backend = build_backend(&settings, &args)?;
    let store = DomainStore::new(backend);

    let cancel = CancelToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    if let Err(err) = run(&store, args.command, &cancel).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "command failed");
        return Err(err);
    }
    Ok(())
}

fn build_backend(settings: &Settings, args: &Args) -> anyhow::Result<Arc<dyn IntelBackend>> {
    if settings.backend == BackendKind::Http {
        return backend::from_settings(settings);
    }

    let mut settings = settings.clone();
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if args.instant {
        settings.latency_ms = Some(0);
    }
    let mock = MockBackend::from_settings(&settings);
    Ok(Arc::new(mock))
}

async fn run(store: &DomainStore, command: Command, cancel: &CancelToken) -> anyhow::Result<()> {
    match command {
        Command::Value { domain } => {
            let v = store.value_domain(&domain, cancel).await?;
            tracing::info!(
                %domain,
                estimated = %format_usd(v.estimated_value),
                "valuation complete"
            );
            print_json(&v)
        }
        Command::Suggest {
            keywords,
            tld,
            max_length,
            min_value,
        } => {
            let filters = SuggestionFilters {
                tld,
                max_length,
                min_value,
            };
            let items = store
                .generate_suggestions(&keywords.join(" "), &filters, cancel)
                .await?;
            print_json(&items)
        }
        Command::Playbook { domain } => {
            let playbook = store.generate_playbook(&domain, cancel).await?;
            print_json(&playbook)
        }
        Command::Prospects { domain, csv } => {
            let prospects = store.generate_prospects(&domain, cancel).await?;
            if csv {
                println!("{}", export::prospects_csv(&prospects));
                Ok(())
            } else {
                print_json(&prospects)
            }
        }
        Command::Mockups { domain, industry } => {
            let mockups = store
                .generate_landing_page_mockups(&domain, &industry, cancel)
                .await?;
            print_json(&mockups)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{out}");
    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suggest_with_filters() {
        let args = Args::parse_from([
            "domainintel",
            "--seed",
            "3",
            "suggest",
            "alpha",
            "beta",
            "--tld",
            "com",
            "--max-length",
            "12",
        ]);
        assert_eq!(args.seed, Some(3));
        match args.command {
            Command::Suggest {
                keywords,
                tld,
                max_length,
                min_value,
            } => {
                assert_eq!(keywords, vec!["alpha", "beta"]);
                assert_eq!(tld.as_deref(), Some("com"));
                assert_eq!(max_length, Some(12));
                assert_eq!(min_value, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn domain_is_exposed_for_validation() {
        let args = Args::parse_from(["domainintel", "prospects", "example.com", "--csv"]);
        assert_eq!(args.command.domain(), Some("example.com"));

        let args = Args::parse_from(["domainintel", "suggest", "a", "b"]);
        assert_eq!(args.command.domain(), None);
    }

    #[tokio::test]
    async fn seeded_instant_backend_is_reproducible() {
        let args = Args::parse_from(["domainintel", "--seed", "5", "--instant", "playbook", "example.com"]);
        let settings = Settings::default();

        let a = DomainStore::new(build_backend(&settings, &args).unwrap());
        let b = DomainStore::new(build_backend(&settings, &args).unwrap());
        let cancel = CancelToken::new();
        assert_eq!(
            a.generate_playbook("example.com", &cancel).await.unwrap(),
            b.generate_playbook("example.com", &cancel).await.unwrap()
        );
    }
}
