use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = domainintel_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let backend = match domainintel_core::backend::from_settings(&settings) {
        Ok(backend) => backend,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "backend configuration failed");
            return Err(e);
        }
    };

    let defaults = app::SessionPolicy::default();
    let policy = app::SessionPolicy {
        idle_ttl: env_parse("DOMAININTEL_SESSION_TTL_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.idle_ttl),
        max_sessions: env_parse("DOMAININTEL_MAX_SESSIONS").unwrap_or(defaults.max_sessions),
    };

    let state = app::AppState::with_policy(backend, policy);
    let shutdown = state.shutdown_token();
    let sweeper = state.spawn_sweeper();

    let router = app::router(state).layer(TraceLayer::new_for_http());

    let port: u16 = env_parse("PORT").unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let on_signal = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown requested; cancelling in-flight operations");
            on_signal.cancel();
        })
        .await?;

    shutdown.cancel();
    sweeper.await?;
    Ok(())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn init_sentry(settings: &domainintel_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
