/*
 * Responsibility
 * - Config読み込み → 依存生成 (PgPool → PgSurveyRepo) → Router 組み立て
 * - Middleware の適用 (CORS / request-id / trace / limit / timeout)
 * - axum::serve() で起動, SIGINT/SIGTERM で graceful shutdown
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware::{self, http::HttpLimits},
    repos::{pool::create_pool, survey_repo::PgSurveyRepo},
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,survey_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting survey API in {:?} mode on {} (schema: {:?})",
        config.app_env,
        config.addr,
        config.schema
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("survey API stopped");
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = create_pool(config)
        .await
        .context("failed to connect to the database")?;
    let repo = PgSurveyRepo::new(pool, config.schema, &config.answers_email_constraint);

    Ok(AppState::new(Arc::new(repo)))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes().with_state(state);
    let router = middleware::http::apply(
        router,
        HttpLimits {
            body_limit: config.request_body_limit,
            timeout: config.request_timeout,
        },
    );

    // Outermost, so preflight requests are answered before the other layers run.
    middleware::cors::apply(router, config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
