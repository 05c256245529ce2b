/*
 * Responsibility
 * - Config 読み込み → 依存生成 → Router 組み立て
 * - tracing / panic hook の初期化
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::error::AppError;
use crate::middleware::http::{self as http_middleware, HttpLimits};
use crate::repos::{MemoryDb, user_repo};
use crate::services::auth::build_auth_service;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,posts_api=debug,tower_http=debug cargo run
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
        // Surface panics through tracing; stderr may not be captured.
        tracing::error!(?info, "panic");

        // Development: crash the whole process. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    // A missing or empty API_SECRET stops the process here.
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {} (token query gate: {})",
        config.app_env,
        config.addr,
        config.extraction.require_query_gate
    );

    let state = build_state(&config).await?;
    let app = build_router(state, HttpLimits::from_config(&config));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub async fn build_state(config: &Config) -> Result<AppState> {
    // Process-level services are built once and shared through the state.
    let db = Arc::new(MemoryDb::new());

    for seed in &config.seed_users {
        let user = user_repo::create(&db, &seed.email, &seed.password)
            .await
            .with_context(|| format!("failed to seed user {}", seed.email))?;
        tracing::info!(user_id = user.user_id, email = %user.email, "seeded user");
    }

    Ok(AppState::new(build_auth_service(config), db))
}

pub fn build_router(state: AppState, limits: HttpLimits) -> Router {
    async fn health() -> &'static str {
        "ok"
    }

    async fn not_found() -> AppError {
        AppError::not_found("route")
    }

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes(state.clone()))
        .fallback(not_found)
        .with_state(state);

    http_middleware::apply(router, limits)
}
