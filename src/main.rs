use std::sync::Arc;

use anyhow::Context;

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod services;

use auth::rate_limit::RateLimitState;
use config::Config;
use db::{JournalStore, PgJournalStore};
use services::patterns::PatternConfig;
use services::summarizer::{ClaudeSummarizer, Summarizer};

#[derive(Clone)]
pub struct AppState {
    pub journals: Arc<dyn JournalStore>,
    pub summarizer: Arc<dyn Summarizer>,
    pub config: Arc<Config>,
    pub patterns: Arc<PatternConfig>,
    pub rate_limiter: RateLimitState,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodlog_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    // Database
    let db = db::create_pool(&config)
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    if config.claude_api_key.is_empty() {
        tracing::warn!("CLAUDE_API_KEY not set; AI insights will fail");
    }
    let summarizer =
        ClaudeSummarizer::from_config(&config).context("Failed to build summarizer client")?;

    let patterns = config.pattern_config();
    tracing::info!(
        utc_offset = %patterns.utc_offset,
        anxiety_threshold = patterns.anxiety_threshold,
        keywords = patterns.lexicon.len(),
        "Pattern analysis configured"
    );

    let rate_limiter =
        RateLimitState::new(config.insight_rate_limit, config.insight_rate_window_secs);
    auth::rate_limit::spawn_cleanup_worker(rate_limiter.clone());

    let state = AppState {
        journals: Arc::new(PgJournalStore::new(db)),
        summarizer: Arc::new(summarizer),
        config: config.clone(),
        patterns: Arc::new(patterns),
        rate_limiter,
    };

    let app = routes::app(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
