use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod bot;
mod config;
mod db;
mod error;
mod live_scores;
mod summary;
mod twitter;
mod web;

use bot::{Orchestrator, Scheduler};
use config::Config;
use db::{CredentialStore, Database};
use live_scores::ApiNba;
use summary::OpenAiSummary;
use twitter::{DryRunPoster, OAuthConfig, Poster, TwitterOAuth, TwitterPoster};
use web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    if config.dry_run {
        info!("🟡 DRY RUN mode – tweets are logged, not posted");
    } else {
        info!("🔴 LIVE mode – tweets WILL be posted");
    }

    // Open database
    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open database {}", config.database_path))?;
    info!("Database opened: {}", config.database_path);
    let store: Arc<dyn CredentialStore> = Arc::new(db);

    let oauth = Arc::new(TwitterOAuth::new(
        OAuthConfig {
            client_id: config.twitter_client_id.clone().unwrap_or_default(),
            client_secret: config.twitter_client_secret.clone(),
            callback_url: config.twitter_callback_url.clone(),
            authorize_url: config.twitter_authorize_url.clone(),
            api_url: config.twitter_api_url.clone(),
        },
        store.clone(),
    )?);

    let stats = Arc::new(ApiNba::new(
        &config.nba_api_key,
        &config.nba_api_host,
        &config.nba_api_url,
    )?);
    let summaries = Arc::new(OpenAiSummary::new(
        &config.openai_api_url,
        &config.openai_api_key,
        &config.openai_model,
        config.summary_max_tokens,
    )?);
    let poster: Arc<dyn Poster> = if config.dry_run {
        Arc::new(DryRunPoster::default())
    } else {
        Arc::new(TwitterPoster::new(&config.twitter_api_url, store.clone())?)
    };

    let orchestrator = Orchestrator::new(stats, poster, summaries);
    let refresher = (config.refresh_before_run && !config.dry_run).then(|| oauth.clone());
    let scheduler = Scheduler::new(
        orchestrator,
        refresher,
        Duration::from_secs(config.poll_interval_secs),
    );
    scheduler.spawn();

    // OAuth handshake endpoints
    let app = web::router(AppState { oauth });
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("OAuth endpoints listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run HTTP server (blocks until shutdown)
    axum::serve(listener, app).await?;

    Ok(())
}
