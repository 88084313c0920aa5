//! # painel-server
//!
//! HTTP front end for the Painel task tracker.
//!
//! This binary provides:
//! - **Anonymous sessions**: the landing page issues a `user_id` cookie to
//!   first-time visitors; `/view/*` routes require a known one
//! - **Project and task views** rendered as htmx fragments
//! - **Task completion toggling** via form-encoded `PUT`
//! - **Static assets** from a fixed directory, traversal-safe
//! - **Per-IP rate limiting** to keep identity issuance bounded

mod api;
mod config;
mod error;
mod rate_limit;
mod render;
mod session;
mod static_files;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use painel_shared::constants::APP_NAME;
use painel_store::{IdentityStore, Seed};

use crate::api::AppState;
use crate::config::ServerConfig;
use crate::rate_limit::RateLimiter;
use crate::static_files::StaticAssets;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,painel_server=debug,painel_store=debug")
            }),
        )
        .init();

    info!("Starting {} server v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Initialize subsystems
    // -----------------------------------------------------------------------
    let store = IdentityStore::new(Seed::default());
    let assets = StaticAssets::new(config.static_dir.clone());
    let rate_limiter = RateLimiter::new(config.rate_limit_per_sec, config.rate_limit_burst)
        .trusting_proxy_headers(config.trust_proxy_headers);

    let http_addr = config.http_addr;
    let app_state = AppState {
        store,
        assets,
        rate_limiter: rate_limiter.clone(),
        config: Arc::new(config),
    };

    // -----------------------------------------------------------------------
    // 4. Spawn background tasks
    // -----------------------------------------------------------------------

    // Forget rate limit clients idle for 10 minutes, checked every 5
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            rate_limiter.forget_idle(Duration::from_secs(600)).await;
        }
    });

    // -----------------------------------------------------------------------
    // 5. Run the HTTP server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
