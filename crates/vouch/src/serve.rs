// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vouch serve` and `vouch normalize` command implementations.
//!
//! `serve` opens SQLite storage, wires the services to the gateway, and runs
//! until SIGINT/SIGTERM. Admin sessions are swept periodically in the
//! background.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vouch_auth::LocalAuthProvider;
use vouch_config::VouchConfig;
use vouch_core::{AuthProvider, PluginAdapter, StorageAdapter, VouchError};
use vouch_gateway::{GatewayState, HealthState, ServerConfig, start_server};
use vouch_service::{ContactService, PublicReadSurface, TagCatalog, TestimonialService};
use vouch_storage::SqliteStorage;

use crate::shutdown;

/// How often expired admin sessions are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

pub async fn run_serve(config: VouchConfig) -> Result<(), VouchError> {
    init_tracing(&config.site.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "starting vouch serve");

    let storage = Arc::new(SqliteStorage::open(config.storage.clone()).await?);
    info!(path = %config.storage.database_path, "storage initialized");

    let auth = Arc::new(LocalAuthProvider::from_config(&config.auth));
    if config.auth.admins.is_empty() {
        warn!("no [[auth.admins]] configured; the admin console is unreachable");
    }
    let notifier = vouch_notify::notifier_from_config(&config)?;

    let state = GatewayState {
        testimonials: TestimonialService::new(storage.clone()),
        public: PublicReadSurface::new(storage.clone(), config.testimonials.page_size),
        contacts: ContactService::new(storage.clone(), notifier),
        auth: auth.clone(),
        catalog: Arc::new(TagCatalog::from_config(&config.testimonials)),
        health: HealthState::new(vec![
            storage.clone() as Arc<dyn PluginAdapter>,
            auth.clone() as Arc<dyn PluginAdapter>,
        ]),
    };

    let cancel = shutdown::install_signal_handler();
    let sweeper = tokio::spawn(sweep_sessions(auth.clone(), cancel.clone()));
    let events = tokio::spawn(log_session_events(auth.clone(), cancel.clone()));

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    let served = start_server(&server_config, state, cancel.clone()).await;

    // A bind failure returns before any signal; stop the background tasks too.
    cancel.cancel();
    let _ = sweeper.await;
    let _ = events.await;

    if let Err(e) = storage.shutdown().await {
        warn!(error = %e, "storage shutdown failed");
    }
    served?;

    info!("vouch serve shutdown complete");
    Ok(())
}

/// Open storage, renumber positions, and report how many rows changed.
pub async fn run_normalize(config: VouchConfig) -> Result<(), VouchError> {
    init_tracing(&config.site.log_level);

    let storage = Arc::new(SqliteStorage::open(config.storage.clone()).await?);
    let service = TestimonialService::new(storage.clone());
    let writes = service.normalize().await?;
    storage.close().await?;

    println!("vouch: normalized testimonial positions ({writes} rows updated)");
    Ok(())
}

async fn sweep_sessions(auth: Arc<LocalAuthProvider>, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let purged = auth.purge_expired();
                if purged > 0 {
                    debug!(purged, "expired admin sessions swept");
                }
            }
            _ = cancel.cancelled() => {
                debug!("session sweeper shutting down");
                break;
            }
        }
    }
}

async fn log_session_events(auth: Arc<LocalAuthProvider>, cancel: CancellationToken) {
    let mut events = auth.subscribe();
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => debug!(?event, "session event"),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "session event log lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
            _ = cancel.cancelled() => break,
        }
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the config level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vouch={log_level},warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}
