//! HTTP server initialization and runtime setup.
//!
//! Handles the store connection, registry construction, and the Axum server
//! lifecycle including graceful shutdown.

use crate::application::services::RedirectRegistry;
use crate::config::Config;
use crate::infrastructure::persistence::RedisRedirectRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

const STORE_RELEASE_WAIT: Duration = Duration::from_secs(1);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis connection (one per process, shared by all requests)
/// - Redirect registry
/// - Axum HTTP server
///
/// On SIGINT/SIGTERM the listener stops accepting connections, in-flight
/// requests get `shutdown_timeout_seconds` to finish, and the store
/// connection is dropped once nothing else holds it.
///
/// # Errors
///
/// Returns an error if:
/// - Redis connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = RedisRedirectRepository::connect(&config.redis_url)
        .await
        .context("Failed to connect to the redirect store")?;

    let repository = Arc::new(repository);
    let registry = RedirectRegistry::new(repository.clone())
        .with_slug_max_attempts(config.slug_max_attempts);
    let state = AppState::new(Arc::new(registry));

    let app = app_router(state.clone());

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    let (signal_tx, signal_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signal_tx.send(());
        })
        .into_future();

    let grace = Duration::from_secs(config.shutdown_timeout_seconds);
    tokio::select! {
        result = server => result?,
        _ = async {
            // Resolves only if a shutdown signal was seen.
            if signal_rx.await.is_ok() {
                tokio::time::sleep(grace).await;
            } else {
                std::future::pending::<()>().await;
            }
        } => {
            tracing::warn!(
                "In-flight requests did not finish within {}s, abandoning them",
                grace.as_secs()
            );
        }
    }

    tracing::info!("Server stopped, releasing store connection");
    drop(state);
    if release_store(repository, STORE_RELEASE_WAIT).await {
        tracing::info!("Store connection closed");
    } else {
        tracing::warn!("Store connection still in use, it closes with the runtime");
    }
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Drops `store` once this is the last handle to it.
///
/// Pending click updates and abandoned connections hold their own handles;
/// they get up to `wait` to finish. Returns `false` if handles remain after that.
async fn release_store<T>(store: Arc<T>, wait: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + wait;
    let mut store = store;

    loop {
        match Arc::try_unwrap(store) {
            Ok(inner) => {
                drop(inner);
                return true;
            }
            Err(shared) if tokio::time::Instant::now() < deadline => {
                store = shared;
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            Err(_) => return false,
        }
    }
}

/// Completes when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests");
}
