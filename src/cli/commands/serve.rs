//! Serve command implementation
//!
//! Starts the HTTP server over the configured user store.

use crate::adapters::database::create_user_store;
use crate::api::{create_router, AppState};
use crate::config::load_config;
use crate::core::ingest::IngestCoordinator;
use crate::core::users::UserService;
use crate::domain::RosterError;
use axum::Router;
use clap::Args;
use std::future::{Future, IntoFuture};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override bind port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        let store = match create_user_store(&config).await {
            Ok(store) => store,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create user store");
                eprintln!("Failed to create user store: {e}");
                return Ok(match e {
                    RosterError::Configuration(_) => 2,
                    _ => 4,
                });
            }
        };

        if let Err(e) = store.ensure_schema().await {
            tracing::error!(error = %e, store = store.store_name(), "Store is unreachable");
            eprintln!("Failed to initialize store: {e}");
            return Ok(4);
        }
        tracing::info!(store = store.store_name(), "User store ready");

        let ingest = IngestCoordinator::new(&config.upstream, store.clone())?;
        let state = AppState::new(UserService::new(store), ingest);
        let app = create_router(state, &config.server);

        let addr = config.server.bind_address();
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!(address = %addr, "Server listening");

        let drain = Duration::from_secs(config.server.shutdown_timeout_secs.min(MAX_DRAIN_SECS));
        if serve_until(listener, app, shutdown_signal(), drain).await? {
            tracing::info!("Server shut down gracefully");
        }
        Ok(0)
    }
}

/// Upper bound on the drain after a shutdown signal
const MAX_DRAIN_SECS: u64 = 5;

/// Serves `app` until `signal` resolves, then lets in-flight requests finish
/// for at most `drain`.
///
/// Returns `false` when the drain timed out with requests still open.
async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain: Duration,
) -> std::io::Result<bool>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            let _ = signalled_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    let drain_deadline = async move {
        if signalled_rx.await.is_err() {
            // server finished without a signal
            std::future::pending::<()>().await;
        }
        tracing::info!(drain_secs = drain.as_secs_f64(), "Waiting for connections to close");
        tokio::time::sleep(drain).await;
    };

    tokio::select! {
        result = &mut server => result.map(|()| true),
        _ = drain_deadline => {
            tracing::warn!(
                drain_secs = drain.as_secs_f64(),
                "Shutdown timeout elapsed, abandoning in-flight requests"
            );
            Ok(false)
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
