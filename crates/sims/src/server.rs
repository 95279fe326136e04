//! Server startup and shutdown.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{build_router, AppState};
use crate::service::StudentService;
use crate::store::JsonFileStore;

/// Open the data file, bind the configured address and serve until SIGINT
/// or SIGTERM.
///
/// # Errors
///
/// Returns an error if the data file cannot be created, the address cannot
/// be bound, or the server fails.
pub async fn run(config: &Config) -> Result<()> {
    let store = JsonFileStore::open(config.data_file()).await?;
    info!("Using data file {}", store.path().display());

    let service = StudentService::with_policy(Arc::new(store), config.validation_policy());
    let state = AppState::new(service, &config.server);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;
    info!("Server running at http://{}", listener.local_addr()?);

    serve(listener, state, shutdown_signal()).await
}

/// Serve the router on an already-bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("Could not install signal handlers, falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}
