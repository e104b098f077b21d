//! HTTP server initialization and runtime setup.
//!
//! Loads the data sets, builds the redirect table, and runs the Axum server.

use crate::application::services::RedirectService;
use crate::config::Config;
use crate::domain::link_rewriter::LinkRewriter;
use crate::domain::old_paths::OldPathDeriver;
use crate::infrastructure::persistence::{
    JsonPageRepository, load_external_redirects, load_version_registry,
};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::path_utils::PathGrammar;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

/// Loads every data file named by `config` and assembles the shared state.
///
/// # Errors
///
/// Returns an error if a data file cannot be read, parsed, or validated.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let registry = load_version_registry(&config.versions_file, config.remove_fpt).await?;
    let external_redirects =
        load_external_redirects(config.external_redirects_file.as_deref()).await?;

    let grammar = PathGrammar::new(Arc::new(registry), Arc::new(config.languages.clone()));
    let link_rewriter = LinkRewriter::new(grammar.clone(), Arc::new(external_redirects));

    let repository = JsonPageRepository::new(&config.pages_file);
    let redirect_service = RedirectService::build(&repository, OldPathDeriver::new(grammar))
        .await
        .context("Failed to build redirect table")?;

    Ok(AppState::new(
        Arc::new(redirect_service),
        Arc::new(link_rewriter),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - A data file fails to load
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;
    tracing::info!(
        pages = state.redirect_service.page_count(),
        redirects = state.redirect_service.redirect_count(),
        "Data sets loaded"
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
