//! OAuth client registry server binary.
//!
//! Loads configuration from the environment, provisions the storage backend,
//! composes service, logging middleware, endpoints and router, and serves HTTP
//! until interrupted.

use anyhow::Result;
use client_registry::{
    config::Config,
    endpoint::Endpoints,
    http::{AppState, build_router},
    registry::new_service,
    storage::{create_storage_backend, parse_storage_backend},
};
use std::{env, sync::Arc};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "client_registry=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let version = client_registry::config::version()?;

    env::args().for_each(|arg| {
        if arg == "--version" {
            println!("{version}");
            std::process::exit(0);
        }
    });

    tracing::info!(?version, "Starting client registry");

    let config = Config::new()?;

    let storage_backend =
        parse_storage_backend(&config.storage_backend, config.database_url.as_deref())?;
    let storage =
        create_storage_backend(storage_backend, *config.storage_timeout.as_ref()).await?;

    // Provisioning failures other than an existing table abort startup here.
    let service = new_service(storage).await?;

    let app_context = AppState {
        config: Arc::new(config.clone()),
        endpoints: Endpoints::new(service),
    };

    let app = build_router(app_context);

    // Setup graceful shutdown
    let tracker = TaskTracker::new();
    let token = CancellationToken::new();

    {
        let tracker = tracker.clone();
        let inner_token = token.clone();

        let ctrl_c = async {
            if let Err(err) = signal::ctrl_c().await {
                tracing::error!("failed to listen for Ctrl+C: {}", err);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(err) => {
                    tracing::error!("failed to install SIGTERM handler: {}", err);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::spawn(async move {
            tokio::select! {
                () = inner_token.cancelled() => { },
                _ = terminate => {},
                _ = ctrl_c => {},
            }

            tracker.close();
            inner_token.cancel();
        });
    }

    // Start HTTP server
    {
        let http_port = *config.http_port.as_ref();
        let bind_address = format!("0.0.0.0:{http_port}");
        let listener = TcpListener::bind(&bind_address).await?;
        tracing::info!(transport = "HTTP", addr = %bind_address, "listening");

        let inner_token = token.clone();
        tracker.spawn(async move {
            let shutdown_token = inner_token.clone();
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_token.cancelled().await;
                    tracing::info!("axum graceful shutdown complete");
                })
                .await;
            if let Err(err) = result {
                tracing::error!("axum task failed: {}", err);
            }

            inner_token.cancel();
        });
    }

    tracker.wait().await;

    Ok(())
}
