//! notafacil-api - HTTP API server for notafacil

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use notafacil_api::config::DEFAULT_LOG_FILTER;
use notafacil_api::{app, AppConfig, AppState, LogConfig};
use notafacil_db::{Database, PoolConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_config = LogConfig::from_env();
    let _log_guard = init_tracing(&log_config);

    let config = AppConfig::from_env()?;
    info!(
        env = %config.env,
        host = %config.host,
        port = config.port,
        db_max_connections = config.db_max_connections,
        run_migrations = config.run_migrations,
        "Configuration loaded"
    );

    let db = Database::connect_with_config(
        &config.database_url,
        PoolConfig::new(config.db_max_connections),
    )
    .await?;

    if config.run_migrations {
        info!("Running database migrations...");
        db.migrate().await?;
        info!("Database migrations complete");
    }

    let state = AppState::new(Arc::new(db.notes.clone()), Arc::new(db.tags.clone()));
    let listener = tokio::net::TcpListener::bind(config.bind_target()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state, &config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

/// Install the global subscriber.
///
/// One fmt layer, text or JSON, writing to stdout or to a daily-rotated file.
/// The returned guard flushes the file writer on drop.
fn init_tracing(log: &LogConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (writer, guard) = match &log.file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "notafacil-api.log".into());
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(log.use_ansi());
    let fmt_layer = if log.json {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    info!(
        json = log.json,
        file = ?log.file,
        "Logging initialized"
    );
    guard
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
    info!("Shutdown signal received");
}
