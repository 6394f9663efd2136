use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use wheels_connect::config::{DatabaseConfig, EnvironmentConfig, StorageBackend};
use wheels_connect::database;
use wheels_connect::routes::create_router;
use wheels_connect::services::seed_service;
use wheels_connect::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,sqlx=warn")),
        )
        .init();

    info!("🚗 WheelsConnect Backend");
    info!("========================");

    let config = EnvironmentConfig::from_env().context("invalid configuration")?;
    info!(environment = %config.environment, "⚙️ Konfiguration geladen");

    let state = match config.storage {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = match database::create_pool(&db_config).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Fehler bei der Datenbankverbindung: {:#}", e);
                    return Err(e);
                }
            };
            database::run_migrations(&pool).await?;
            AppState::postgres(pool, &config)
        }
        StorageBackend::Memory => {
            warn!("⚠️ In-Memory-Speicher aktiv, Daten gehen beim Neustart verloren");
            AppState::in_memory(&config)
        }
    };

    seed_service::run(&state, &config)
        .await
        .context("failed to seed startup data")?;

    if state.auth_required {
        info!("🔒 Bearer-Token für /api erforderlich");
    }

    let app = create_router(state, &config);

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid listen address '{}'", config.server_url()))?;

    info!("🌐 Server läuft auf http://{}", addr);
    info!("📋 Endpoints:");
    info!("   GET  /health");
    info!("   POST /login");
    info!("   CRUD /api/kunden        (+ GET /api/kunden/:id/buchungen)");
    info!("   CRUD /api/standorte     (+ GET /api/standorte/:id/fahrzeuge)");
    info!("   CRUD /api/fahrzeuge");
    info!("   CRUD /api/buchungen     (+ /check-availability, /:id/details)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Serverfehler: {}", e);
            e
        })?;

    info!("👋 Server beendet");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Ctrl+C-Handler konnte nicht installiert werden: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ SIGTERM-Handler konnte nicht installiert werden: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C empfangen, Server fährt herunter...");
        },
        _ = terminate => {
            info!("🛑 SIGTERM empfangen, Server fährt herunter...");
        },
    }
}
