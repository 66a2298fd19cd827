use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use footlights_api::bootstrap::ensure_bootstrap_admin;
use footlights_api::config::{LogFormat, ServerConfig};
use footlights_api::mailer::{Mailer, SmtpMailer};
use footlights_api::media_store::LocalMediaStore;
use footlights_api::revalidate::{CacheInvalidator, LogInvalidator, WebhookInvalidator};
use footlights_api::router::build_app_router;
use footlights_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "footlights_api=debug,tower_http=debug".into());
    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn Error>> {
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = footlights_db::create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    footlights_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    footlights_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    ensure_bootstrap_admin(&pool, config.bootstrap_admin.as_ref()).await?;

    // --- Collaborators ---
    let media_store = Arc::new(LocalMediaStore::new(config.media.root.clone()));

    let mailer: Option<Arc<dyn Mailer>> = match &config.smtp {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, "Invitation mail enabled");
            Some(Arc::new(SmtpMailer::new(smtp)?))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, invitation links are returned to the inviting admin");
            None
        }
    };

    let invalidator: Arc<dyn CacheInvalidator> = match &config.revalidate {
        Some(revalidate) => Arc::new(WebhookInvalidator::new(revalidate)?),
        None => Arc::new(LogInvalidator),
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media_store,
        mailer,
        invalidator,
    };

    // --- Router ---
    let app = build_app_router(state, &config)?;

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
