use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{error, info, warn};

use scout_api::{build_router, AppState};
use scout_core::repositories::SessionRepository;
use scout_core::services::{AuthService, GroupService, ReportService};
use scout_infrastructure::{
    create_pool, create_redis_pool, run_migrations, seed_demo_data, FilesystemAttachmentStore,
    MemorySessionStore, MemoryStore, PgGroupRepository, PgReportRepository, PgSessionRepository,
    PgUserRepository, RedisSessionStore,
};
use scout_shared::config::{AppConfig, SessionBackend};
use scout_shared::telemetry::init_telemetry;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration (telemetry settings live in it)
    let config = AppConfig::load().context("failed to load configuration")?;
    let _log_guard = init_telemetry(&config.logging)?;

    info!("{} starting ({})", config.app.name, config.app.env);

    // Connect to Database
    let pool = create_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.acquire_timeout_seconds,
    )
    .await
    .context("failed to connect to database")?;
    info!("Database connection established.");
    run_migrations(&pool).await?;

    // Session store
    let sessions: Arc<dyn SessionRepository> = match config.session.backend {
        SessionBackend::Postgres => Arc::new(PgSessionRepository::new(pool.clone())),
        SessionBackend::Redis => {
            let redis = create_redis_pool(&config.redis.url, config.redis.max_connections)?;
            Arc::new(RedisSessionStore::new(redis, config.redis.key_prefix.clone()))
        }
        SessionBackend::Memory => {
            warn!("Using in-memory sessions; they are lost on restart");
            Arc::new(MemorySessionStore::new(MemoryStore::new()))
        }
    };
    info!("Session backend: {:?}", config.session.backend);
    spawn_session_purge(sessions.clone());

    // Attachment storage
    let attachments = FilesystemAttachmentStore::new(&config.storage.upload_dir);
    attachments.init().await?;

    // Services
    let auth = Arc::new(AuthService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgGroupRepository::new(pool.clone())),
        sessions,
        config.session.ttl_seconds,
    ));
    let groups = Arc::new(GroupService::new(Arc::new(PgGroupRepository::new(pool.clone()))));
    let reports = Arc::new(ReportService::new(
        Arc::new(PgReportRepository::new(pool.clone())),
        Arc::new(attachments),
        config.storage.max_upload_bytes,
    ));

    if config.seed.demo_data {
        seed_demo_data(&groups, &auth, &config.seed.admin_password).await?;
    }

    // Create App State and router
    let state = AppState::new(&config, auth, reports, groups)?;
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn spawn_session_purge(sessions: Arc<dyn SessionRepository>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            match sessions.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => info!("Purged {} expired session(s)", purged),
                Err(e) => error!("Session purge failed: {}", e),
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
