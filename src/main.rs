use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use filestash::config::SessionBackend;
use filestash::{
    AppState, Config, Database, MemorySessionStore, SessionRepository, SessionStore, WebServer,
};

#[tokio::main]
async fn main() {
    // Load configuration
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();

    // Initialize logging
    if let Err(e) = filestash::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        filestash::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    info!("filestash - file storage service");

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database {}: {e}", config.database.path);
            std::process::exit(1);
        }
    };

    let sessions: Arc<dyn SessionStore> = match config.session.backend {
        SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        SessionBackend::Sqlite => Arc::new(SessionRepository::new(db.pool())),
    };
    info!(
        backend = %config.session.backend,
        ttl_secs = config.session.ttl_secs,
        storage_path = %config.files.storage_path,
        "Services configured"
    );

    let state = AppState::new(db, sessions, &config.files.storage_path)
        .with_session_ttl(config.session.ttl_secs);

    let server = match WebServer::new(&config.server, state) {
        Ok(server) => server.with_cleanup_interval(Duration::from_secs(
            config.session.cleanup_interval_secs,
        )),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {e}");
        std::process::exit(1);
    }
}
