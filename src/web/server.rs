//! Web server for filestash.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::auth::AuthService;
use crate::config::ServerConfig;
use crate::{FilestashError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// Default period of the expired-session sweep (1 hour).
pub const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Web server for the API.
pub struct WebServer {
    addr: SocketAddr,
    app_state: Arc<AppState>,
    cleanup_interval: Duration,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &ServerConfig, app_state: AppState) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| FilestashError::Config(format!("invalid server address: {e}")))?;

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            cleanup_interval: SESSION_CLEANUP_INTERVAL,
        })
    }

    /// Set how often expired sessions are swept.
    pub fn with_cleanup_interval(mut self, every: Duration) -> Self {
        self.cleanup_interval = every.max(Duration::from_millis(1));
        self
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the expired-session sweep.
    ///
    /// The first sweep runs one full interval after start.
    fn start_session_cleanup_task(auth: AuthService, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                match auth.purge_expired_sessions().await {
                    Ok(0) => tracing::debug!("No expired sessions to clean up"),
                    Ok(count) => {
                        tracing::info!(deleted_count = count, "Cleaned up expired sessions")
                    }
                    Err(e) => tracing::warn!(error = %e, "Failed to clean up sessions"),
                }
            }
        })
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> Result<()> {
        let auth = self.app_state.auth.clone();
        let router = create_router(self.app_state);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        let cleanup = Self::start_session_cleanup_task(auth, self.cleanup_interval);
        let served = axum::serve(listener, router).await;
        cleanup.abort();
        served?;
        Ok(())
    }

    /// Run the server in the background and return the bound address.
    ///
    /// Useful for tests binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let auth = self.app_state.auth.clone();
        let router = create_router(self.app_state);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        Self::start_session_cleanup_task(auth, self.cleanup_interval);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
