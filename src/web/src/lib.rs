mod ai;
mod auth;
mod common;
mod config;
mod cup;
mod error;
mod finance;
mod functions;
pub mod i18n;
mod r#match;
mod notifications;
mod routes;
mod session;
mod standings;
mod store;
mod suspensions;
mod teams;
mod users;
mod venues;

pub use ai::OllamaAssistant;
pub use auth::{Caller, USER_ID_HEADER};
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorMessage};
pub use i18n::{I18n, I18nManager};
pub use routes::ServerRoutes;
pub use session::{ContextPropagator, SessionWrite, StoreSession};
pub use store::SnapshotWriter;

use axum::response::IntoResponse;
use league_core::LeagueData;
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

pub struct LeagueServer {
    data: LeagueAppData,
}

impl LeagueServer {
    pub fn new(data: LeagueAppData) -> Self {
        LeagueServer { data }
    }

    pub async fn run(&self) -> std::io::Result<()> {
        let app = ServerRoutes::create(self.data.clone()).layer(
            ServiceBuilder::new()
                // Catch panics in handlers and convert them to 500 errors
                .layer(CatchPanicLayer::custom(|_err| {
                    ApiError::internal("handler panicked").into_response()
                })),
        );

        let addr = SocketAddr::from(([0, 0, 0, 0], self.data.config.port));

        let listener = TcpListener::bind(addr).await.inspect_err(|e| {
            error!("Failed to bind to address {}: {}", addr, e);
        })?;

        info!("listen at: http://localhost:{}", self.data.config.port);

        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }

        Ok(())
    }
}

pub struct LeagueAppData {
    pub data: Arc<RwLock<LeagueData>>,
    pub i18n: Arc<I18nManager>,
    pub config: Arc<ServerConfig>,
    pub session: Arc<ContextPropagator<StoreSession>>,
    pub snapshots: Arc<SnapshotWriter>,
    pub assistant: Arc<OllamaAssistant>,
}

impl LeagueAppData {
    pub fn new(data: LeagueData, config: ServerConfig) -> Self {
        let data = Arc::new(RwLock::new(data));

        LeagueAppData {
            session: Arc::new(ContextPropagator::new(
                StoreSession::new(Arc::clone(&data)),
                config.context_retries,
            )),
            snapshots: Arc::new(SnapshotWriter::new(config.data_dir.as_deref())),
            assistant: Arc::new(OllamaAssistant::new(
                &config.ollama_host,
                config.ollama_port,
                &config.ollama_model,
            )),
            i18n: Arc::new(I18nManager::new()),
            config: Arc::new(config),
            data,
        }
    }

    /// Pushes the caller context, then takes the write lock.
    pub async fn write_as(&self, caller: &Caller) -> ApiResult<SessionWrite<'_>> {
        let session = self.session.enter(caller.context.as_ref()).await.map_err(|e| {
            ApiError::InternalError(ErrorMessage::new("error.session", e.to_string()))
        })?;

        Ok(SessionWrite {
            _session: session,
            data: self.data.write().await,
        })
    }

    /// Schedules a snapshot of the current state.
    pub fn persist(&self, data: &LeagueData) {
        self.snapshots.schedule(data.clone());
    }
}

impl Clone for LeagueAppData {
    fn clone(&self) -> Self {
        LeagueAppData {
            data: Arc::clone(&self.data),
            i18n: Arc::clone(&self.i18n),
            config: Arc::clone(&self.config),
            session: Arc::clone(&self.session),
            snapshots: Arc::clone(&self.snapshots),
            assistant: Arc::clone(&self.assistant),
        }
    }
}

#[cfg(test)]
mod tests;
