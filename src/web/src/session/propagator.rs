use crate::session::retry_with_backoff;
use league_core::{LeagueData, UserContext};
use log::debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard, RwLock};

const BASE_DELAY: Duration = Duration::from_millis(50);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("session context push failed: {0}")]
pub struct SessionError(pub String);

/// Receiver of the caller context. `None` is an anonymous visitor.
pub trait ContextSink: Send + Sync {
    fn apply(&self, context: Option<UserContext>) -> impl Future<Output = Result<(), SessionError>> + Send;
}

/// Writes the context into the store session used for `recorded_by`.
pub struct StoreSession {
    data: Arc<RwLock<LeagueData>>,
}

impl StoreSession {
    pub fn new(data: Arc<RwLock<LeagueData>>) -> Self {
        StoreSession { data }
    }
}

impl ContextSink for StoreSession {
    async fn apply(&self, context: Option<UserContext>) -> Result<(), SessionError> {
        self.data.write().await.set_session(context);
        Ok(())
    }
}

/// Pushes caller contexts to a sink, skipping pushes equal to the last one.
pub struct ContextPropagator<S: ContextSink> {
    sink: S,
    // outer `None`: nothing pushed yet
    last: Mutex<Option<Option<UserContext>>>,
    attempts: u32,
    base_delay: Duration,
}

/// Holds the propagator until dropped, so the pushed context stays current.
pub struct SessionGuard<'a> {
    _last: MutexGuard<'a, Option<Option<UserContext>>>,
}

impl<S: ContextSink> ContextPropagator<S> {
    pub fn new(sink: S, attempts: u32) -> Self {
        Self::with_delay(sink, attempts, BASE_DELAY)
    }

    pub fn with_delay(sink: S, attempts: u32, base_delay: Duration) -> Self {
        ContextPropagator {
            sink,
            last: Mutex::new(None),
            attempts,
            base_delay,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub async fn enter(&self, context: Option<&UserContext>) -> Result<SessionGuard<'_>, SessionError> {
        let mut last = self.last.lock().await;
        let context = context.cloned();

        if last.as_ref() != Some(&context) {
            retry_with_backoff(self.attempts, self.base_delay, || self.sink.apply(context.clone())).await?;

            debug!(
                "session: context set to user {:?}",
                context.as_ref().map(|c| c.user_id)
            );

            *last = Some(context);
        }

        Ok(SessionGuard { _last: last })
    }

    pub async fn push(&self, context: Option<&UserContext>) -> Result<(), SessionError> {
        self.enter(context).await.map(|_| ())
    }

    pub async fn clear(&self) {
        *self.last.lock().await = None;
    }
}
