//! Connection-liveness state machine.
//!
//! Before every execution the guard probes the session and, when the probe
//! fails, replaces the session using the original connection parameters:
//! close the broken session best-effort, reconnect, and retry on a one
//! second cadence up to [`MAX_RECONNECT_ATTEMPTS`] times. Exhausting the
//! budget moves the guard to `Failed` and surfaces an explicit error rather
//! than leaving callers to discover the corpse on their next operation.

use std::time::Duration;

use tracing::{debug, error, warn};

use crate::error::MysqlMiddlewareError;
use crate::session::{SessionConnector, SqlSession};

/// Upper bound on consecutive reconnect attempts before escalating.
pub const MAX_RECONNECT_ATTEMPTS: u32 = 120;

const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Lifecycle of the guarded session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// No session has been opened yet
    Unconnected,
    /// The session answered its last probe
    Connected,
    /// The reconnect budget was exhausted
    Failed,
}

/// Owns the one live session and guarantees it is alive before use.
pub struct ConnectionGuard {
    connector: Box<dyn SessionConnector>,
    session: Option<Box<dyn SqlSession>>,
    state: LinkState,
}

impl ConnectionGuard {
    #[must_use]
    pub fn new(connector: Box<dyn SessionConnector>) -> Self {
        Self {
            connector,
            session: None,
            state: LinkState::Unconnected,
        }
    }

    #[must_use]
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Probe the session and reconnect as needed, returning a live session.
    ///
    /// # Errors
    ///
    /// `ConnectionGaveUp` once `MAX_RECONNECT_ATTEMPTS` consecutive
    /// reconnects have failed; `ConnectionError` if the very first open
    /// fails.
    pub async fn ensure_alive(
        &mut self,
    ) -> Result<&mut Box<dyn SqlSession>, MysqlMiddlewareError> {
        if self.session.is_none() {
            let session = self.connector.connect().await?;
            self.session = Some(session);
            self.state = LinkState::Connected;
        } else {
            let alive = match self.session.as_mut() {
                Some(session) => session.ping().await.is_ok(),
                None => false,
            };
            if alive {
                self.state = LinkState::Connected;
            } else {
                self.reconnect().await?;
            }
        }

        self.session.as_mut().ok_or_else(|| {
            MysqlMiddlewareError::ConnectionError("no live session".to_string())
        })
    }

    async fn reconnect(&mut self) -> Result<(), MysqlMiddlewareError> {
        for attempt in 1..=MAX_RECONNECT_ATTEMPTS {
            self.discard_session().await;
            match self.connector.connect().await {
                Ok(session) => {
                    self.session = Some(session);
                    self.state = LinkState::Connected;
                    debug!(attempt, "mysql session re-established");
                    return Ok(());
                }
                Err(e) => {
                    warn!(attempt, error = %e, "mysql connect failed, reconnecting");
                }
            }
            tokio::time::sleep(RECONNECT_DELAY).await;
        }

        self.state = LinkState::Failed;
        error!(
            attempts = MAX_RECONNECT_ATTEMPTS,
            "mysql connect failed, giving up"
        );
        Err(MysqlMiddlewareError::ConnectionGaveUp {
            attempts: MAX_RECONNECT_ATTEMPTS,
        })
    }

    /// Close the current session if one is open. Close failures are logged,
    /// not escalated; a second close is a no-op.
    pub async fn close(&mut self) -> Result<(), MysqlMiddlewareError> {
        match self.session.as_mut() {
            Some(session) => {
                if let Err(e) = session.close().await {
                    warn!(error = %e, "mysql close error");
                }
                self.session = None;
                self.state = LinkState::Unconnected;
            }
            None => {
                debug!("close called on an already-closed session");
            }
        }
        Ok(())
    }

    async fn discard_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.close().await {
                warn!(error = %e, "mysql close error while replacing session");
            }
        }
    }
}
