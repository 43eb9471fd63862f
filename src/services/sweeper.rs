//! Session sweeper: periodic purge of expired session rows.
//!
//! DESIGN
//! ======
//! Expired sessions are already rejected at lookup time, so this task only
//! keeps the table from growing without bound. A failed sweep is logged and
//! retried on the next tick.

use std::time::Duration;

use sqlx::PgPool;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::session;

pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Spawn the background sweeper task. Returns a handle for shutdown.
pub fn spawn_session_sweeper(pool: PgPool, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            sweep_once(&pool).await;
        }
    })
}

async fn sweep_once(pool: &PgPool) {
    match session::delete_expired_sessions(pool).await {
        Ok(0) => {}
        Ok(count) => debug!(count, "purged expired sessions"),
        Err(e) => error!(error = %e, "session sweep failed"),
    }
}
