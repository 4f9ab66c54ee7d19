//! Connection pool setup for the note and tag repositories.

use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use notafacil_core::{Error, Result};

/// Pool size used when nothing else is configured.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Pool sizing and timeouts.
///
/// The server sizes the pool from `DB_MAX_CONNECTIONS`; everything else keeps
/// its default unless a caller such as the test fixtures needs it shorter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONNECTIONS)
    }
}

impl PoolConfig {
    /// Pool holding at most `max_connections`, never fewer than one.
    pub fn new(max_connections: u32) -> Self {
        Self {
            max_connections: max_connections.max(1),
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// How long a repository call waits for a free connection.
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
    }
}

/// Open a pool against `database_url`.
pub(crate) async fn connect(database_url: &str, config: &PoolConfig) -> Result<PgPool> {
    let start = Instant::now();
    let pool = config
        .options()
        .connect(database_url)
        .await
        .map_err(Error::Database)?;

    info!(
        subsystem = "database",
        component = "pool",
        op = "connect",
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout.as_secs(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Database pool ready"
    );
    Ok(pool)
}

/// Log how many connections are still checked out.
///
/// Called before closing, when checked-out connections delay shutdown.
pub(crate) fn log_pool_status(pool: &PgPool) {
    let size = pool.size();
    let idle = pool.num_idle() as u32;

    if size > idle {
        warn!(
            subsystem = "database",
            component = "pool",
            op = "close",
            pool_size = size,
            in_use = size - idle,
            "Closing pool with connections still in use"
        );
    } else {
        info!(
            subsystem = "database",
            component = "pool",
            op = "close",
            pool_size = size,
            "Closing database pool"
        );
    }
}
