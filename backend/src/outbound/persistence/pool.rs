//! Async connection pool for Diesel PostgreSQL connections.
//!
//! A bb8 pool of `diesel-async` connections shared by the Diesel repositories.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::domain::ports::define_port_error;

/// Default maximum number of pooled connections.
pub const DEFAULT_MAX_SIZE: u32 = 10;

/// How long a handler waits for a free connection.
pub const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

define_port_error! {
    /// Failures building the pool or borrowing from it.
    pub enum PoolError {
        /// No connection became free within the checkout timeout.
        Checkout { message: String } => "failed to get connection from pool: {message}",
        /// The pool could not be built from the configuration.
        Build { message: String } => "failed to build connection pool: {message}",
    }
}

/// Pool sizing and checkout limits.
///
/// ```
/// use mytrip::outbound::persistence::PoolConfig;
///
/// let _config = PoolConfig::new("postgres://mytrip@localhost/mytrip").with_max_size(4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// [`DEFAULT_MAX_SIZE`] connections with a [`CHECKOUT_TIMEOUT`] wait.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            connection_timeout: CHECKOUT_TIMEOUT,
        }
    }

    /// Cap the pool at `max_size` connections, never fewer than one.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }
}

/// Async connection pool for PostgreSQL via Diesel.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the pool cannot be constructed.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained within
    /// the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
