//! Data store gateway for the ordering `PostgreSQL` database.
//!
//! # Tables
//!
//! - `customers` - Registered customers (unique email)
//! - `restaurants` / `menu_items` - Catalog, filtered by `is_active` / `is_available`
//! - `orders` / `order_items` - Orders and their captured line prices
//! - `reviews`, `payments` - Per-order records, duplicates allowed
//! - `delivery_persons` / `deliveries` - Delivery assignment and status
//!
//! # Scoped acquisition
//!
//! There is no pool. Each logical operation calls [`Gateway::scoped`], which
//! opens a fresh connection, begins a transaction, runs the operation's
//! statements, then commits (on `Ok`) or rolls back (on `Err`) and closes the
//! connection. If the operation future is dropped mid-flight the transaction
//! and connection are dropped with it, which rolls back and disconnects.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/ordering/migrations/` and run via:
//! ```bash
//! cargo run -p food-delivery-cli -- migrate
//! ```

pub mod customers;
pub mod deliveries;
pub mod orders;
pub mod payments;
pub mod restaurants;
pub mod reviews;

use futures::future::BoxFuture;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, Postgres, Transaction};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{ConfigError, DatabaseConfig};

pub use customers::CustomerRepository;
pub use deliveries::DeliveryRepository;
pub use orders::OrderRepository;
pub use payments::PaymentRepository;
pub use restaurants::RestaurantRepository;
pub use reviews::ReviewRepository;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Failure to open a connection.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// A connection setting is missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The server is unreachable or rejected the credentials.
    #[error(transparent)]
    Driver(sqlx::Error),
}

/// Errors that can occur inside or around a scoped acquisition.
///
/// Statement errors carry the driver error untouched so store diagnostics
/// (SQLSTATE, constraint name, detail) stay available to the caller.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Could not acquire a connection.
    #[error("connection error: {0}")]
    Connection(#[from] ConnectError),

    /// A statement (or BEGIN/COMMIT) failed.
    #[error("statement error: {0}")]
    Statement(#[from] sqlx::Error),

    /// A line item was rejected before it reached the store.
    #[error("invalid line item at position {index}: {reason}")]
    InvalidLineItem { index: usize, reason: String },

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl GatewayError {
    fn sqlstate(&self) -> Option<String> {
        match self {
            Self::Statement(sqlx::Error::Database(db_err)) => {
                db_err.code().map(std::borrow::Cow::into_owned)
            }
            _ => None,
        }
    }

    /// Whether the store rejected a write on a unique constraint.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some(UNIQUE_VIOLATION)
    }

    /// Whether the store rejected a write on a foreign key.
    #[must_use]
    pub fn is_foreign_key_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    }

    /// Name of the violated constraint, when the store reported one.
    #[must_use]
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::Statement(sqlx::Error::Database(db_err)) => db_err.constraint(),
            _ => None,
        }
    }
}

/// Opens one connection per logical operation.
///
/// Holds only the immutable configuration it was built with.
#[derive(Debug, Clone)]
pub struct Gateway {
    config: DatabaseConfig,
}

impl Gateway {
    #[must_use]
    pub const fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    fn connect_options(&self) -> Result<PgConnectOptions, ConnectError> {
        Ok(self.config.connect_options()?)
    }

    /// Open a new connection.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Connection` if a setting is missing or invalid,
    /// the server cannot be reached, or authentication fails.
    pub async fn acquire(&self) -> Result<PgConnection, GatewayError> {
        let options = self.connect_options()?;
        PgConnection::connect_with(&options)
            .await
            .map_err(|e| GatewayError::Connection(ConnectError::Driver(e)))
    }

    /// Run `operation` inside one connection and one transaction.
    ///
    /// Commits if the callback returns `Ok`. On `Err`, rolls back and returns
    /// the callback's error unchanged; a rollback failure is logged and does
    /// not replace it. The connection is closed on every path.
    ///
    /// ```rust,ignore
    /// let id = gateway
    ///     .scoped("count_orders", |tx| {
    ///         Box::pin(async move {
    ///             let n: i64 = sqlx::query_scalar("SELECT count(*) FROM orders")
    ///                 .fetch_one(&mut **tx)
    ///                 .await?;
    ///             Ok(n)
    ///         })
    ///     })
    ///     .await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Connection` if no connection can be opened,
    /// `GatewayError::Statement` if BEGIN or COMMIT fails, or whatever error
    /// the callback produced.
    pub async fn scoped<T, F>(&self, operation: &'static str, callback: F) -> Result<T, GatewayError>
    where
        F: for<'c> FnOnce(
                &'c mut Transaction<'_, Postgres>,
            ) -> BoxFuture<'c, Result<T, GatewayError>>
            + Send,
        T: Send,
    {
        let mut conn = self.acquire().await?;
        debug!(operation, "connection acquired");

        let result = run_in_transaction(&mut conn, operation, callback).await;

        if let Err(e) = conn.close().await {
            warn!(operation, error = %e, "failed to close connection cleanly");
        }

        result
    }
}

async fn run_in_transaction<T, F>(
    conn: &mut PgConnection,
    operation: &'static str,
    callback: F,
) -> Result<T, GatewayError>
where
    F: for<'c> FnOnce(&'c mut Transaction<'_, Postgres>) -> BoxFuture<'c, Result<T, GatewayError>>,
{
    let mut tx = conn.begin().await?;

    match callback(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            debug!(operation, "committed");
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(operation, error = %rollback_err, "rollback failed");
            }
            debug!(operation, error = %e, "rolled back");
            Err(e)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_error_display() {
        let err = GatewayError::InvalidLineItem {
            index: 2,
            reason: "quantity must be at least 1 (got 0)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid line item at position 2: quantity must be at least 1 (got 0)"
        );
    }

    #[test]
    fn test_non_database_errors_are_not_constraint_violations() {
        let err = GatewayError::Statement(sqlx::Error::RowNotFound);
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
        assert!(err.constraint().is_none());
    }

    #[tokio::test]
    async fn test_acquire_with_missing_settings_is_a_connection_error() {
        let gateway = Gateway::new(DatabaseConfig::from_map(&HashMap::new()));

        let err = gateway.acquire().await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Connection(ConnectError::Config(ConfigError::MissingEnvVar(_)))
        ));
    }

    #[tokio::test]
    async fn test_scoped_never_runs_callback_without_connection() {
        let gateway = Gateway::new(DatabaseConfig::default());

        let result = gateway
            .scoped("noop", |_tx| Box::pin(async move { Ok(1_i32) }))
            .await;

        assert!(matches!(result, Err(GatewayError::Connection(_))));
    }
}
