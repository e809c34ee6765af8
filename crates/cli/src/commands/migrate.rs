//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! fd-cli migrate
//! ```
//!
//! Migrations live in `crates/ordering/migrations/` and are embedded at
//! compile time. Applied migrations are skipped.

use sqlx::Connection;

use food_delivery_ordering::Gateway;

use super::CommandError;

/// Apply all pending ordering migrations.
///
/// # Errors
///
/// Returns an error if no connection can be opened or a migration fails.
pub async fn run(gateway: &Gateway) -> Result<(), CommandError> {
    tracing::info!("Connecting to ordering database...");
    let mut conn = gateway.acquire().await?;

    tracing::info!("Running ordering migrations...");
    let result = sqlx::migrate!("../ordering/migrations").run(&mut conn).await;

    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "failed to close connection cleanly");
    }
    result?;

    tracing::info!("Ordering migrations complete!");
    Ok(())
}
