//! CLI command implementations.

pub mod catalog;
pub mod customer;
pub mod delivery;
pub mod migrate;
pub mod order;

use serde::Serialize;
use thiserror::Error;

use food_delivery_core::MoneyError;
use food_delivery_ordering::{GatewayError, ServiceError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid amount: {0}")]
    Amount(#[from] MoneyError),

    #[error("Failed to hash password")]
    PasswordHash,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Print a result to stdout as pretty JSON.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    let json = serde_json::to_string_pretty(value)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{json}");
    }

    Ok(())
}
