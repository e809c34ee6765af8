//! Food Delivery Ordering - data store gateway and ordering service.
//!
//! # Architecture
//!
//! - [`config`] - Connection settings read once from the environment
//! - [`db`] - The gateway (one connection and transaction per operation) and
//!   per-table repositories
//! - [`models`] - Domain types returned to callers
//! - [`services`] - [`OrderingService`], the caller-facing API
//!
//! ```rust,ignore
//! let config = DatabaseConfig::from_env();
//! let service = OrderingService::new(Gateway::new(config));
//!
//! for restaurant in service.list_restaurants().await? {
//!     println!("{}", restaurant.name);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

pub use config::DatabaseConfig;
pub use db::{Gateway, GatewayError};
pub use services::{OrderingService, ServiceError};
