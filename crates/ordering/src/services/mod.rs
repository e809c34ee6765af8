//! Business logic services for ordering.
//!
//! # Services
//!
//! - `ordering` - Customer, catalog, order, review, payment and delivery
//!   operations on top of the data store gateway

pub mod ordering;

pub use ordering::{OrderingService, ServiceError};
