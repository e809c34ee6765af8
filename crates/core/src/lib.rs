//! Food Delivery Core - Shared domain types.
//!
//! This crate provides the types shared by every food delivery component:
//! - `ordering` - Data store gateway and ordering service
//! - `cli` - Command-line caller for migrations and ordering operations
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O and no database
//! access. The optional `postgres` feature adds `sqlx` encode/decode support
//! so the types can be bound and read directly.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, money, emails and delivery statuses
//! - [`cart`] - Single-restaurant shopping cart that produces order line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartError, CartItem};
pub use types::*;
