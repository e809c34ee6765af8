//! Domain models returned by the ordering service.
//!
//! These are validated domain types, separate from the private row types in
//! [`crate::db`]. Each query shape gets its own struct.

pub mod customer;
pub mod delivery;
pub mod order;
pub mod restaurant;
pub mod review;

pub use customer::{Customer, NewCustomer};
pub use delivery::Delivery;
pub use order::{CustomerOrder, NewOrder, Order, OrderItem};
pub use restaurant::{MenuItem, Restaurant};
pub use review::{NewPayment, NewReview, Payment, Review};
