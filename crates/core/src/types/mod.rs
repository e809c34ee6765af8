//! Core types for the ordering domain.

pub mod email;
pub mod id;
pub mod line_item;
pub mod money;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use line_item::LineItem;
pub use money::{Money, MoneyError};
pub use status::DeliveryStatus;
