//! Customer domain types.

use serde::Serialize;

use food_delivery_core::{CustomerId, Email};

/// A registered customer.
///
/// Implements `Debug` manually so the password hash never reaches logs.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: Email,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl std::fmt::Debug for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Customer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("phone", &self.phone)
            .field("address", &self.address)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Input for registering a customer.
///
/// `password_hash` must already be hashed; the ordering layer stores it
/// verbatim.
#[derive(Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: Email,
    pub password_hash: String,
}

impl std::fmt::Debug for NewCustomer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewCustomer")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
