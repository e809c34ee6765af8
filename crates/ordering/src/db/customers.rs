//! Customer repository.

use food_delivery_core::{CustomerId, Email};

use super::{Gateway, GatewayError};
use crate::models::{Customer, NewCustomer};

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    customer_id: i32,
    name: String,
    phone: String,
    address: String,
    email: String,
    password_hash: String,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = GatewayError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            GatewayError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.customer_id),
            name: row.name,
            phone: row.phone,
            address: row.address,
            email,
            password_hash: row.password_hash,
        })
    }
}

/// Repository for customer registration and lookup.
pub struct CustomerRepository<'a> {
    gateway: &'a Gateway,
}

impl<'a> CustomerRepository<'a> {
    #[must_use]
    pub const fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Insert a customer and return the generated id.
    ///
    /// Email uniqueness is left to the `customers.email` constraint; use
    /// [`GatewayError::is_unique_violation`] to recognize a duplicate.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the insert fails (including a
    /// duplicate email), or `GatewayError::Connection` if no connection
    /// could be opened.
    pub async fn create(&self, input: &NewCustomer) -> Result<CustomerId, GatewayError> {
        let input = input.clone();

        self.gateway
            .scoped("create_customer", move |tx| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, CustomerId>(
                        r"
                        INSERT INTO customers (name, phone, address, email, password_hash)
                        VALUES ($1, $2, $3, $4, $5)
                        RETURNING customer_id
                        ",
                    )
                    .bind(&input.name)
                    .bind(&input.phone)
                    .bind(&input.address)
                    .bind(&input.email)
                    .bind(&input.password_hash)
                    .fetch_one(&mut **tx)
                    .await?;

                    Ok(id)
                })
            })
            .await
    }

    /// Get a customer by exact email match.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the query fails.
    /// Returns `GatewayError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, GatewayError> {
        let email = email.clone();

        self.gateway
            .scoped("get_customer", move |tx| {
                Box::pin(async move {
                    let row = sqlx::query_as::<_, CustomerRow>(
                        r"
                        SELECT customer_id, name, phone, address, email, password_hash
                        FROM customers
                        WHERE email = $1
                        ",
                    )
                    .bind(&email)
                    .fetch_optional(&mut **tx)
                    .await?;

                    row.map(Customer::try_from).transpose()
                })
            })
            .await
    }
}
