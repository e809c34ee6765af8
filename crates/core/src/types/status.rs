//! Delivery status values.
//!
//! Statuses are free-form strings in the store (`pending`, `picked_up`,
//! `cancelled`, ...). Only one value carries behavior: `delivered`, which
//! stamps the delivery's `delivered_time`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Status of a delivery assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryStatus(String);

impl DeliveryStatus {
    /// Status given to a freshly assigned delivery by the schema default.
    pub const PENDING: &'static str = "pending";
    /// Terminal status. Updating to this value sets `delivered_time`.
    pub const DELIVERED: &'static str = "delivered";

    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    #[must_use]
    pub fn pending() -> Self {
        Self::new(Self::PENDING)
    }

    #[must_use]
    pub fn delivered() -> Self {
        Self::new(Self::DELIVERED)
    }

    /// Exact, case-sensitive comparison with [`Self::DELIVERED`].
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.0 == Self::DELIVERED
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeliveryStatus {
    fn from(status: &str) -> Self {
        Self::new(status)
    }
}

impl From<String> for DeliveryStatus {
    fn from(status: String) -> Self {
        Self(status)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for DeliveryStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for DeliveryStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        <String as sqlx::Decode<sqlx::Postgres>>::decode(value).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for DeliveryStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
