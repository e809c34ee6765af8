//! Review repository.

use chrono::{DateTime, Utc};

use food_delivery_core::{CustomerId, OrderId, RestaurantId, ReviewId};

use super::{Gateway, GatewayError};
use crate::models::{NewReview, Review};

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    review_id: i32,
    order_id: i32,
    customer_id: i32,
    restaurant_id: i32,
    rating: i32,
    comments: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: ReviewId::new(row.review_id),
            order_id: OrderId::new(row.order_id),
            customer_id: CustomerId::new(row.customer_id),
            restaurant_id: RestaurantId::new(row.restaurant_id),
            rating: row.rating,
            comments: row.comments,
            created_at: row.created_at,
        }
    }
}

/// Repository for restaurant reviews.
pub struct ReviewRepository<'a> {
    gateway: &'a Gateway,
}

impl<'a> ReviewRepository<'a> {
    #[must_use]
    pub const fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Insert a review.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the insert fails, for example on
    /// an unknown order, customer or restaurant.
    pub async fn create(&self, input: &NewReview) -> Result<ReviewId, GatewayError> {
        let input = input.clone();

        self.gateway
            .scoped("add_review", move |tx| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, ReviewId>(
                        r"
                        INSERT INTO reviews (order_id, customer_id, restaurant_id, rating, comments)
                        VALUES ($1, $2, $3, $4, $5)
                        RETURNING review_id
                        ",
                    )
                    .bind(input.order_id)
                    .bind(input.customer_id)
                    .bind(input.restaurant_id)
                    .bind(input.rating)
                    .bind(input.comments.as_deref())
                    .fetch_one(&mut **tx)
                    .await?;

                    Ok(id)
                })
            })
            .await
    }

    /// List a restaurant's reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the query fails.
    pub async fn list_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Review>, GatewayError> {
        self.gateway
            .scoped("list_reviews", move |tx| {
                Box::pin(async move {
                    let rows = sqlx::query_as::<_, ReviewRow>(
                        r"
                        SELECT review_id, order_id, customer_id, restaurant_id,
                               rating, comments, created_at
                        FROM reviews
                        WHERE restaurant_id = $1
                        ORDER BY created_at DESC, review_id DESC
                        ",
                    )
                    .bind(restaurant_id)
                    .fetch_all(&mut **tx)
                    .await?;

                    Ok(rows.into_iter().map(Review::from).collect::<Vec<_>>())
                })
            })
            .await
    }
}
