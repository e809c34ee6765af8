//! Integration tests for the food delivery ordering core.
//!
//! # Running Tests
//!
//! The tests need a scratch `PostgreSQL` database. Point the `DB_*`
//! variables (or a `.env` file) at it, then run the ignored tests:
//!
//! ```bash
//! DB_NAME=food_delivery_test DB_USER=postgres DB_PASSWORD=postgres \
//!     DB_HOST=localhost DB_PORT=5432 \
//!     cargo test -p food-delivery-integration-tests -- --ignored
//! ```
//!
//! Migrations are applied on every [`TestContext::new`]. Every test seeds its
//! own restaurants, menu items and customers, so tests can share a database
//! and run in parallel.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use food_delivery_core::{
    CustomerId, DeliveryPersonId, Email, MenuItemId, Money, OrderId, RestaurantId,
};
use food_delivery_ordering::models::NewCustomer;
use food_delivery_ordering::{DatabaseConfig, Gateway, OrderingService};
use sqlx::Connection;

/// An id no fixture will ever be assigned.
pub const MISSING_ID: i32 = i32::MAX;

/// Service plus fixture helpers bound to the test database.
pub struct TestContext {
    pub service: OrderingService,
}

impl TestContext {
    /// Connect using the `DB_*` environment and bring the schema up to date.
    pub async fn new() -> Self {
        let gateway = Gateway::new(DatabaseConfig::from_env());

        let mut conn = gateway
            .acquire()
            .await
            .expect("test database must be reachable (set DB_* variables)");
        sqlx::migrate!("../ordering/migrations")
            .run(&mut conn)
            .await
            .expect("migrations should apply");
        conn.close().await.ok();

        Self {
            service: OrderingService::new(gateway),
        }
    }

    fn gateway(&self) -> &Gateway {
        self.service.gateway()
    }

    /// A fresh email address, unique across test runs.
    #[must_use]
    pub fn unique_email() -> Email {
        Email::parse(&format!("{}@example.test", uuid::Uuid::new_v4().simple())).unwrap()
    }

    /// Registration input for a customer with a unique email.
    #[must_use]
    pub fn new_customer(name: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_owned(),
            phone: "555-0100".to_owned(),
            address: "1 Test Rd".to_owned(),
            email: Self::unique_email(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_owned(),
        }
    }

    pub async fn register_customer(&self, name: &str) -> CustomerId {
        self.service
            .register_customer(&Self::new_customer(name))
            .await
            .unwrap()
    }

    pub async fn seed_restaurant(&self, name: &str, is_active: bool) -> RestaurantId {
        let name = format!("{name} {}", uuid::Uuid::new_v4().simple());

        self.gateway()
            .scoped("seed_restaurant", move |tx| {
                Box::pin(async move {
                    Ok(sqlx::query_scalar::<_, RestaurantId>(
                        r"
                        INSERT INTO restaurants (name, address, phone, is_active)
                        VALUES ($1, '2 Test Ave', '555-0200', $2)
                        RETURNING restaurant_id
                        ",
                    )
                    .bind(&name)
                    .bind(is_active)
                    .fetch_one(&mut **tx)
                    .await?)
                })
            })
            .await
            .unwrap()
    }

    pub async fn seed_menu_item(
        &self,
        restaurant_id: RestaurantId,
        name: &str,
        price: Money,
        is_available: bool,
    ) -> MenuItemId {
        let name = name.to_owned();

        self.gateway()
            .scoped("seed_menu_item", move |tx| {
                Box::pin(async move {
                    Ok(sqlx::query_scalar::<_, MenuItemId>(
                        r"
                        INSERT INTO menu_items (restaurant_id, name, price, is_available)
                        VALUES ($1, $2, $3, $4)
                        RETURNING menu_item_id
                        ",
                    )
                    .bind(restaurant_id)
                    .bind(&name)
                    .bind(price)
                    .bind(is_available)
                    .fetch_one(&mut **tx)
                    .await?)
                })
            })
            .await
            .unwrap()
    }

    pub async fn seed_delivery_person(&self, name: &str) -> DeliveryPersonId {
        let name = name.to_owned();

        self.gateway()
            .scoped("seed_delivery_person", move |tx| {
                Box::pin(async move {
                    Ok(sqlx::query_scalar::<_, DeliveryPersonId>(
                        r"
                        INSERT INTO delivery_persons (name)
                        VALUES ($1)
                        RETURNING delivery_person_id
                        ",
                    )
                    .bind(&name)
                    .fetch_one(&mut **tx)
                    .await?)
                })
            })
            .await
            .unwrap()
    }

    /// Number of orders stored for `customer_id`.
    pub async fn count_orders(&self, customer_id: CustomerId) -> i64 {
        self.gateway()
            .scoped("count_orders", move |tx| {
                Box::pin(async move {
                    Ok(sqlx::query_scalar::<_, i64>(
                        "SELECT count(*) FROM orders WHERE customer_id = $1",
                    )
                    .bind(customer_id)
                    .fetch_one(&mut **tx)
                    .await?)
                })
            })
            .await
            .unwrap()
    }

    /// Number of line items stored across all orders of `customer_id`.
    pub async fn count_order_items(&self, customer_id: CustomerId) -> i64 {
        self.gateway()
            .scoped("count_order_items", move |tx| {
                Box::pin(async move {
                    Ok(sqlx::query_scalar::<_, i64>(
                        r"
                        SELECT count(*)
                        FROM order_items oi
                        JOIN orders o ON oi.order_id = o.order_id
                        WHERE o.customer_id = $1
                        ",
                    )
                    .bind(customer_id)
                    .fetch_one(&mut **tx)
                    .await?)
                })
            })
            .await
            .unwrap()
    }

    /// A restaurant with two available dishes, returned with their ids.
    pub async fn seed_menu(&self) -> (RestaurantId, MenuItemId, MenuItemId) {
        let restaurant = self.seed_restaurant("Trattoria", true).await;
        let pizza = self
            .seed_menu_item(restaurant, "Margherita", Money::from_cents(1199), true)
            .await;
        let pasta = self
            .seed_menu_item(restaurant, "Carbonara", Money::from_cents(899), true)
            .await;
        (restaurant, pizza, pasta)
    }

    /// Place a one-item order and return its id.
    pub async fn place_simple_order(
        &self,
        customer_id: CustomerId,
        restaurant_id: RestaurantId,
        menu_item_id: MenuItemId,
    ) -> OrderId {
        let order = food_delivery_ordering::models::NewOrder {
            customer_id,
            restaurant_id,
            total_amount: Money::from_cents(1199),
            items: vec![food_delivery_core::LineItem::new(
                menu_item_id,
                1,
                Money::from_cents(1199),
            )],
        };
        self.service.place_order(&order).await.unwrap()
    }
}
