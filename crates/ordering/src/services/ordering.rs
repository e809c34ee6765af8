//! Ordering service.
//!
//! Each method is one logical operation and runs in its own scoped
//! acquisition. Nothing is cached between calls; the service only holds the
//! gateway and its configuration.

use thiserror::Error;
use tracing::{info, instrument};

use food_delivery_core::{
    Cart, CartError, CustomerId, DeliveryId, DeliveryPersonId, DeliveryStatus, Email, OrderId, PaymentId,
    RestaurantId, ReviewId,
};

use crate::db::{
    CustomerRepository, DeliveryRepository, Gateway, GatewayError, OrderRepository,
    PaymentRepository, RestaurantRepository, ReviewRepository,
};
use crate::models::{
    Customer, CustomerOrder, Delivery, MenuItem, NewCustomer, NewOrder, NewPayment, NewReview,
    Order, OrderItem, Payment, Restaurant, Review,
};

/// Errors returned by [`OrderingService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The cart cannot be turned into a consistent order.
    #[error("invalid cart: {0}")]
    Cart(#[from] CartError),
}

impl ServiceError {
    /// Whether the store rejected the write on a unique constraint, such as
    /// a second customer with the same email.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::Gateway(e) if e.is_unique_violation())
    }

    /// Whether the store rejected the write because a referenced row does
    /// not exist.
    #[must_use]
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::Gateway(e) if e.is_foreign_key_violation())
    }
}

/// Entry point for callers of the ordering core.
#[derive(Debug, Clone)]
pub struct OrderingService {
    gateway: Gateway,
}

impl OrderingService {
    #[must_use]
    pub const fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    #[must_use]
    pub const fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Register a customer. The password must already be hashed.
    ///
    /// # Errors
    ///
    /// Fails if the insert is rejected; a duplicate email is reported as a
    /// unique violation (see [`ServiceError::is_unique_violation`]).
    #[instrument(skip(self, customer), fields(email = %customer.email))]
    pub async fn register_customer(
        &self,
        customer: &NewCustomer,
    ) -> Result<CustomerId, ServiceError> {
        let id = CustomerRepository::new(&self.gateway).create(customer).await?;
        info!(customer_id = %id, "customer registered");
        Ok(id)
    }

    /// Look up a customer by exact email.
    ///
    /// # Errors
    ///
    /// Fails if the query fails or the stored row cannot be parsed.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn find_customer(&self, email: &Email) -> Result<Option<Customer>, ServiceError> {
        Ok(CustomerRepository::new(&self.gateway)
            .get_by_email(email)
            .await?)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List active restaurants.
    ///
    /// # Errors
    ///
    /// Fails if the query fails.
    #[instrument(skip(self))]
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ServiceError> {
        Ok(RestaurantRepository::new(&self.gateway).list_active().await?)
    }

    /// List the available menu items of a restaurant.
    ///
    /// # Errors
    ///
    /// Fails if the query fails.
    #[instrument(skip(self), fields(restaurant_id = %restaurant_id))]
    pub async fn list_menu_items(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<MenuItem>, ServiceError> {
        Ok(RestaurantRepository::new(&self.gateway)
            .list_menu_items(restaurant_id)
            .await?)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Place an order with all of its line items atomically.
    ///
    /// # Errors
    ///
    /// Fails if any line item is invalid or any insert is rejected. Nothing
    /// is persisted in that case.
    #[instrument(
        skip(self, order),
        fields(
            customer_id = %order.customer_id,
            restaurant_id = %order.restaurant_id,
            items = order.items.len(),
        )
    )]
    pub async fn place_order(&self, order: &NewOrder) -> Result<OrderId, ServiceError> {
        let id = OrderRepository::new(&self.gateway).create(order).await?;
        info!(order_id = %id, total = %order.total_amount, "order placed");
        Ok(id)
    }

    /// Place an order for everything in `cart`, at the prices captured when
    /// each item was added.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::EmptyCart` or `ServiceError::Cart` without
    /// touching the store if the cart holds nothing or its total or
    /// quantities do not fit an order; otherwise fails as
    /// [`Self::place_order`] does.
    #[instrument(skip(self, cart), fields(customer_id = %customer_id, lines = cart.len()))]
    pub async fn checkout(
        &self,
        customer_id: CustomerId,
        cart: &Cart,
    ) -> Result<OrderId, ServiceError> {
        let Some(restaurant_id) = cart.restaurant_id().filter(|_| !cart.is_empty()) else {
            return Err(ServiceError::EmptyCart);
        };

        let order = NewOrder {
            customer_id,
            restaurant_id,
            total_amount: cart.total().map_err(CartError::from)?,
            items: cart.line_items()?,
        };

        self.place_order(&order).await
    }

    /// List a customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Fails if the query fails.
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn list_customer_orders(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<CustomerOrder>, ServiceError> {
        Ok(OrderRepository::new(&self.gateway)
            .list_for_customer(customer_id)
            .await?)
    }

    /// # Errors
    ///
    /// Fails if the query fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>, ServiceError> {
        Ok(OrderRepository::new(&self.gateway).get(order_id).await?)
    }

    /// # Errors
    ///
    /// Fails if the query fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn list_order_items(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderItem>, ServiceError> {
        Ok(OrderRepository::new(&self.gateway)
            .list_items(order_id)
            .await?)
    }

    // =========================================================================
    // Reviews and payments
    // =========================================================================

    /// Record a review. Several reviews per order are allowed.
    ///
    /// # Errors
    ///
    /// Fails if the insert is rejected.
    #[instrument(
        skip(self, review),
        fields(order_id = %review.order_id, rating = review.rating)
    )]
    pub async fn add_review(&self, review: &NewReview) -> Result<ReviewId, ServiceError> {
        let id = ReviewRepository::new(&self.gateway).create(review).await?;
        info!(review_id = %id, "review added");
        Ok(id)
    }

    /// # Errors
    ///
    /// Fails if the query fails.
    #[instrument(skip(self), fields(restaurant_id = %restaurant_id))]
    pub async fn list_reviews(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Review>, ServiceError> {
        Ok(ReviewRepository::new(&self.gateway)
            .list_for_restaurant(restaurant_id)
            .await?)
    }

    /// Record a payment. The amount is not compared to the order total.
    ///
    /// # Errors
    ///
    /// Fails if the insert is rejected.
    #[instrument(
        skip(self, payment),
        fields(order_id = %payment.order_id, amount = %payment.amount)
    )]
    pub async fn process_payment(&self, payment: &NewPayment) -> Result<PaymentId, ServiceError> {
        let id = PaymentRepository::new(&self.gateway).create(payment).await?;
        info!(payment_id = %id, method = %payment.payment_method, "payment recorded");
        Ok(id)
    }

    /// # Errors
    ///
    /// Fails if the query fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn list_payments(&self, order_id: OrderId) -> Result<Vec<Payment>, ServiceError> {
        Ok(PaymentRepository::new(&self.gateway)
            .list_for_order(order_id)
            .await?)
    }

    // =========================================================================
    // Deliveries
    // =========================================================================

    /// Assign a delivery person to an order. Always creates a new delivery.
    ///
    /// # Errors
    ///
    /// Fails if the insert is rejected.
    #[instrument(
        skip(self),
        fields(order_id = %order_id, delivery_person_id = %delivery_person_id)
    )]
    pub async fn assign_delivery(
        &self,
        order_id: OrderId,
        delivery_person_id: DeliveryPersonId,
    ) -> Result<DeliveryId, ServiceError> {
        let id = DeliveryRepository::new(&self.gateway)
            .assign(order_id, delivery_person_id)
            .await?;
        info!(delivery_id = %id, "delivery assigned");
        Ok(id)
    }

    /// Set a delivery's status and return the number of rows changed.
    ///
    /// Zero means no delivery has that id. A `delivered` status stamps the
    /// delivered time; other statuses keep whatever was stamped before.
    ///
    /// # Errors
    ///
    /// Fails if the update fails.
    #[instrument(skip(self), fields(delivery_id = %delivery_id, status = %status))]
    pub async fn update_delivery_status(
        &self,
        delivery_id: DeliveryId,
        status: &DeliveryStatus,
    ) -> Result<u64, ServiceError> {
        let updated = DeliveryRepository::new(&self.gateway)
            .update_status(delivery_id, status)
            .await?;
        info!(updated, "delivery status set");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Fails if the query fails.
    #[instrument(skip(self), fields(delivery_id = %delivery_id))]
    pub async fn get_delivery(
        &self,
        delivery_id: DeliveryId,
    ) -> Result<Option<Delivery>, ServiceError> {
        Ok(DeliveryRepository::new(&self.gateway)
            .get(delivery_id)
            .await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use food_delivery_core::{CartItem, MenuItemId, Money};

    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::ConnectError;

    fn offline_service() -> OrderingService {
        OrderingService::new(Gateway::new(DatabaseConfig::from_map(&HashMap::new())))
    }

    #[tokio::test]
    async fn test_checkout_rejects_empty_cart() {
        let service = offline_service();

        let err = service
            .checkout(CustomerId::new(1), &Cart::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::EmptyCart));
    }

    #[tokio::test]
    async fn test_checkout_rejects_cart_emptied_by_removal() {
        let service = offline_service();
        let mut cart = Cart::new();
        let item = CartItem::new(MenuItemId::new(7), "Margherita", Money::from_cents(1199));
        cart.add(RestaurantId::new(1), item).unwrap();
        cart.remove(MenuItemId::new(7));

        let err = service
            .checkout(CustomerId::new(1), &cart)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::EmptyCart));
    }

    #[tokio::test]
    async fn test_checkout_with_items_reaches_the_gateway() {
        let service = offline_service();
        let mut cart = Cart::new();
        let item = CartItem::new(MenuItemId::new(7), "Margherita", Money::from_cents(1199));
        cart.add(RestaurantId::new(1), item).unwrap();

        let err = service
            .checkout(CustomerId::new(1), &cart)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Gateway(GatewayError::Connection(ConnectError::Config(_)))
        ));
    }

    #[test]
    fn test_empty_cart_is_not_a_constraint_violation() {
        assert!(!ServiceError::EmptyCart.is_unique_violation());
        assert!(!ServiceError::EmptyCart.is_foreign_key_violation());
    }

    #[tokio::test]
    async fn test_checkout_rejects_cart_that_cannot_fit_an_order() {
        let service = offline_service();
        let cart: Cart = serde_json::from_value(serde_json::json!({
            "restaurant_id": 1,
            "items": [{
                "menu_item_id": 7,
                "name": "Napkin",
                "unit_price": "0.01",
                "quantity": 3_000_000_000_u32,
            }],
        }))
        .unwrap();

        let err = service
            .checkout(CustomerId::new(1), &cart)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Cart(CartError::QuantityTooLarge { .. })
        ));
    }
}
