//! Order placement atomicity and order history.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use food_delivery_core::{Cart, CartItem, CustomerId, LineItem, MenuItemId, Money, RestaurantId};
use food_delivery_ordering::models::NewOrder;
use food_delivery_ordering::{GatewayError, ServiceError};
use food_delivery_integration_tests::{MISSING_ID, TestContext};

// =============================================================================
// Placement
// =============================================================================

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_place_order_writes_one_order_and_every_item_in_order() {
    let ctx = TestContext::new().await;
    let customer = ctx.register_customer("Bob").await;
    let (restaurant, pizza, pasta) = ctx.seed_menu().await;

    let order = NewOrder {
        customer_id: customer,
        restaurant_id: restaurant,
        total_amount: Money::from_cents(3297),
        items: vec![
            LineItem::new(pizza, 2, Money::from_cents(1199)),
            LineItem::new(pasta, 1, Money::from_cents(899)),
            LineItem::new(pizza, 1, Money::from_cents(999)),
        ],
    };
    let order_id = ctx.service.place_order(&order).await.unwrap();

    assert_eq!(ctx.count_orders(customer).await, 1);
    assert_eq!(ctx.count_order_items(customer).await, 3);

    let stored = ctx.service.get_order(order_id).await.unwrap().unwrap();
    assert_eq!(stored.customer_id, customer);
    assert_eq!(stored.restaurant_id, restaurant);
    assert_eq!(stored.total_amount, Money::from_cents(3297));

    let items = ctx.service.list_order_items(order_id).await.unwrap();
    let lines: Vec<_> = items
        .iter()
        .map(|item| (item.order_id, item.menu_item_id, item.quantity, item.item_price))
        .collect();
    assert_eq!(
        lines,
        vec![
            (order_id, pizza, 2, Money::from_cents(1199)),
            (order_id, pasta, 1, Money::from_cents(899)),
            (order_id, pizza, 1, Money::from_cents(999)),
        ]
    );
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_place_order_with_no_items_is_accepted() {
    let ctx = TestContext::new().await;
    let customer = ctx.register_customer("Empty").await;
    let restaurant = ctx.seed_restaurant("Quiet Diner", true).await;

    let order = NewOrder {
        customer_id: customer,
        restaurant_id: restaurant,
        total_amount: Money::ZERO,
        items: Vec::new(),
    };
    let order_id = ctx.service.place_order(&order).await.unwrap();

    assert_eq!(ctx.count_orders(customer).await, 1);
    assert!(ctx.service.list_order_items(order_id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_total_is_stored_without_reconciliation() {
    let ctx = TestContext::new().await;
    let customer = ctx.register_customer("Generous").await;
    let (restaurant, pizza, _) = ctx.seed_menu().await;

    let order = NewOrder {
        customer_id: customer,
        restaurant_id: restaurant,
        total_amount: Money::from_cents(100_000),
        items: vec![LineItem::new(pizza, 1, Money::from_cents(1199))],
    };
    let order_id = ctx.service.place_order(&order).await.unwrap();

    let stored = ctx.service.get_order(order_id).await.unwrap().unwrap();
    assert_eq!(stored.total_amount, Money::from_cents(100_000));
}

// =============================================================================
// Atomicity
// =============================================================================

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_unknown_restaurant_rolls_back_everything() {
    let ctx = TestContext::new().await;
    let customer = ctx.register_customer("Carol").await;
    let (_, pizza, _) = ctx.seed_menu().await;

    let order = NewOrder {
        customer_id: customer,
        restaurant_id: RestaurantId::new(MISSING_ID),
        total_amount: Money::from_cents(1199),
        items: vec![LineItem::new(pizza, 1, Money::from_cents(1199))],
    };
    let err = ctx.service.place_order(&order).await.unwrap_err();

    assert!(matches!(err, ServiceError::Gateway(GatewayError::Statement(_))));
    assert!(err.is_foreign_key_violation());
    assert_eq!(ctx.count_orders(customer).await, 0);
    assert_eq!(ctx.count_order_items(customer).await, 0);
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_failing_later_line_item_rolls_back_order_and_earlier_items() {
    let ctx = TestContext::new().await;
    let customer = ctx.register_customer("Dave").await;
    let (restaurant, pizza, pasta) = ctx.seed_menu().await;

    let order = NewOrder {
        customer_id: customer,
        restaurant_id: restaurant,
        total_amount: Money::from_cents(2098),
        items: vec![
            LineItem::new(pizza, 1, Money::from_cents(1199)),
            LineItem::new(pasta, 1, Money::from_cents(899)),
            LineItem::new(MenuItemId::new(MISSING_ID), 1, Money::from_cents(100)),
        ],
    };
    let err = ctx.service.place_order(&order).await.unwrap_err();

    assert!(err.is_foreign_key_violation());
    assert_eq!(ctx.count_orders(customer).await, 0);
    assert_eq!(ctx.count_order_items(customer).await, 0);
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_invalid_line_item_rolls_back_and_reports_position() {
    let ctx = TestContext::new().await;
    let customer = ctx.register_customer("Erin").await;
    let (restaurant, pizza, pasta) = ctx.seed_menu().await;

    let order = NewOrder {
        customer_id: customer,
        restaurant_id: restaurant,
        total_amount: Money::from_cents(1199),
        items: vec![
            LineItem::new(pizza, 1, Money::from_cents(1199)),
            LineItem::new(pasta, 0, Money::from_cents(899)),
        ],
    };
    let err = ctx.service.place_order(&order).await.unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Gateway(GatewayError::InvalidLineItem { index: 1, .. })
    ));
    assert_eq!(ctx.count_orders(customer).await, 0);
    assert_eq!(ctx.count_order_items(customer).await, 0);
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_service_stays_usable_after_a_failed_placement() {
    let ctx = TestContext::new().await;
    let customer = ctx.register_customer("Frank").await;
    let (restaurant, pizza, _) = ctx.seed_menu().await;

    let bad = NewOrder {
        customer_id: customer,
        restaurant_id: RestaurantId::new(MISSING_ID),
        total_amount: Money::ZERO,
        items: Vec::new(),
    };
    ctx.service.place_order(&bad).await.unwrap_err();

    ctx.place_simple_order(customer, restaurant, pizza).await;
    assert_eq!(ctx.count_orders(customer).await, 1);
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_checkout_places_cart_contents_at_captured_prices() {
    let ctx = TestContext::new().await;
    let customer = ctx.register_customer("Grace").await;
    let (restaurant, pizza, pasta) = ctx.seed_menu().await;

    let mut cart = Cart::new();
    cart.add(restaurant, CartItem::new(pizza, "Margherita", Money::from_cents(1199)))
        .unwrap();
    cart.add(restaurant, CartItem::new(pasta, "Carbonara", Money::from_cents(899)))
        .unwrap();
    cart.add(restaurant, CartItem::new(pizza, "Margherita", Money::from_cents(1199)))
        .unwrap();

    let order_id = ctx.service.checkout(customer, &cart).await.unwrap();

    let order = ctx.service.get_order(order_id).await.unwrap().unwrap();
    assert_eq!(order.total_amount, Money::from_cents(3297));
    assert_eq!(order.restaurant_id, restaurant);

    let items = ctx.service.list_order_items(order_id).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!((items[0].menu_item_id, items[0].quantity), (pizza, 2));
    assert_eq!((items[1].menu_item_id, items[1].quantity), (pasta, 1));
}

// =============================================================================
// Order history
// =============================================================================

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_alice_orders_two_dishes_and_sees_one_order() {
    let ctx = TestContext::new().await;
    let alice = ctx.register_customer("Alice").await;
    let (restaurant, pizza, pasta) = ctx.seed_menu().await;

    let order = NewOrder {
        customer_id: alice,
        restaurant_id: restaurant,
        total_amount: Money::from_cents(2098),
        items: vec![
            LineItem::new(pizza, 1, Money::from_cents(1199)),
            LineItem::new(pasta, 1, Money::from_cents(899)),
        ],
    };
    let order_id = ctx.service.place_order(&order).await.unwrap();

    let restaurant_name = ctx
        .service
        .list_restaurants()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.id == restaurant)
        .unwrap()
        .name;

    let orders = ctx.service.list_customer_orders(alice).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order.id, order_id);
    assert_eq!(orders[0].order.total_amount, Money::from_cents(2098));
    assert_eq!(orders[0].restaurant_name, restaurant_name);
    assert_eq!(orders[0].delivery_status, None);
    assert_eq!(orders[0].delivery_person_name, None);
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_customer_orders_are_newest_first_with_delivery_details() {
    let ctx = TestContext::new().await;
    let customer = ctx.register_customer("Heidi").await;
    let (restaurant, pizza, _) = ctx.seed_menu().await;
    let courier = ctx.seed_delivery_person("Ivan").await;

    let first = ctx.place_simple_order(customer, restaurant, pizza).await;
    let second = ctx.place_simple_order(customer, restaurant, pizza).await;
    ctx.service.assign_delivery(first, courier).await.unwrap();

    let orders = ctx.service.list_customer_orders(customer).await.unwrap();
    let ids: Vec<_> = orders.iter().map(|o| o.order.id).collect();
    assert_eq!(ids, vec![second, first]);

    assert_eq!(orders[0].delivery_status, None);
    assert_eq!(orders[1].delivery_status.as_deref(), Some("pending"));
    assert_eq!(orders[1].delivery_person_name.as_deref(), Some("Ivan"));
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_customer_without_orders_has_empty_history() {
    let ctx = TestContext::new().await;

    let orders = ctx
        .service
        .list_customer_orders(CustomerId::new(MISSING_ID))
        .await
        .unwrap();

    assert!(orders.is_empty());
}
