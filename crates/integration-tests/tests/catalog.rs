//! Restaurant and menu visibility.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use food_delivery_core::Money;
use food_delivery_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_list_restaurants_only_returns_active() {
    let ctx = TestContext::new().await;
    let open = ctx.seed_restaurant("Open Kitchen", true).await;
    let closed = ctx.seed_restaurant("Closed Kitchen", false).await;

    let restaurants = ctx.service.list_restaurants().await.unwrap();

    assert!(restaurants.iter().all(|r| r.is_active));
    assert!(restaurants.iter().any(|r| r.id == open));
    assert!(restaurants.iter().all(|r| r.id != closed));
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_list_menu_items_only_returns_available_items_of_that_restaurant() {
    let ctx = TestContext::new().await;
    let (restaurant, pizza, pasta) = ctx.seed_menu().await;
    let sold_out = ctx
        .seed_menu_item(restaurant, "Tiramisu", Money::from_cents(650), false)
        .await;
    let (_, other_pizza, _) = ctx.seed_menu().await;

    let items = ctx.service.list_menu_items(restaurant).await.unwrap();
    let ids: Vec<_> = items.iter().map(|item| item.id).collect();

    assert_eq!(ids, vec![pizza, pasta]);
    assert!(!ids.contains(&sold_out));
    assert!(!ids.contains(&other_pizza));
    assert!(items.iter().all(|item| item.is_available));
    assert_eq!(items[0].price, Money::from_cents(1199));
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_menu_of_unknown_restaurant_is_empty() {
    let ctx = TestContext::new().await;

    let items = ctx
        .service
        .list_menu_items(food_delivery_integration_tests::MISSING_ID.into())
        .await
        .unwrap();

    assert!(items.is_empty());
}
