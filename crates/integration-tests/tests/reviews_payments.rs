//! Reviews and payments, which are recorded as given.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use food_delivery_core::Money;
use food_delivery_ordering::models::{NewPayment, NewReview};
use food_delivery_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_an_order_can_be_reviewed_more_than_once() {
    let ctx = TestContext::new().await;
    let customer = ctx.register_customer("Tess").await;
    let (restaurant, pizza, _) = ctx.seed_menu().await;
    let order_id = ctx.place_simple_order(customer, restaurant, pizza).await;

    let review = NewReview {
        order_id,
        customer_id: customer,
        restaurant_id: restaurant,
        rating: 5,
        comments: Some("Great crust".to_owned()),
    };
    let first = ctx.service.add_review(&review).await.unwrap();
    let second = ctx
        .service
        .add_review(&NewReview {
            rating: 2,
            comments: None,
            ..review.clone()
        })
        .await
        .unwrap();
    assert_ne!(first, second);

    let reviews = ctx.service.list_reviews(restaurant).await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].id, second);
    assert_eq!(reviews[0].comments, None);
    assert_eq!(reviews[1].id, first);
    assert_eq!(reviews[1].comments.as_deref(), Some("Great crust"));
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_an_order_can_be_paid_more_than_once() {
    let ctx = TestContext::new().await;
    let customer = ctx.register_customer("Uma").await;
    let (restaurant, pizza, _) = ctx.seed_menu().await;
    let order_id = ctx.place_simple_order(customer, restaurant, pizza).await;

    let card = NewPayment {
        order_id,
        amount: Money::from_cents(1199),
        payment_method: "card".to_owned(),
    };
    let cash = NewPayment {
        order_id,
        amount: Money::from_cents(500),
        payment_method: "cash".to_owned(),
    };
    let first = ctx.service.process_payment(&card).await.unwrap();
    let second = ctx.service.process_payment(&cash).await.unwrap();

    let payments = ctx.service.list_payments(order_id).await.unwrap();
    let recorded: Vec<_> = payments
        .iter()
        .map(|p| (p.id, p.amount, p.payment_method.as_str()))
        .collect();
    assert_eq!(
        recorded,
        vec![
            (first, Money::from_cents(1199), "card"),
            (second, Money::from_cents(500), "cash"),
        ]
    );
}
