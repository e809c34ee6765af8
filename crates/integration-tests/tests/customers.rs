//! Customer registration and lookup against a live database.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use food_delivery_ordering::models::Customer;
use food_delivery_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_register_then_lookup_returns_same_fields() {
    let ctx = TestContext::new().await;
    let input = TestContext::new_customer("Alice");

    let id = ctx.service.register_customer(&input).await.unwrap();
    let found = ctx.service.find_customer(&input.email).await.unwrap();

    assert_eq!(
        found,
        Some(Customer {
            id,
            name: input.name.clone(),
            phone: input.phone.clone(),
            address: input.address.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
        })
    );
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_lookup_unknown_email_is_none() {
    let ctx = TestContext::new().await;

    let found = ctx
        .service
        .find_customer(&TestContext::unique_email())
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DB_* env vars)"]
async fn test_duplicate_email_is_a_unique_violation() {
    let ctx = TestContext::new().await;
    let input = TestContext::new_customer("Alice");
    ctx.service.register_customer(&input).await.unwrap();

    let mut again = TestContext::new_customer("Alice Again");
    again.email = input.email.clone();
    let err = ctx.service.register_customer(&again).await.unwrap_err();

    assert!(err.is_unique_violation());
    assert!(!err.is_foreign_key_violation());

    let found = ctx.service.find_customer(&input.email).await.unwrap().unwrap();
    assert_eq!(found.name, "Alice");
}
