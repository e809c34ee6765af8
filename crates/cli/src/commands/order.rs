//! Order, review and payment commands.

use std::str::FromStr;

use serde::Serialize;
use serde_json::json;

use food_delivery_core::{
    CartItem, CustomerId, LineItem, MenuItemId, Money, MoneyError, OrderId, RestaurantId,
};
use food_delivery_ordering::OrderingService;
use food_delivery_ordering::models::{NewOrder, NewPayment, NewReview, Order, OrderItem, Payment};

use super::{CommandError, print_json};

/// A `menu_item_id:quantity:unit_price` argument.
///
/// The quantity is bounded by what an order line can store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemArg {
    pub menu_item_id: MenuItemId,
    pub quantity: i32,
    pub price: Money,
}

impl LineItemArg {
    fn subtotal(&self) -> Result<Money, MoneyError> {
        self.price.times(self.quantity.unsigned_abs())
    }

    const fn to_line_item(self) -> LineItem {
        LineItem::new(self.menu_item_id, self.quantity, self.price)
    }
}

impl FromStr for LineItemArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (Some(menu_item_id), Some(quantity), Some(price), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("expected menu_item_id:quantity:price, got '{s}'"));
        };

        let quantity = quantity
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid quantity '{quantity}': {e}"))?;
        let quantity = i32::try_from(quantity).map_err(|_| {
            format!(
                "quantity {quantity} exceeds the maximum of {}",
                CartItem::MAX_QUANTITY
            )
        })?;

        Ok(Self {
            menu_item_id: menu_item_id
                .parse()
                .map_err(|e| format!("invalid menu item id '{menu_item_id}': {e}"))?,
            quantity,
            price: price.parse().map_err(|e| format!("{e}"))?,
        })
    }
}

/// Sum of `price × quantity` over `items`.
fn order_total(items: &[LineItemArg]) -> Result<Money, MoneyError> {
    items
        .iter()
        .try_fold(Money::ZERO, |total, item| total.checked_add(item.subtotal()?))
}

/// Order with everything recorded against it.
#[derive(Serialize)]
struct OrderDetail {
    #[serde(flatten)]
    order: Order,
    items: Vec<OrderItem>,
    payments: Vec<Payment>,
}

/// Place an order from command-line line items and print the new id.
///
/// The total is the sum of `price × quantity` over the items.
///
/// # Errors
///
/// Returns `CommandError::Amount` if the total overflows, before anything
/// is sent to the store. Returns an error if any item is rejected; nothing
/// is saved in that case.
pub async fn place(
    service: &OrderingService,
    customer_id: CustomerId,
    restaurant_id: RestaurantId,
    items: &[LineItemArg],
) -> Result<(), CommandError> {
    let order = NewOrder {
        customer_id,
        restaurant_id,
        total_amount: order_total(items)?,
        items: items.iter().copied().map(LineItemArg::to_line_item).collect(),
    };

    let id = service.place_order(&order).await?;
    print_json(&json!({ "order_id": id, "total_amount": order.total_amount }))
}

/// Print a customer's order history.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub async fn list(service: &OrderingService, customer_id: CustomerId) -> Result<(), CommandError> {
    let orders = service.list_customer_orders(customer_id).await?;
    print_json(&orders)
}

/// Print an order with its line items and payments.
///
/// # Errors
///
/// Returns `CommandError::NotFound` if the order does not exist.
pub async fn show(service: &OrderingService, order_id: OrderId) -> Result<(), CommandError> {
    let order = service
        .get_order(order_id)
        .await?
        .ok_or_else(|| CommandError::NotFound(format!("order {order_id}")))?;

    let detail = OrderDetail {
        order,
        items: service.list_order_items(order_id).await?,
        payments: service.list_payments(order_id).await?,
    };

    print_json(&detail)
}

/// Add a review and print its id.
///
/// # Errors
///
/// Returns `CommandError::InvalidArgument` for a rating outside 1 to 5, or
/// an error if the insert is rejected.
pub async fn review(service: &OrderingService, review: &NewReview) -> Result<(), CommandError> {
    if !(1..=5).contains(&review.rating) {
        return Err(CommandError::InvalidArgument(format!(
            "rating must be between 1 and 5 (got {})",
            review.rating
        )));
    }

    let id = service.add_review(review).await?;
    print_json(&json!({ "review_id": id }))
}

/// Record a payment and print its id.
///
/// # Errors
///
/// Returns an error if the insert is rejected.
pub async fn pay(service: &OrderingService, payment: &NewPayment) -> Result<(), CommandError> {
    let id = service.process_payment(payment).await?;
    print_json(&json!({ "payment_id": id }))
}
