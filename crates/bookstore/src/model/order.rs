/// Represents a customer order and its line items.
///
/// # Store
/// [`Order`] and [`OrderItem`] implement the [`Record`](store_actor::Record) trait and live
/// in separate tables; an order's items are the `order_items` rows carrying its id.
///
/// An order is created `Pending` and moves to `Paid` exactly once. `Paid` is terminal.
use crate::model::{BookId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use store_actor::Record;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Type-safe identifier for order line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderItemId(pub u32);

impl From<u32> for OrderItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Paid => write!(f, "paid"),
        }
    }
}

/// All money fields are integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub subtotal: u64,
    pub tax: u64,
    pub shipping_fee: u64,
    pub total: u64,
    pub client_secret: String,
    pub payment_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Totals are computed by the order service before the draft is built.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub user_id: UserId,
    pub subtotal: u64,
    pub tax: u64,
    pub shipping_fee: u64,
    pub total: u64,
    pub client_secret: String,
}

impl Record for Order {
    type Id = OrderId;
    type Draft = OrderDraft;
    const TABLE: &'static str = "orders";

    fn from_draft(id: OrderId, draft: OrderDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: draft.user_id,
            status: OrderStatus::Pending,
            subtotal: draft.subtotal,
            tax: draft.tax,
            shipping_fee: draft.shipping_fee,
            total: draft.total,
            client_secret: draft.client_secret,
            payment_intent_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &OrderId {
        &self.id
    }
}

/// A line item. `name`, `price` and `thumbnail` are snapshots of the book at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub book_id: BookId,
    pub name: String,
    pub price: u64,
    pub thumbnail: Option<String>,
    pub amount: u32,
}

#[derive(Debug, Clone)]
pub struct OrderItemDraft {
    pub order_id: OrderId,
    pub book_id: BookId,
    pub name: String,
    pub price: u64,
    pub thumbnail: Option<String>,
    pub amount: u32,
}

impl Record for OrderItem {
    type Id = OrderItemId;
    type Draft = OrderItemDraft;
    const TABLE: &'static str = "order_items";

    fn from_draft(id: OrderItemId, draft: OrderItemDraft) -> Self {
        Self {
            id,
            order_id: draft.order_id,
            book_id: draft.book_id,
            name: draft.name,
            price: draft.price,
            thumbnail: draft.thumbnail,
            amount: draft.amount,
        }
    }

    fn id(&self) -> &OrderItemId {
        &self.id
    }
}

/// An order together with its line items, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub order_items: Vec<OrderItem>,
}

impl OrderWithItems {
    /// Checks the money invariants: subtotal is the sum of `price * amount` over the items,
    /// and total is subtotal plus tax plus shipping fee.
    pub fn is_balanced(&self) -> bool {
        let subtotal = self
            .order_items
            .iter()
            .try_fold(0u64, |acc, item| {
                item.price
                    .checked_mul(u64::from(item.amount))
                    .and_then(|line| acc.checked_add(line))
            });
        let total = self
            .order
            .subtotal
            .checked_add(self.order.tax)
            .and_then(|t| t.checked_add(self.order.shipping_fee));
        subtotal == Some(self.order.subtotal) && total == Some(self.order.total)
    }
}

/// One cart line submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub book_id: BookId,
    pub amount: u32,
}

/// Payload for placing an order. `tax` and `shipping_fee` are required; they are optional
/// here so a missing value can be reported instead of rejected by the decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub cart_items: Vec<CartItem>,
    pub tax: Option<u64>,
    pub shipping_fee: Option<u64>,
}

impl NewOrder {
    pub fn new(cart_items: Vec<CartItem>, tax: u64, shipping_fee: u64) -> Self {
        Self {
            cart_items,
            tax: Some(tax),
            shipping_fee: Some(shipping_fee),
        }
    }
}

/// Result of a successful order placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order: OrderWithItems,
    pub client_secret: String,
}
