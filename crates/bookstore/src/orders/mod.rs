//! # Order Service
//!
//! Checkout and payment confirmation.
//!
//! ## Lifecycle
//!
//! 1. [`OrderService::create_order`] validates the cart, prices it against the catalog,
//!    opens a payment intent and persists the order header with its items in one
//!    transaction. The order starts `pending`. Inventory is not touched; the stock check
//!    at this point is advisory.
//! 2. [`OrderService::update_order`] confirms payment. In a single transaction it loads the
//!    order, authorizes the caller, and (unless the order is already `paid`) decrements
//!    stock for every item with [`inventory::decrement`] before flipping the status.
//!    Any item that can no longer be covered aborts the whole confirmation with
//!    [`OrderError::InsufficientStock`].
//!
//! Two orders for the last copy of a book can therefore both be created, but only one of
//! them can be confirmed.

pub mod cart;
pub mod error;

pub use error::*;

use crate::auth::Authorizer;
use crate::inventory::{self, Decrement};
use crate::model::{
    NewOrder, Order, OrderDraft, OrderId, OrderItem, OrderStatus, OrderWithItems, PlacedOrder,
    Principal,
};
use crate::payment::PaymentGateway;
use crate::store::BookstoreTables;
use async_trait::async_trait;
use cart::PricedCart;
use chrono::Utc;
use std::sync::Arc;
use store_actor::{ActorClient, FrameworkError, StoreClient, StoreError};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderService {
    store: StoreClient<BookstoreTables>,
    gateway: Arc<dyn PaymentGateway>,
    authorizer: Arc<dyn Authorizer>,
    currency: String,
}

impl OrderService {
    pub fn new(
        store: StoreClient<BookstoreTables>,
        gateway: Arc<dyn PaymentGateway>,
        authorizer: Arc<dyn Authorizer>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            store,
            gateway,
            authorizer,
            currency: currency.into(),
        }
    }

    /// Places a `pending` order for the caller and returns it with the payment client secret.
    ///
    /// # Errors
    /// - [`OrderError::InvalidCart`] for an empty cart, a zero amount, missing tax or
    ///   shipping fee, or totals that overflow.
    /// - [`OrderError::BookNotFound`], [`OrderError::InsufficientStock`] from the catalog
    ///   check.
    /// - [`OrderError::Payment`] if no payment intent could be opened. Nothing is persisted.
    #[instrument(skip(self, principal, new_order), fields(user_id = %principal.id))]
    pub async fn create_order(
        &self,
        principal: &Principal,
        new_order: NewOrder,
    ) -> Result<PlacedOrder, OrderError> {
        let cart = cart::validate(new_order)?;

        let ids = cart.book_ids();
        let books = self
            .read("load_cart_books", move |tables: &BookstoreTables| {
                ids.iter()
                    .map(|id| tables.books.get(id).cloned())
                    .collect::<Vec<_>>()
            })
            .await?;
        let priced = cart::price(&cart, books)?;
        debug!(subtotal = priced.subtotal, total = priced.total, "Cart priced");

        let intent = self
            .gateway
            .create_intent(priced.total, &self.currency)
            .await?;

        let user_id = principal.id;
        let client_secret = intent.client_secret.clone();
        let order = self
            .transact("create_order", move |tables: &mut BookstoreTables| {
                let PricedCart {
                    lines,
                    subtotal,
                    tax,
                    shipping_fee,
                    total,
                } = priced;
                if let Some(line) = lines.iter().find(|l| tables.books.get(&l.book_id).is_none()) {
                    return Err(OrderError::BookNotFound(line.book_id));
                }

                let order = tables.orders.insert(OrderDraft {
                    user_id,
                    subtotal,
                    tax,
                    shipping_fee,
                    total,
                    client_secret,
                })?;
                let mut order_items = Vec::with_capacity(lines.len());
                for line in lines {
                    order_items.push(tables.order_items.insert(line.into_draft(order.id))?);
                }
                Ok(OrderWithItems { order, order_items })
            })
            .await?;

        info!(order_id = %order.order.id, total = order.order.total, "Order created");
        Ok(PlacedOrder {
            order,
            client_secret: intent.client_secret,
        })
    }

    /// Confirms payment for an order: decrements stock for every item and marks it `paid`.
    ///
    /// Confirming an order that is already `paid` returns it unchanged.
    ///
    /// # Errors
    /// - [`OrderError::BadRequest`] if `payment_intent_id` is missing or blank.
    /// - [`OrderError::NotFound`], [`OrderError::PermissionDenied`].
    /// - [`OrderError::InsufficientStock`] if any item can no longer be covered. No stock
    ///   is taken and the order stays `pending`.
    #[instrument(skip(self, principal, payment_intent_id), fields(user_id = %principal.id))]
    pub async fn update_order(
        &self,
        principal: &Principal,
        order_id: OrderId,
        payment_intent_id: Option<String>,
    ) -> Result<OrderWithItems, OrderError> {
        let Some(payment_intent_id) = payment_intent_id.filter(|id| !id.trim().is_empty()) else {
            return Err(OrderError::BadRequest(
                "paymentIntentId is required".to_string(),
            ));
        };

        let principal = principal.clone();
        let authorizer = Arc::clone(&self.authorizer);
        let (order, newly_paid) = self
            .transact("confirm_order", move |tables: &mut BookstoreTables| {
                let order = tables
                    .orders
                    .get(&order_id)
                    .cloned()
                    .ok_or(OrderError::NotFound(order_id))?;
                if !authorizer.allows(&principal, &order.user_id) {
                    return Err(OrderError::PermissionDenied(format!(
                        "Not authorized to access {order_id}"
                    )));
                }

                let order_items = items_of(tables, order_id);
                if order.status == OrderStatus::Paid {
                    return Ok((OrderWithItems { order, order_items }, false));
                }

                for item in &order_items {
                    let outcome = inventory::decrement(tables, &item.book_id, item.amount)
                        .map_err(|e| match e {
                            StoreError::NotFound { .. } => OrderError::BookNotFound(item.book_id),
                            other => OrderError::Storage(other),
                        })?;
                    if outcome == Decrement::ZeroRows {
                        return Err(OrderError::InsufficientStock {
                            book_id: item.book_id,
                            title: item.name.clone(),
                            requested: item.amount,
                        });
                    }
                }

                let order = tables.orders.update(&order_id, |o| {
                    o.status = OrderStatus::Paid;
                    o.payment_intent_id = Some(payment_intent_id);
                    o.updated_at = Utc::now();
                    o.clone()
                })?;
                Ok((OrderWithItems { order, order_items }, true))
            })
            .await?;

        if newly_paid {
            info!(order_id = %order_id, "Order paid");
        } else {
            debug!(order_id = %order_id, "Order already paid");
        }
        Ok(order)
    }

    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn get_single_order(
        &self,
        principal: &Principal,
        order_id: OrderId,
    ) -> Result<OrderWithItems, OrderError> {
        let order = self
            .read("get_single_order", move |tables: &BookstoreTables| {
                tables
                    .orders
                    .get(&order_id)
                    .cloned()
                    .map(|order| with_items(tables, order))
            })
            .await?
            .ok_or(OrderError::NotFound(order_id))?;

        if !self.authorizer.allows(principal, &order.order.user_id) {
            return Err(OrderError::PermissionDenied(format!(
                "Not authorized to access {order_id}"
            )));
        }
        Ok(order)
    }

    /// The caller's orders, newest first.
    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn get_current_user_orders(
        &self,
        principal: &Principal,
    ) -> Result<Vec<OrderWithItems>, OrderError> {
        let user_id = principal.id;
        self.read("get_current_user_orders", move |tables: &BookstoreTables| {
            collect_orders(tables, |order| order.user_id == user_id)
        })
        .await
    }

    /// Every order, newest first. Admin only.
    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn get_all_orders(
        &self,
        principal: &Principal,
    ) -> Result<Vec<OrderWithItems>, OrderError> {
        if !principal.is_admin() {
            return Err(OrderError::PermissionDenied(
                "Not authorized to access all orders".to_string(),
            ));
        }
        self.read("get_all_orders", |tables: &BookstoreTables| {
            collect_orders(tables, |_| true)
        })
        .await
    }
}

fn items_of(tables: &BookstoreTables, order_id: OrderId) -> Vec<OrderItem> {
    let mut items: Vec<OrderItem> = tables
        .order_items
        .filter(|item| item.order_id == order_id)
        .cloned()
        .collect();
    items.sort_by_key(|item| item.id);
    items
}

fn with_items(tables: &BookstoreTables, order: Order) -> OrderWithItems {
    let order_items = items_of(tables, order.id);
    OrderWithItems { order, order_items }
}

fn collect_orders(
    tables: &BookstoreTables,
    mut keep: impl FnMut(&Order) -> bool,
) -> Vec<OrderWithItems> {
    let mut orders: Vec<Order> = tables
        .orders
        .filter(|order| keep(order))
        .cloned()
        .collect();
    orders.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    orders
        .into_iter()
        .map(|order| with_items(tables, order))
        .collect()
}

#[async_trait]
impl ActorClient<BookstoreTables> for OrderService {
    type Error = OrderError;

    fn inner(&self) -> &StoreClient<BookstoreTables> {
        &self.store
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::ActorCommunicationError(e.to_string())
    }
}
