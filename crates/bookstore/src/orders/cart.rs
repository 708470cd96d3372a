//! Cart validation and pricing. Pure functions; nothing here touches the store.

use crate::inventory::has_available_stock;
use crate::model::{Book, BookId, CartItem, NewOrder, OrderId, OrderItemDraft};
use crate::orders::OrderError;

/// A validated cart, before any book has been looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedCart {
    pub items: Vec<CartItem>,
    pub tax: u64,
    pub shipping_fee: u64,
}

impl CheckedCart {
    pub fn book_ids(&self) -> Vec<BookId> {
        self.items.iter().map(|item| item.book_id).collect()
    }
}

/// Point-in-time copy of a book for one cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSnapshot {
    pub book_id: BookId,
    pub name: String,
    pub price: u64,
    pub thumbnail: Option<String>,
    pub amount: u32,
}

impl LineSnapshot {
    pub fn into_draft(self, order_id: OrderId) -> OrderItemDraft {
        OrderItemDraft {
            order_id,
            book_id: self.book_id,
            name: self.name,
            price: self.price,
            thumbnail: self.thumbnail,
            amount: self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedCart {
    pub lines: Vec<LineSnapshot>,
    pub subtotal: u64,
    pub tax: u64,
    pub shipping_fee: u64,
    pub total: u64,
}

pub fn validate(new_order: NewOrder) -> Result<CheckedCart, OrderError> {
    if new_order.cart_items.is_empty() {
        return Err(OrderError::InvalidCart("No cart items".to_string()));
    }
    let (Some(tax), Some(shipping_fee)) = (new_order.tax, new_order.shipping_fee) else {
        return Err(OrderError::InvalidCart(
            "Please provide tax and shipping fee".to_string(),
        ));
    };
    if let Some(item) = new_order.cart_items.iter().find(|item| item.amount == 0) {
        return Err(OrderError::InvalidCart(format!(
            "Amount for {} must be positive",
            item.book_id
        )));
    }
    Ok(CheckedCart {
        items: new_order.cart_items,
        tax,
        shipping_fee,
    })
}

/// Prices a cart against the books loaded for it (`books[i]` belongs to `cart.items[i]`).
///
/// The stock comparison is advisory; nothing is reserved.
pub fn price(cart: &CheckedCart, books: Vec<Option<Book>>) -> Result<PricedCart, OrderError> {
    let overflow = || OrderError::InvalidCart("Order total is too large".to_string());

    let mut lines = Vec::with_capacity(cart.items.len());
    let mut subtotal: u64 = 0;
    for (item, book) in cart.items.iter().zip(books) {
        let book = book.ok_or(OrderError::BookNotFound(item.book_id))?;
        if !has_available_stock(&book, item.amount) {
            return Err(OrderError::InsufficientStock {
                book_id: book.id,
                title: book.title,
                requested: item.amount,
            });
        }
        let line_total = book
            .price
            .checked_mul(u64::from(item.amount))
            .ok_or_else(overflow)?;
        subtotal = subtotal.checked_add(line_total).ok_or_else(overflow)?;
        lines.push(LineSnapshot {
            book_id: book.id,
            name: book.title,
            price: book.price,
            thumbnail: book.thumbnail,
            amount: item.amount,
        });
    }

    let total = subtotal
        .checked_add(cart.tax)
        .and_then(|t| t.checked_add(cart.shipping_fee))
        .ok_or_else(overflow)?;

    Ok(PricedCart {
        lines,
        subtotal,
        tax: cart.tax,
        shipping_fee: cart.shipping_fee,
        total,
    })
}
