//! # Bookstore Store
//!
//! The tables every service shares, owned by one [`StoreActor`].

use crate::model::{Book, Order, OrderItem, Review};
use store_actor::{Schema, StoreActor, StoreClient, Table};

/// All bookstore tables. They commit and roll back as one.
#[derive(Default)]
pub struct BookstoreTables {
    pub books: Table<Book>,
    pub orders: Table<Order>,
    pub order_items: Table<OrderItem>,
    pub reviews: Table<Review>,
}

impl Schema for BookstoreTables {
    fn commit(&mut self) {
        self.books.commit();
        self.orders.commit();
        self.order_items.commit();
        self.reviews.commit();
    }

    fn rollback(&mut self) {
        self.books.rollback();
        self.orders.rollback();
        self.order_items.rollback();
        self.reviews.rollback();
    }
}

/// Creates the store actor over empty tables, and its client.
pub fn new(buffer_size: usize) -> (StoreActor<BookstoreTables>, StoreClient<BookstoreTables>) {
    StoreActor::new(buffer_size, BookstoreTables::default())
}
