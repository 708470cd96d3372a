//! Demo run: seed a book, place and pay for an order, review the book.

use bookstore::config::Config;
use bookstore::lifecycle::BookstoreSystem;
use bookstore::model::{BookDraft, CartItem, NewOrder, NewReview, Principal};
use store_actor::tracing::setup_tracing;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = Config::from_env();
    info!(?config, "Starting bookstore demo");
    let system = BookstoreSystem::new(&config);

    let alice = Principal::user(1);
    let admin = Principal::admin(99);

    let book = system
        .catalog
        .add_book(BookDraft::new("The Rust Programming Language", 3999, 5))
        .await?;

    let span = tracing::info_span!("checkout", user_id = %alice.id);
    let paid = async {
        let placed = system
            .orders
            .create_order(
                &alice,
                NewOrder::new(
                    vec![CartItem {
                        book_id: book.id,
                        amount: 2,
                    }],
                    640,
                    500,
                ),
            )
            .await?;
        info!(
            order_id = %placed.order.order.id,
            total = placed.order.order.total,
            client_secret = %placed.client_secret,
            "Order placed"
        );

        system
            .orders
            .update_order(
                &alice,
                placed.order.order.id,
                Some(format!("pi_{}", placed.client_secret)),
            )
            .await
    }
    .instrument(span)
    .await?;
    info!(order_id = %paid.order.id, status = %paid.order.status, "Order confirmed");

    system
        .reviews
        .create_review(
            &alice,
            NewReview {
                book_id: book.id,
                rating: 5,
                title: Some("Essential".to_string()),
                comment: None,
            },
        )
        .await?;

    let book = system.catalog.get_book(book.id).await?;
    info!(
        book_id = %book.id,
        inventory = book.inventory,
        avg_rating = book.avg_rating,
        num_of_reviews = book.num_of_reviews,
        "Book after checkout"
    );

    let all_orders = system.orders.get_all_orders(&admin).await?;
    info!(count = all_orders.len(), "Orders on record");
    println!("{}", serde_json::to_string_pretty(&all_orders)?);

    system.shutdown().await?;
    Ok(())
}
