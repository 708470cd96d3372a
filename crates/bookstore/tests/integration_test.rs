use bookstore::config::Config;
use bookstore::lifecycle::BookstoreSystem;
use bookstore::model::{
    Book, BookDraft, BookId, CartItem, NewOrder, NewReview, OrderId, OrderStatus, Principal,
    ReviewId, ReviewPatch,
};
use bookstore::orders::OrderError;
use bookstore::reviews::ReviewError;
use bookstore::ErrorKind;

fn start() -> BookstoreSystem {
    BookstoreSystem::new(&Config::default())
}

async fn seed(system: &BookstoreSystem, title: &str, price: u64, inventory: u32) -> Book {
    system
        .catalog
        .add_book(BookDraft::new(title, price, inventory))
        .await
        .unwrap()
}

fn cart(book_id: BookId, amount: u32, tax: u64, shipping_fee: u64) -> NewOrder {
    NewOrder::new(vec![CartItem { book_id, amount }], tax, shipping_fee)
}

fn review_of(book_id: BookId, rating: i64) -> NewReview {
    NewReview {
        book_id,
        rating,
        title: None,
        comment: None,
    }
}

#[tokio::test]
async fn test_order_totals_and_snapshot() {
    let system = start();
    let book = seed(&system, "Dune", 500, 4).await;
    let alice = Principal::user(1);

    let placed = system
        .orders
        .create_order(&alice, cart(book.id, 2, 10, 20))
        .await
        .unwrap();

    let order = &placed.order.order;
    assert_eq!(order.subtotal, 1000);
    assert_eq!(order.total, 1030);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.user_id, alice.id);
    assert_eq!(order.payment_intent_id, None);
    assert_eq!(order.client_secret, placed.client_secret);
    assert!(placed.order.is_balanced());

    let item = &placed.order.order_items[0];
    assert_eq!(item.name, "Dune");
    assert_eq!(item.price, 500);
    assert_eq!(item.amount, 2);

    // Placing an order reserves nothing
    assert_eq!(system.catalog.get_book(book.id).await.unwrap().inventory, 4);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_order_failures() {
    let system = start();
    let book = seed(&system, "Dune", 500, 1).await;
    let alice = Principal::user(1);

    let err = system
        .orders
        .create_order(&alice, NewOrder::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = system
        .orders
        .create_order(&alice, cart(BookId(42), 1, 0, 0))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::BookNotFound(BookId(42)));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = system
        .orders
        .create_order(&alice, cart(book.id, 2, 0, 0))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientStock);

    assert!(system.orders.get_current_user_orders(&alice).await.unwrap().is_empty());
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_confirm_decrements_once() {
    let system = start();
    let book = seed(&system, "Dune", 500, 5).await;
    let alice = Principal::user(1);

    let placed = system
        .orders
        .create_order(&alice, cart(book.id, 2, 0, 0))
        .await
        .unwrap();
    let order_id = placed.order.order.id;

    let paid = system
        .orders
        .update_order(&alice, order_id, Some("pi_1".to_string()))
        .await
        .unwrap();
    assert_eq!(paid.order.status, OrderStatus::Paid);
    assert_eq!(paid.order.payment_intent_id.as_deref(), Some("pi_1"));
    assert_eq!(system.catalog.get_book(book.id).await.unwrap().inventory, 3);

    // Second confirmation is a no-op returning the same order
    let again = system
        .orders
        .update_order(&alice, order_id, Some("pi_2".to_string()))
        .await
        .unwrap();
    assert_eq!(again, paid);
    assert_eq!(system.catalog.get_book(book.id).await.unwrap().inventory, 3);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_confirmations_of_same_order() {
    let system = start();
    let book = seed(&system, "Dune", 500, 5).await;
    let alice = Principal::user(1);

    let order_id = system
        .orders
        .create_order(&alice, cart(book.id, 2, 0, 0))
        .await
        .unwrap()
        .order
        .order
        .id;

    let (first, second) = tokio::join!(
        system
            .orders
            .update_order(&alice, order_id, Some("pi_a".to_string())),
        system
            .orders
            .update_order(&alice, order_id, Some("pi_b".to_string())),
    );
    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(system.catalog.get_book(book.id).await.unwrap().inventory, 3);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_last_copy_race() {
    let system = start();
    let book = seed(&system, "Dune", 500, 1).await;
    let alice = Principal::user(1);
    let bob = Principal::user(2);

    // Both orders pass the advisory check
    let (a, b) = tokio::join!(
        system.orders.create_order(&alice, cart(book.id, 1, 0, 0)),
        system.orders.create_order(&bob, cart(book.id, 1, 0, 0)),
    );
    let a = a.unwrap().order.order.id;
    let b = b.unwrap().order.order.id;

    let (paid_a, paid_b) = tokio::join!(
        system
            .orders
            .update_order(&alice, a, Some("pi_a".to_string())),
        system.orders.update_order(&bob, b, Some("pi_b".to_string())),
    );

    let outcomes = [paid_a, paid_b];
    let succeeded = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1);
    let failure = outcomes
        .into_iter()
        .find_map(Result::err)
        .expect("one confirmation must fail");
    assert!(matches!(
        failure,
        OrderError::InsufficientStock { requested: 1, .. }
    ));
    assert_eq!(failure.kind(), ErrorKind::InsufficientStock);
    assert_eq!(system.catalog.get_book(book.id).await.unwrap().inventory, 0);

    // The losing order stays pending
    let admin = Principal::admin(99);
    let pending: Vec<OrderId> = system
        .orders
        .get_all_orders(&admin)
        .await
        .unwrap()
        .into_iter()
        .filter(|o| o.order.status == OrderStatus::Pending)
        .map(|o| o.order.id)
        .collect();
    assert_eq!(pending.len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_partial_stock_aborts_whole_confirmation() {
    let system = start();
    let plenty = seed(&system, "Dune", 500, 10).await;
    let scarce = seed(&system, "Emma", 300, 1).await;
    let alice = Principal::user(1);
    let bob = Principal::user(2);

    let order = NewOrder::new(
        vec![
            CartItem {
                book_id: plenty.id,
                amount: 3,
            },
            CartItem {
                book_id: scarce.id,
                amount: 1,
            },
        ],
        0,
        0,
    );
    let a = system.orders.create_order(&alice, order).await.unwrap();
    let b = system
        .orders
        .create_order(&bob, cart(scarce.id, 1, 0, 0))
        .await
        .unwrap();

    system
        .orders
        .update_order(&bob, b.order.order.id, Some("pi_b".to_string()))
        .await
        .unwrap();

    let err = system
        .orders
        .update_order(&alice, a.order.order.id, Some("pi_a".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InsufficientStock { book_id, .. } if book_id == scarce.id));

    // The decrement of the first item was rolled back with the rest
    assert_eq!(system.catalog.get_book(plenty.id).await.unwrap().inventory, 10);
    let order = system
        .orders
        .get_single_order(&alice, a.order.order.id)
        .await
        .unwrap();
    assert_eq!(order.order.status, OrderStatus::Pending);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_permissions_and_listings() {
    let system = start();
    let book = seed(&system, "Dune", 500, 10).await;
    let alice = Principal::user(1);
    let bob = Principal::user(2);
    let admin = Principal::admin(99);

    let first = system
        .orders
        .create_order(&alice, cart(book.id, 1, 0, 0))
        .await
        .unwrap();
    let second = system
        .orders
        .create_order(&alice, cart(book.id, 2, 0, 0))
        .await
        .unwrap();
    system
        .orders
        .create_order(&bob, cart(book.id, 1, 0, 0))
        .await
        .unwrap();

    let id = first.order.order.id;
    let err = system.orders.get_single_order(&bob, id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Permission);
    let err = system
        .orders
        .update_order(&bob, id, Some("pi".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Permission);
    assert!(system.orders.get_single_order(&admin, id).await.is_ok());

    let err = system
        .orders
        .update_order(&alice, OrderId(999), Some("pi".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::NotFound(OrderId(999)));

    let mine = system.orders.get_current_user_orders(&alice).await.unwrap();
    let ids: Vec<OrderId> = mine.iter().map(|o| o.order.id).collect();
    assert_eq!(ids, vec![second.order.order.id, first.order.order.id]);

    let err = system.orders.get_all_orders(&alice).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Permission);
    let all = system.orders.get_all_orders(&admin).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|o| o.is_balanced()));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_review_aggregate_follows_every_write() {
    let system = start();
    let book = seed(&system, "Dune", 500, 1).await;
    let alice = Principal::user(1);

    let review = system
        .reviews
        .create_review(&alice, review_of(book.id, 5))
        .await
        .unwrap();
    assert_eq!(review.title, "");
    assert_eq!(review.comment, "");
    let b = system.catalog.get_book(book.id).await.unwrap();
    assert_eq!((b.avg_rating, b.num_of_reviews), (5.0, 1));

    let updated = system
        .reviews
        .update_review(
            &alice,
            review.id,
            ReviewPatch {
                rating: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.rating, 3);
    let b = system.catalog.get_book(book.id).await.unwrap();
    assert_eq!((b.avg_rating, b.num_of_reviews), (3.0, 1));

    system.reviews.delete_review(&alice, review.id).await.unwrap();
    let b = system.catalog.get_book(book.id).await.unwrap();
    assert_eq!((b.avg_rating, b.num_of_reviews), (0.0, 0));

    let err = system.reviews.get_single_review(review.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_review_leaves_aggregate_alone() {
    let system = start();
    let book = seed(&system, "Dune", 500, 1).await;
    let alice = Principal::user(1);
    let bob = Principal::user(2);

    system
        .reviews
        .create_review(&alice, review_of(book.id, 4))
        .await
        .unwrap();
    system
        .reviews
        .create_review(&bob, review_of(book.id, 1))
        .await
        .unwrap();

    let err = system
        .reviews
        .create_review(&alice, review_of(book.id, 1))
        .await
        .unwrap_err();
    assert_eq!(err, ReviewError::DuplicateReview(book.id));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let b = system.catalog.get_book(book.id).await.unwrap();
    assert_eq!((b.avg_rating, b.num_of_reviews), (2.5, 2));
    assert_eq!(system.reviews.get_reviews_for_book(book.id).await.unwrap().len(), 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_review_errors_and_permissions() {
    let system = start();
    let book = seed(&system, "Dune", 500, 1).await;
    let alice = Principal::user(1);
    let bob = Principal::user(2);
    let admin = Principal::admin(99);

    let err = system
        .reviews
        .create_review(&alice, review_of(BookId(77), 3))
        .await
        .unwrap_err();
    assert_eq!(err, ReviewError::BookNotFound(BookId(77)));

    let err = system
        .reviews
        .create_review(&alice, review_of(book.id, 6))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let review = system
        .reviews
        .create_review(&alice, review_of(book.id, 4))
        .await
        .unwrap();

    let err = system
        .reviews
        .delete_review(&bob, review.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Permission);
    let err = system
        .reviews
        .update_review(&bob, review.id, ReviewPatch::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Permission);

    // Admins may edit anyone's review
    let patched = system
        .reviews
        .update_review(
            &admin,
            review.id,
            ReviewPatch {
                comment: Some("Edited by staff".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.comment, "Edited by staff");
    assert_eq!(patched.rating, 4);

    let b = system.catalog.get_book(book.id).await.unwrap();
    assert_eq!((b.avg_rating, b.num_of_reviews), (4.0, 1));
    assert_eq!(system.reviews.get_all_reviews().await.unwrap().len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_wire_shape() {
    let system = start();
    let book = seed(&system, "Dune", 500, 2).await;
    let placed = system
        .orders
        .create_order(&Principal::user(1), cart(book.id, 1, 10, 20))
        .await
        .unwrap();

    let json = serde_json::to_value(&placed.order).unwrap();
    assert_eq!(json["status"], "pending");
    assert_eq!(json["shippingFee"], 20);
    assert_eq!(json["paymentIntentId"], serde_json::Value::Null);
    assert_eq!(json["orderItems"][0]["amount"], 1);

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["avgRating"], 0.0);
    assert_eq!(json["numOfReviews"], 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_review_and_order_are_not_found() {
    let system = start();
    let book = seed(&system, "Dune", 500, 1).await;
    let alice = Principal::user(1);

    system
        .reviews
        .create_review(&alice, review_of(book.id, 4))
        .await
        .unwrap();

    let err = system
        .reviews
        .update_review(
            &alice,
            ReviewId(999),
            ReviewPatch {
                rating: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, ReviewError::NotFound(ReviewId(999)));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = system
        .reviews
        .delete_review(&alice, ReviewId(999))
        .await
        .unwrap_err();
    assert_eq!(err, ReviewError::NotFound(ReviewId(999)));

    // Neither failed write touched the summary
    let b = system.catalog.get_book(book.id).await.unwrap();
    assert_eq!((b.avg_rating, b.num_of_reviews), (4.0, 1));

    let err = system
        .orders
        .get_single_order(&alice, OrderId(999))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::NotFound(OrderId(999)));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    system.shutdown().await.unwrap();
}
