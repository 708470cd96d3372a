use crate::auth::{Authorizer, OwnerOrAdmin};
use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::inventory::InventoryLedger;
use crate::lifecycle::SystemError;
use crate::orders::OrderService;
use crate::payment::{PaymentGateway, StubGateway};
use crate::reviews::ReviewService;
use crate::store;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running bookstore: one store actor and the services that talk to it.
///
/// # Example
///
/// ```rust
/// use bookstore::config::Config;
/// use bookstore::lifecycle::BookstoreSystem;
/// use bookstore::model::BookDraft;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = BookstoreSystem::new(&Config::default());
///     let book = system.catalog.add_book(BookDraft::new("Dune", 500, 3)).await?;
///     assert!(system.inventory.check_availability(book.id, 3).await?);
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct BookstoreSystem {
    pub catalog: CatalogClient,
    pub inventory: InventoryLedger,
    pub orders: OrderService,
    pub reviews: ReviewService,
    handle: JoinHandle<()>,
}

impl BookstoreSystem {
    /// Starts the system with the stub payment gateway.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &Config) -> Self {
        Self::with_gateway(config, Arc::new(StubGateway::new()))
    }

    /// Starts the system with the given payment gateway.
    pub fn with_gateway(config: &Config, gateway: Arc<dyn PaymentGateway>) -> Self {
        let (actor, store) = store::new(config.store_buffer);
        let handle = tokio::spawn(actor.run());

        let authorizer: Arc<dyn Authorizer> = Arc::new(OwnerOrAdmin);
        let system = Self {
            catalog: CatalogClient::new(store.clone()),
            inventory: InventoryLedger::new(store.clone()),
            orders: OrderService::new(
                store.clone(),
                gateway,
                Arc::clone(&authorizer),
                config.currency.clone(),
            ),
            reviews: ReviewService::new(store, authorizer),
            handle,
        };
        info!(
            store_buffer = config.store_buffer,
            currency = %config.currency,
            "Bookstore started"
        );
        system
    }

    /// Drops every service and waits for the store actor to finish.
    ///
    /// Clones of the services held elsewhere keep the actor alive; drop them first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down bookstore...");
        let Self {
            catalog,
            inventory,
            orders,
            reviews,
            handle,
        } = self;
        drop(catalog);
        drop(inventory);
        drop(orders);
        drop(reviews);

        if let Err(e) = handle.await {
            error!(error = %e, "Store actor task failed");
            return Err(SystemError::ActorTaskFailed(e));
        }
        info!("Bookstore shutdown complete");
        Ok(())
    }
}
