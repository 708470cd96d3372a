//! Pure data structures (rows and request DTOs) implementing the [`Record`](store_actor::Record) trait.

pub mod book;
pub mod order;
pub mod principal;
pub mod review;

pub use book::*;
pub use order::*;
pub use principal::*;
pub use review::*;
