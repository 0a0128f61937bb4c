//! Product repository: the storage client handlers talk to.

mod memory;
mod postgres;
mod validation;
pub use memory::MemoryProductRepository;
pub use postgres::PgProductRepository;
pub use validation::RequestValidator;

use crate::error::AppError;
use crate::model::{ProductCreate, ProductRead, ProductUpdate};
use async_trait::async_trait;

/// Data access for the `products` relation. Every mutation commits on its own;
/// a read followed by a write is two separate round-trips.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Equality lookup on the primary key. `None` when no row matches.
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductRead>, AppError>;

    /// Insert all create fields. The generated id is not returned.
    async fn insert(&self, product: &ProductCreate) -> Result<(), AppError>;

    /// Every row, ordered by id, fully materialized.
    async fn list_all(&self) -> Result<Vec<ProductRead>, AppError>;

    /// Overwrite only the fields present in `changes`. Empty changes are a no-op.
    async fn update_by_id(&self, id: i32, changes: &ProductUpdate) -> Result<(), AppError>;

    async fn delete_by_id(&self, id: i32) -> Result<(), AppError>;

    /// Liveness of the underlying store.
    async fn ping(&self) -> Result<(), AppError>;
}
