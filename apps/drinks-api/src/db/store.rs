use async_trait::async_trait;

use crate::models::drink::{DrinkChanges, DrinkRecord, NewDrink};

/// Failure modes at the storage boundary, classified so the HTTP layer can
/// distinguish a rejected mutation from a broken backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("connection failure: {0}")]
    Connection(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Abstraction over the drinks table.
///
/// Backed by Postgres in production and an in-memory table in tests.
#[async_trait]
pub trait DrinkStore: Send + Sync {
    /// All drinks ordered by id.
    async fn list(&self) -> Result<Vec<DrinkRecord>, StoreError>;

    async fn find(&self, id: i32) -> Result<Option<DrinkRecord>, StoreError>;

    /// Insert a new row; the store assigns the id.
    async fn insert(&self, drink: NewDrink) -> Result<DrinkRecord, StoreError>;

    /// Apply a partial update. `None` when no row has that id. An empty
    /// change set leaves the row untouched.
    async fn update(&self, id: i32, changes: DrinkChanges)
        -> Result<Option<DrinkRecord>, StoreError>;

    /// Remove a row, reporting whether it existed.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}
