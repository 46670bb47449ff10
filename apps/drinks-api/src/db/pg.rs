//! Postgres-backed drink store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError, OptionalExtension};

use crate::db::pool::DbPool;
use crate::db::schema::drinks;
use crate::db::store::{DrinkStore, StoreError};
use crate::models::drink::{DrinkChanges, DrinkRecord, NewDrink};

pub struct PgDrinkStore {
    pool: DbPool,
}

impl PgDrinkStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(err: diesel_async::pooled_connection::deadpool::PoolError) -> StoreError {
    StoreError::Connection(err.to_string())
}

#[async_trait]
impl DrinkStore for PgDrinkStore {
    async fn list(&self) -> Result<Vec<DrinkRecord>, StoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel_async::RunQueryDsl::load(
            drinks::table
                .order(drinks::id.asc())
                .select(DrinkRecord::as_select()),
            &mut conn,
        )
        .await
        .map_err(classify)
    }

    async fn find(&self, id: i32) -> Result<Option<DrinkRecord>, StoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel_async::RunQueryDsl::get_result(
            drinks::table.find(id).select(DrinkRecord::as_select()),
            &mut conn,
        )
        .await
        .optional()
        .map_err(classify)
    }

    async fn insert(&self, drink: NewDrink) -> Result<DrinkRecord, StoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel_async::RunQueryDsl::get_result(
            diesel::insert_into(drinks::table)
                .values(&drink)
                .returning(DrinkRecord::as_returning()),
            &mut conn,
        )
        .await
        .map_err(classify)
    }

    async fn update(
        &self,
        id: i32,
        changes: DrinkChanges,
    ) -> Result<Option<DrinkRecord>, StoreError> {
        // Diesel rejects an all-None changeset outright.
        if changes.is_empty() {
            return self.find(id).await;
        }

        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel_async::RunQueryDsl::get_result(
            diesel::update(drinks::table.find(id))
                .set(&changes)
                .returning(DrinkRecord::as_returning()),
            &mut conn,
        )
        .await
        .optional()
        .map_err(classify)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let deleted =
            diesel_async::RunQueryDsl::execute(diesel::delete(drinks::table.find(id)), &mut conn)
                .await
                .map_err(classify)?;

        Ok(deleted > 0)
    }
}

fn classify(err: DieselError) -> StoreError {
    match err {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::NotNullViolation,
            info,
        ) => StoreError::Constraint(info.message().to_string()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            StoreError::Connection(info.message().to_string())
        }
        other => StoreError::Backend(other.to_string()),
    }
}
