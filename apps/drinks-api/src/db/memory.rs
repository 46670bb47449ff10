//! In-memory drink store for tests and database-less local runs.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::db::store::{DrinkStore, StoreError};
use crate::models::drink::{DrinkChanges, DrinkRecord, NewDrink};

pub struct MemoryDrinkStore {
    inner: Mutex<Inner>,
}

struct Inner {
    rows: Vec<DrinkRecord>,
    next_id: i32,
}

impl MemoryDrinkStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryDrinkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DrinkStore for MemoryDrinkStore {
    async fn list(&self) -> Result<Vec<DrinkRecord>, StoreError> {
        Ok(self.inner.lock().unwrap().rows.clone())
    }

    async fn find(&self, id: i32) -> Result<Option<DrinkRecord>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn insert(&self, drink: NewDrink) -> Result<DrinkRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();

        if inner.rows.iter().any(|r| r.title == drink.title) {
            return Err(StoreError::Constraint(format!(
                "duplicate title: {}",
                drink.title
            )));
        }

        let record = DrinkRecord {
            id: inner.next_id,
            title: drink.title,
            recipe: drink.recipe,
        };
        inner.next_id += 1;
        inner.rows.push(record.clone());

        Ok(record)
    }

    async fn update(
        &self,
        id: i32,
        changes: DrinkChanges,
    ) -> Result<Option<DrinkRecord>, StoreError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(ref title) = changes.title {
            if inner.rows.iter().any(|r| r.id != id && &r.title == title) {
                return Err(StoreError::Constraint(format!("duplicate title: {title}")));
            }
        }

        let Some(row) = inner.rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            row.title = title;
        }
        if let Some(recipe) = changes.recipe {
            row.recipe = recipe;
        }

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id != id);
        Ok(inner.rows.len() < before)
    }
}
