//! In-process product repository with the same observable behavior as the
//! PostgreSQL one: ids start at 1, are never reused, rows come back ordered by id.

use crate::error::AppError;
use crate::model::{ProductCreate, ProductRead, ProductUpdate};
use crate::service::ProductRepository;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, ProductRead>,
}

#[derive(Default)]
pub struct MemoryProductRepository {
    table: Mutex<Table>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, AppError> {
        self.table
            .lock()
            .map_err(|_| AppError::Internal("product table lock poisoned".into()))
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductRead>, AppError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn insert(&self, product: &ProductCreate) -> Result<(), AppError> {
        let mut table = self.lock()?;
        table.next_id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| AppError::Internal("product id sequence exhausted".into()))?;
        let id = table.next_id;
        table.rows.insert(id, ProductRead::from_create(id, product));
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ProductRead>, AppError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn update_by_id(&self, id: i32, changes: &ProductUpdate) -> Result<(), AppError> {
        if let Some(row) = self.lock()?.rows.get_mut(&id) {
            row.apply(changes);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), AppError> {
        self.lock()?.rows.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
