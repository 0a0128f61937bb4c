//! Product repository against PostgreSQL.

use crate::config::ServiceConfig;
use crate::error::AppError;
use crate::model::{ProductCreate, ProductRead, ProductUpdate};
use crate::schema::PRODUCTS;
use crate::service::ProductRepository;
use crate::sql::{delete, insert, select_all, select_by_id, update, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Owns the connection pool. Built once at startup, closed at shutdown.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &ServiceConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        tracing::info!(max_connections = config.max_connections, "database pool ready");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Wait for checked-out connections to return, then close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }

    async fn query_optional(&self, q: &QueryBuf) -> Result<Option<ProductRead>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, ProductRead>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn query_many(&self, q: &QueryBuf) -> Result<Vec<ProductRead>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, ProductRead>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Run one statement in its own transaction and commit. On error the
    /// transaction is dropped uncommitted.
    async fn execute_committed(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let affected = query.execute(&mut *tx).await?.rows_affected();
        tx.commit().await?;
        Ok(affected)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductRead>, AppError> {
        self.query_optional(&select_by_id(&PRODUCTS, id)).await
    }

    async fn insert(&self, product: &ProductCreate) -> Result<(), AppError> {
        let q = insert(&PRODUCTS, &product.columns());
        self.execute_committed(&q).await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ProductRead>, AppError> {
        self.query_many(&select_all(&PRODUCTS)).await
    }

    async fn update_by_id(&self, id: i32, changes: &ProductUpdate) -> Result<(), AppError> {
        let Some(q) = update(&PRODUCTS, id, &changes.columns()) else {
            return Ok(());
        };
        let affected = self.execute_committed(&q).await?;
        tracing::debug!(product_id = id, affected, "update applied");
        Ok(())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), AppError> {
        let affected = self.execute_committed(&delete(&PRODUCTS, id)).await?;
        tracing::debug!(product_id = id, affected, "delete applied");
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
