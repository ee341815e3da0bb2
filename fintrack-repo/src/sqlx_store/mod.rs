mod tag_repo;
mod transaction_repo;
mod user_repo;

use crate::{HealthCheck, Store, StoreError, UnitOfWork};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres, Transaction};
use std::sync::Arc;

pub struct SQLxStore {
    pool: Pool<Postgres>,
}

pub(crate) struct SQLxUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl SQLxUnitOfWork {
    pub(crate) fn executor(&mut self) -> &mut sqlx::PgConnection {
        &mut self.tx
    }
}

pub async fn create_store(
    database_url: &str,
    max_pool_size: u32,
) -> Result<(Arc<dyn Store>, Arc<dyn HealthCheck>), StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_pool_size)
        .connect(database_url)
        .await
        .context("Unable to connect to database")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Unable to run migrations")?;

    let store = Arc::new(SQLxStore { pool });
    Ok((store.clone() as Arc<dyn Store>, store as Arc<dyn HealthCheck>))
}

#[async_trait]
impl Store for SQLxStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        let tx = self
            .pool
            .begin()
            .await
            .context("Unable to begin database transaction")?;
        Ok(Box::new(SQLxUnitOfWork { tx }))
    }
}

#[async_trait]
impl UnitOfWork for SQLxUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx
            .commit()
            .await
            .context("Unable to commit database transaction")?;
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for SQLxStore {
    async fn check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
