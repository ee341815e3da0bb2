use async_trait::async_trait;
use thiserror::Error;

pub mod tag_repo;
pub mod transaction_repo;
pub mod user_repo;

// implementation modules
pub mod mem_store;
pub mod sqlx_store;

use tag_repo::TagRepo;
use transaction_repo::TransactionRepo;
use user_repo::UserRepo;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Username {0} is already taken")]
    UsernameTaken(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A transactional scope over the stores. All writes made through a unit of
/// work become visible together on [commit](UnitOfWork::commit); dropping an
/// uncommitted unit of work rolls every pending write back and releases the
/// underlying connection.
#[async_trait]
pub trait UnitOfWork: UserRepo + TransactionRepo + TagRepo + Send {
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

/// Handle to the storage backend. Constructed once at startup and passed
/// down to the services; each request-level operation opens its own unit of
/// work.
#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn check(&self) -> bool;
}
