//! In-memory store used by tests. Each unit of work stages a copy of the
//! whole state and swaps it in on commit, so uncommitted writes are never
//! observable.

mod tag_repo;
mod transaction_repo;
mod user_repo;

use crate::user_repo::User;
use crate::transaction_repo::TransactionEntry;
use crate::{HealthCheck, Store, StoreError, UnitOfWork};
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct TagEntry {
    #[allow(dead_code)]
    id: i32,
    text: String,
    #[allow(dead_code)]
    user_id: i32,
    transaction_id: i32,
}

#[derive(Clone, Default)]
struct State {
    users: HashMap<i32, User>,
    transactions: HashMap<i32, TransactionEntry>,
    tags: Vec<TagEntry>,
    next_user_id: i32,
    next_transaction_id: i32,
    next_tag_id: i32,
}

pub struct MemStore {
    state: Arc<Mutex<State>>,
}

pub(crate) struct MemUnitOfWork {
    shared: Arc<Mutex<State>>,
    staged: State,
}

pub fn create_store() -> (Arc<dyn Store>, Arc<dyn HealthCheck>) {
    let store = Arc::new(MemStore {
        state: Arc::new(Mutex::new(State::default())),
    });
    (store.clone() as Arc<dyn Store>, store as Arc<dyn HealthCheck>)
}

#[async_trait]
impl Store for MemStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        let staged = self
            .state
            .lock()
            .map_err(|_| StoreError::Other(anyhow!("Unable to acquire lock")))?
            .clone();
        Ok(Box::new(MemUnitOfWork {
            shared: self.state.clone(),
            staged,
        }))
    }
}

#[async_trait]
impl UnitOfWork for MemUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let mut guard = self
            .shared
            .lock()
            .map_err(|_| StoreError::Other(anyhow!("Unable to acquire lock")))?;
        *guard = self.staged;
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for MemStore {
    async fn check(&self) -> bool {
        true
    }
}
