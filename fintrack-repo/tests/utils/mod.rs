use std::sync::Arc;

use uuid::Uuid;

use fintrack_repo::transaction_repo::NewTransactionEntry;
use fintrack_repo::user_repo::{NewUser, User};
use fintrack_repo::{mem_store, Store};

pub fn create_store() -> Arc<dyn Store> {
    let (store, _health_check) = mem_store::create_store();
    store
}

pub fn generate_new_user() -> NewUser {
    let username = "test-user-".to_owned() + &Uuid::new_v4().to_string();
    NewUser {
        username,
        password_hash: "not a real hash".to_owned(),
        image: "https://example.com/avatar.svg".to_owned(),
        primary_currency: "BYN".to_owned(),
    }
}

pub async fn create_user(store: &Arc<dyn Store>) -> User {
    let mut uow = store.begin().await.unwrap();
    let user = uow.create_user(generate_new_user()).await.unwrap();
    uow.commit().await.unwrap();
    user
}

pub fn generate_new_transaction() -> NewTransactionEntry {
    NewTransactionEntry {
        description: "Groceries".to_owned(),
        currency: "BYN".to_owned(),
        amount: 1000,
        is_income: false,
        created_at: None,
    }
}

pub fn generate_new_transaction_with_date(created_at: i64) -> NewTransactionEntry {
    NewTransactionEntry {
        created_at: Some(created_at),
        ..generate_new_transaction()
    }
}

pub fn generate_new_transaction_with_description(description: &str) -> NewTransactionEntry {
    NewTransactionEntry {
        description: description.to_owned(),
        ..generate_new_transaction()
    }
}
