//! Ledger operations and the balance they maintain. Create and delete are
//! the only writers of a user's balance; both run inside a single unit of
//! work with the owner's row locked, so the stored balance always equals the
//! signed sum of the surviving transactions.

use crate::error::HandlerError;
use crate::transaction::{to_minor_units, NewTransaction, Transaction};
use crate::user::UserId;
use anyhow::anyhow;
use fintrack_repo::transaction_repo::{
    NewTransactionEntry, PageOptions, TransactionFilter,
};
use fintrack_repo::Store;
use tracing::instrument;

pub(crate) const RECENT_LIMIT: i64 = 3;
const MAX_PER_PAGE: i64 = 100;

#[derive(Clone, Debug)]
pub(crate) struct TransactionQuery {
    pub page: i64,
    pub per_page: i64,
    pub description: Option<String>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub tags: Vec<String>,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        TransactionQuery {
            page: 1,
            per_page: 10,
            description: None,
            start_date: None,
            end_date: None,
            tags: Vec::new(),
        }
    }
}

#[instrument(skip(store, new_transaction))]
pub(crate) async fn create_transaction(
    store: &dyn Store,
    user_id: UserId,
    new_transaction: NewTransaction,
) -> Result<(), HandlerError> {
    let amount = to_minor_units(new_transaction.amount)?;

    let mut uow = store.begin().await?;
    let user = uow
        .get_user_for_update(user_id)
        .await?
        .ok_or(HandlerError::NotFound("User"))?;

    let entry = uow
        .create_transaction(
            user_id,
            NewTransactionEntry {
                description: new_transaction.description,
                currency: new_transaction.currency,
                amount,
                is_income: new_transaction.is_income,
                created_at: None,
            },
        )
        .await?;

    let delta = if new_transaction.is_income {
        amount
    } else {
        -amount
    };
    let new_balance = user
        .balance
        .checked_add(delta)
        .ok_or_else(|| HandlerError::Validation("Amount is out of range".to_owned()))?;
    uow.update_balance(user_id, new_balance).await?;
    uow.add_tags(user_id, entry.id, &new_transaction.tags).await?;

    uow.commit().await?;
    Ok(())
}

#[instrument(skip(store))]
pub(crate) async fn delete_transaction(
    store: &dyn Store,
    user_id: UserId,
    transaction_id: i32,
) -> Result<bool, HandlerError> {
    let mut uow = store.begin().await?;
    let user = uow
        .get_user_for_update(user_id)
        .await?
        .ok_or(HandlerError::NotFound("User"))?;

    // The row is removed only after the owner is locked: of two concurrent
    // deletes of the same id, the loser sees None here and compensates
    // nothing. Absent and not-mine are indistinguishable on purpose.
    let Some(entry) = uow.delete_transaction(user_id, transaction_id).await? else {
        return Ok(false);
    };

    // exact mirror of create: deleting an income takes the amount back out
    let delta = if entry.is_income {
        -entry.amount
    } else {
        entry.amount
    };
    let new_balance = user
        .balance
        .checked_add(delta)
        .ok_or_else(|| HandlerError::Other(anyhow!("Balance compensation overflowed")))?;
    uow.update_balance(user_id, new_balance).await?;

    uow.commit().await?;
    Ok(true)
}

#[instrument(skip(store))]
pub(crate) async fn get_transaction(
    store: &dyn Store,
    user_id: UserId,
    transaction_id: i32,
) -> Result<Option<Transaction>, HandlerError> {
    let mut uow = store.begin().await?;
    let Some(entry) = uow.get_transaction(user_id, transaction_id).await? else {
        return Ok(None);
    };
    let tags = uow.get_tags(entry.id).await?;
    Ok(Some(Transaction::from_entry_and_tags(entry, tags)))
}

#[instrument(skip(store))]
pub(crate) async fn get_transactions(
    store: &dyn Store,
    user_id: UserId,
    query: TransactionQuery,
) -> Result<Vec<Transaction>, HandlerError> {
    if query.page < 1 {
        return Err(HandlerError::Validation(
            "page must be at least 1".to_owned(),
        ));
    }
    if query.per_page < 1 || query.per_page > MAX_PER_PAGE {
        return Err(HandlerError::Validation(format!(
            "per_page must be between 1 and {}",
            MAX_PER_PAGE
        )));
    }

    let filter = TransactionFilter {
        description: query.description,
        start_date: query.start_date,
        // -1 means "no upper bound"
        end_date: query.end_date.filter(|&date| date != -1),
    };
    let offset = (query.page - 1)
        .checked_mul(query.per_page)
        .ok_or_else(|| HandlerError::Validation("page is out of range".to_owned()))?;
    let page = PageOptions {
        offset,
        limit: query.per_page,
    };

    let mut uow = store.begin().await?;
    let entries = uow.get_transactions(user_id, &filter, &page).await?;

    // Tags are matched after pagination, so a page can come back with fewer
    // than per_page entries even when more matches exist further on.
    let mut transactions = Vec::with_capacity(entries.len());
    for entry in entries {
        let tags = uow.get_tags(entry.id).await?;
        if !query.tags.iter().all(|tag| tags.contains(tag)) {
            continue;
        }
        transactions.push(Transaction::from_entry_and_tags(entry, tags));
    }
    Ok(transactions)
}

#[instrument(skip(store))]
pub(crate) async fn get_recent_transactions(
    store: &dyn Store,
    user_id: UserId,
) -> Result<Vec<Transaction>, HandlerError> {
    let mut uow = store.begin().await?;
    let entries = uow.get_recent_transactions(user_id, RECENT_LIMIT).await?;

    let mut transactions = Vec::with_capacity(entries.len());
    for entry in entries {
        let tags = uow.get_tags(entry.id).await?;
        transactions.push(Transaction::from_entry_and_tags(entry, tags));
    }
    Ok(transactions)
}
