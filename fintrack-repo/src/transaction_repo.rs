use crate::StoreError;
use async_trait::async_trait;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TransactionEntry {
    pub id: i32,
    pub description: String,
    pub currency: String,
    /// Magnitude in minor currency units; the sign convention lives in
    /// `is_income`, never in the stored value.
    pub amount: i64,
    pub is_income: bool,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub owner_id: i32,
}

#[derive(Clone, Debug)]
pub struct NewTransactionEntry {
    pub description: String,
    pub currency: String,
    pub amount: i64,
    pub is_income: bool,
    /// Captured at write time when not supplied.
    pub created_at: Option<i64>,
}

#[derive(Clone, Default, Debug)]
pub struct TransactionFilter {
    /// Substring match on the description.
    pub description: Option<String>,
    /// Inclusive lower bound on `created_at`.
    pub start_date: Option<i64>,
    /// Inclusive upper bound on `created_at`.
    pub end_date: Option<i64>,
}

#[derive(Clone, Debug)]
pub struct PageOptions {
    pub offset: i64,
    pub limit: i64,
}

/// Ledger store. Every read is scoped by the owner; a transaction belonging
/// to another user is reported as absent, never as a permission error.
#[async_trait]
pub trait TransactionRepo {
    async fn get_transaction(
        &mut self,
        owner_id: i32,
        transaction_id: i32,
    ) -> Result<Option<TransactionEntry>, StoreError>;

    /// Date/description-filtered page, newest first. Results are ordered by
    /// `created_at` descending with the id as a tie breaker.
    async fn get_transactions(
        &mut self,
        owner_id: i32,
        filter: &TransactionFilter,
        page: &PageOptions,
    ) -> Result<Vec<TransactionEntry>, StoreError>;

    async fn get_recent_transactions(
        &mut self,
        owner_id: i32,
        limit: i64,
    ) -> Result<Vec<TransactionEntry>, StoreError>;

    async fn create_transaction(
        &mut self,
        owner_id: i32,
        new_transaction: NewTransactionEntry,
    ) -> Result<TransactionEntry, StoreError>;

    /// Returns the deleted entry so the caller can compute the balance
    /// compensation from its stored amount. Tags go with it at the schema
    /// level.
    async fn delete_transaction(
        &mut self,
        owner_id: i32,
        transaction_id: i32,
    ) -> Result<Option<TransactionEntry>, StoreError>;
}
