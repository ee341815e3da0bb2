use crate::sqlx_store::SQLxUnitOfWork;
use crate::transaction_repo::{
    NewTransactionEntry, PageOptions, TransactionEntry, TransactionFilter, TransactionRepo,
};
use crate::StoreError;
use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{query_as, QueryBuilder};
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: i32,
    description: String,
    currency: String,
    amount: i64,
    is_income: bool,
    created_at: i64,
    owner_id: i32,
}

impl From<TransactionRow> for TransactionEntry {
    fn from(row: TransactionRow) -> Self {
        TransactionEntry {
            id: row.id,
            description: row.description,
            currency: row.currency,
            amount: row.amount,
            is_income: row.is_income,
            created_at: row.created_at,
            owner_id: row.owner_id,
        }
    }
}

const TRANSACTION_COLUMNS: &str =
    "id, description, currency, amount, is_income, created_at, owner_id";

#[async_trait]
impl TransactionRepo for SQLxUnitOfWork {
    #[instrument(skip(self))]
    async fn get_transaction(
        &mut self,
        owner_id: i32,
        transaction_id: i32,
    ) -> Result<Option<TransactionEntry>, StoreError> {
        let entry: Option<TransactionRow> = query_as(&format!(
            "SELECT {} FROM transactions WHERE id = $1 AND owner_id = $2",
            TRANSACTION_COLUMNS
        ))
        .bind(transaction_id)
        .bind(owner_id)
        .fetch_optional(self.executor())
        .await
        .with_context(|| format!("Unable to get transaction {}", transaction_id))?;
        Ok(entry.map(TransactionEntry::from))
    }

    #[instrument(skip(self))]
    async fn get_transactions(
        &mut self,
        owner_id: i32,
        filter: &TransactionFilter,
        page: &PageOptions,
    ) -> Result<Vec<TransactionEntry>, StoreError> {
        let mut query_builder = QueryBuilder::new(format!(
            "SELECT {} FROM transactions WHERE owner_id = ",
            TRANSACTION_COLUMNS
        ));
        query_builder.push_bind(owner_id);
        if let Some(description) = &filter.description {
            query_builder
                .push(" AND description LIKE ")
                .push_bind(format!("%{}%", description));
        }
        if let Some(start_date) = filter.start_date {
            query_builder
                .push(" AND created_at >= ")
                .push_bind(start_date);
        }
        if let Some(end_date) = filter.end_date {
            query_builder
                .push(" AND created_at <= ")
                .push_bind(end_date);
        }
        query_builder
            .push(" ORDER BY created_at DESC, id DESC OFFSET ")
            .push_bind(page.offset)
            .push(" LIMIT ")
            .push_bind(page.limit);

        let entries: Vec<TransactionRow> = query_builder
            .build_query_as()
            .fetch_all(self.executor())
            .await
            .with_context(|| format!("Unable to get transactions for user {}", owner_id))?;
        Ok(entries.into_iter().map(TransactionEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_recent_transactions(
        &mut self,
        owner_id: i32,
        limit: i64,
    ) -> Result<Vec<TransactionEntry>, StoreError> {
        let entries: Vec<TransactionRow> = query_as(&format!(
            "SELECT {} FROM transactions WHERE owner_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2",
            TRANSACTION_COLUMNS
        ))
        .bind(owner_id)
        .bind(limit)
        .fetch_all(self.executor())
        .await
        .with_context(|| format!("Unable to get recent transactions for user {}", owner_id))?;
        Ok(entries.into_iter().map(TransactionEntry::from).collect())
    }

    #[instrument(skip(self, new_transaction))]
    async fn create_transaction(
        &mut self,
        owner_id: i32,
        new_transaction: NewTransactionEntry,
    ) -> Result<TransactionEntry, StoreError> {
        let created_at = new_transaction
            .created_at
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        let entry: TransactionRow = query_as(&format!(
            "INSERT INTO transactions(description, currency, amount, is_income, created_at, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            TRANSACTION_COLUMNS
        ))
        .bind(&new_transaction.description)
        .bind(&new_transaction.currency)
        .bind(new_transaction.amount)
        .bind(new_transaction.is_income)
        .bind(created_at)
        .bind(owner_id)
        .fetch_one(self.executor())
        .await
        .context("Unable to insert transaction")?;
        Ok(entry.into())
    }

    #[instrument(skip(self))]
    async fn delete_transaction(
        &mut self,
        owner_id: i32,
        transaction_id: i32,
    ) -> Result<Option<TransactionEntry>, StoreError> {
        let entry: Option<TransactionRow> = query_as(&format!(
            "DELETE FROM transactions WHERE id = $1 AND owner_id = $2 RETURNING {}",
            TRANSACTION_COLUMNS
        ))
        .bind(transaction_id)
        .bind(owner_id)
        .fetch_optional(self.executor())
        .await
        .with_context(|| format!("Unable to delete transaction {}", transaction_id))?;
        Ok(entry.map(TransactionEntry::from))
    }
}
