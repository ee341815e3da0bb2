use crate::mem_store::MemUnitOfWork;
use crate::transaction_repo::{
    NewTransactionEntry, PageOptions, TransactionEntry, TransactionFilter, TransactionRepo,
};
use crate::StoreError;
use async_trait::async_trait;
use chrono::Utc;

fn matches(entry: &TransactionEntry, filter: &TransactionFilter) -> bool {
    if let Some(description) = &filter.description {
        if !entry.description.contains(description.as_str()) {
            return false;
        }
    }
    if let Some(start_date) = filter.start_date {
        if entry.created_at < start_date {
            return false;
        }
    }
    if let Some(end_date) = filter.end_date {
        if entry.created_at > end_date {
            return false;
        }
    }
    true
}

impl MemUnitOfWork {
    fn sorted_transactions(&self, owner_id: i32) -> Vec<TransactionEntry> {
        let mut transactions: Vec<TransactionEntry> = self
            .staged
            .transactions
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        transactions.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        transactions
    }
}

#[async_trait]
impl TransactionRepo for MemUnitOfWork {
    async fn get_transaction(
        &mut self,
        owner_id: i32,
        transaction_id: i32,
    ) -> Result<Option<TransactionEntry>, StoreError> {
        Ok(self
            .staged
            .transactions
            .get(&transaction_id)
            .filter(|t| t.owner_id == owner_id)
            .cloned())
    }

    async fn get_transactions(
        &mut self,
        owner_id: i32,
        filter: &TransactionFilter,
        page: &PageOptions,
    ) -> Result<Vec<TransactionEntry>, StoreError> {
        Ok(self
            .sorted_transactions(owner_id)
            .into_iter()
            .filter(|t| matches(t, filter))
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn get_recent_transactions(
        &mut self,
        owner_id: i32,
        limit: i64,
    ) -> Result<Vec<TransactionEntry>, StoreError> {
        Ok(self
            .sorted_transactions(owner_id)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn create_transaction(
        &mut self,
        owner_id: i32,
        new_transaction: NewTransactionEntry,
    ) -> Result<TransactionEntry, StoreError> {
        self.staged.next_transaction_id += 1;
        let entry = TransactionEntry {
            id: self.staged.next_transaction_id,
            description: new_transaction.description,
            currency: new_transaction.currency,
            amount: new_transaction.amount,
            is_income: new_transaction.is_income,
            created_at: new_transaction
                .created_at
                .unwrap_or_else(|| Utc::now().timestamp_millis()),
            owner_id,
        };
        self.staged.transactions.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn delete_transaction(
        &mut self,
        owner_id: i32,
        transaction_id: i32,
    ) -> Result<Option<TransactionEntry>, StoreError> {
        let owned = self
            .staged
            .transactions
            .get(&transaction_id)
            .map(|t| t.owner_id == owner_id)
            .unwrap_or(false);
        if !owned {
            return Ok(None);
        }

        let entry = self.staged.transactions.remove(&transaction_id);
        // cascade, as the schema's foreign keys would
        self.staged.tags.retain(|t| t.transaction_id != transaction_id);
        Ok(entry)
    }
}
