use crate::StoreError;
use async_trait::async_trait;

/// Free-text labels attached to transactions. Duplicate text across
/// transactions is expected; nothing is deduplicated.
#[async_trait]
pub trait TagRepo {
    /// Tag texts for one transaction, in insertion order.
    async fn get_tags(&mut self, transaction_id: i32) -> Result<Vec<String>, StoreError>;

    async fn add_tags(
        &mut self,
        user_id: i32,
        transaction_id: i32,
        tags: &[String],
    ) -> Result<(), StoreError>;
}
