use crate::sqlx_store::SQLxUnitOfWork;
use crate::tag_repo::TagRepo;
use crate::StoreError;
use anyhow::Context;
use async_trait::async_trait;
use sqlx::{query_scalar, QueryBuilder};
use tracing::instrument;

#[async_trait]
impl TagRepo for SQLxUnitOfWork {
    #[instrument(skip(self))]
    async fn get_tags(&mut self, transaction_id: i32) -> Result<Vec<String>, StoreError> {
        let tags = query_scalar("SELECT text FROM tags WHERE transaction_id = $1 ORDER BY id")
            .bind(transaction_id)
            .fetch_all(self.executor())
            .await
            .with_context(|| format!("Unable to get tags for transaction {}", transaction_id))?;
        Ok(tags)
    }

    #[instrument(skip(self, tags))]
    async fn add_tags(
        &mut self,
        user_id: i32,
        transaction_id: i32,
        tags: &[String],
    ) -> Result<(), StoreError> {
        if tags.is_empty() {
            return Ok(());
        }
        let mut query_builder = QueryBuilder::new("INSERT INTO tags(text, user_id, transaction_id) ");
        query_builder.push_values(tags, |mut row, tag| {
            row.push_bind(tag).push_bind(user_id).push_bind(transaction_id);
        });
        query_builder
            .build()
            .execute(self.executor())
            .await
            .with_context(|| format!("Unable to add tags to transaction {}", transaction_id))?;
        Ok(())
    }
}
