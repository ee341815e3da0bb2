use crate::mem_store::{MemUnitOfWork, TagEntry};
use crate::tag_repo::TagRepo;
use crate::StoreError;
use async_trait::async_trait;

#[async_trait]
impl TagRepo for MemUnitOfWork {
    async fn get_tags(&mut self, transaction_id: i32) -> Result<Vec<String>, StoreError> {
        Ok(self
            .staged
            .tags
            .iter()
            .filter(|t| t.transaction_id == transaction_id)
            .map(|t| t.text.clone())
            .collect())
    }

    async fn add_tags(
        &mut self,
        user_id: i32,
        transaction_id: i32,
        tags: &[String],
    ) -> Result<(), StoreError> {
        for text in tags {
            self.staged.next_tag_id += 1;
            self.staged.tags.push(TagEntry {
                id: self.staged.next_tag_id,
                text: text.clone(),
                user_id,
                transaction_id,
            });
        }
        Ok(())
    }
}
