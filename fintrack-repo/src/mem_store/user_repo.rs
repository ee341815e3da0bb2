use crate::mem_store::MemUnitOfWork;
use crate::user_repo::{NewUser, User, UserRepo};
use crate::StoreError;
use async_trait::async_trait;

#[async_trait]
impl UserRepo for MemUnitOfWork {
    async fn get_user(&mut self, user_id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.staged.users.get(&user_id).cloned())
    }

    // The staged copy is private to this unit of work, so the plain read
    // already behaves like a locked one.
    async fn get_user_for_update(&mut self, user_id: i32) -> Result<Option<User>, StoreError> {
        self.get_user(user_id).await
    }

    async fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .staged
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&mut self, new_user: NewUser) -> Result<User, StoreError> {
        if self
            .staged
            .users
            .values()
            .any(|u| u.username == new_user.username)
        {
            return Err(StoreError::UsernameTaken(new_user.username));
        }

        self.staged.next_user_id += 1;
        let user = User {
            id: self.staged.next_user_id,
            username: new_user.username,
            password_hash: new_user.password_hash,
            image: new_user.image,
            balance: 0,
            primary_currency: new_user.primary_currency,
        };
        self.staged.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_balance(
        &mut self,
        user_id: i32,
        new_balance: i64,
    ) -> Result<(), StoreError> {
        match self.staged.users.get_mut(&user_id) {
            Some(user) => {
                user.balance = new_balance;
                Ok(())
            }
            None => Err(StoreError::Other(anyhow::anyhow!(
                "Balance update touched no rows for user {}",
                user_id
            ))),
        }
    }

    async fn get_balance(&mut self, user_id: i32) -> Result<Option<(i64, String)>, StoreError> {
        Ok(self
            .staged
            .users
            .get(&user_id)
            .map(|u| (u.balance, u.primary_currency.clone())))
    }
}
