use crate::sqlx_store::SQLxUnitOfWork;
use crate::user_repo::{NewUser, User, UserRepo};
use crate::StoreError;
use anyhow::Context;
use async_trait::async_trait;
use sqlx::{query, query_as};
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    password_hash: String,
    image: String,
    balance: i64,
    primary_currency: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            image: row.image,
            balance: row.balance,
            primary_currency: row.primary_currency,
        }
    }
}

const USER_COLUMNS: &str = "id, username, password_hash, image, balance, primary_currency";

#[async_trait]
impl UserRepo for SQLxUnitOfWork {
    #[instrument(skip(self))]
    async fn get_user(&mut self, user_id: i32) -> Result<Option<User>, StoreError> {
        let user: Option<UserRow> =
            query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(user_id)
                .fetch_optional(self.executor())
                .await
                .with_context(|| format!("Unable to get user {}", user_id))?;
        Ok(user.map(User::from))
    }

    #[instrument(skip(self))]
    async fn get_user_for_update(&mut self, user_id: i32) -> Result<Option<User>, StoreError> {
        let user: Option<UserRow> = query_as(&format!(
            "SELECT {} FROM users WHERE id = $1 FOR UPDATE",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(self.executor())
        .await
        .with_context(|| format!("Unable to lock user {}", user_id))?;
        Ok(user.map(User::from))
    }

    #[instrument(skip(self))]
    async fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        let user: Option<UserRow> = query_as(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(self.executor())
        .await
        .with_context(|| format!("Unable to get user {}", username))?;
        Ok(user.map(User::from))
    }

    #[instrument(skip(self, new_user))]
    async fn create_user(&mut self, new_user: NewUser) -> Result<User, StoreError> {
        let inserted: Option<UserRow> = query_as(&format!(
            "INSERT INTO users(username, password_hash, image, primary_currency) \
             VALUES ($1, $2, $3, $4) ON CONFLICT (username) DO NOTHING RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.image)
        .bind(&new_user.primary_currency)
        .fetch_optional(self.executor())
        .await
        .with_context(|| format!("Unable to create user {}", new_user.username))?;
        inserted
            .map(User::from)
            .ok_or(StoreError::UsernameTaken(new_user.username))
    }

    #[instrument(skip(self))]
    async fn update_balance(
        &mut self,
        user_id: i32,
        new_balance: i64,
    ) -> Result<(), StoreError> {
        let result = query("UPDATE users SET balance = $1 WHERE id = $2")
            .bind(new_balance)
            .bind(user_id)
            .execute(self.executor())
            .await
            .with_context(|| format!("Unable to update balance for user {}", user_id))?;
        if result.rows_affected() == 0 {
            return Err(anyhow::anyhow!("Balance update touched no rows for user {}", user_id).into());
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_balance(&mut self, user_id: i32) -> Result<Option<(i64, String)>, StoreError> {
        let balance: Option<(i64, String)> =
            query_as("SELECT balance, primary_currency FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(self.executor())
                .await
                .with_context(|| format!("Unable to get balance for user {}", user_id))?;
        Ok(balance)
    }
}
