use crate::StoreError;
use async_trait::async_trait;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub image: String,
    /// Balance in minor currency units (cents).
    pub balance: i64,
    pub primary_currency: String,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub image: String,
    pub primary_currency: String,
}

/// Credential store. Lookups return `None` for absent users; only
/// `create_user` treats an existing row as an error.
#[async_trait]
pub trait UserRepo {
    async fn get_user(&mut self, user_id: i32) -> Result<Option<User>, StoreError>;

    /// Same as [get_user](UserRepo::get_user) but locks the user's row for
    /// the remainder of the unit of work. Callers that read the balance and
    /// write it back must go through this to stay serializable with
    /// concurrent updates of the same user.
    async fn get_user_for_update(&mut self, user_id: i32) -> Result<Option<User>, StoreError>;

    async fn get_user_by_username(&mut self, username: &str)
        -> Result<Option<User>, StoreError>;

    async fn create_user(&mut self, new_user: NewUser) -> Result<User, StoreError>;

    /// Overwrites the balance with an absolute value computed by the caller.
    async fn update_balance(&mut self, user_id: i32, new_balance: i64)
        -> Result<(), StoreError>;

    async fn get_balance(&mut self, user_id: i32)
        -> Result<Option<(i64, String)>, StoreError>;
}
