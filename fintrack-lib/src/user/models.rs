use crate::user::UserId;
use fintrack_repo::user_repo::User;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Client-facing view of a user. The password hash and the raw minor-unit
/// balance never leave the service.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub image: String,
    pub primary_currency: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            username: user.username,
            image: user.image,
            primary_currency: user.primary_currency,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Balance {
    pub balance: Decimal,
    pub currency: String,
}
