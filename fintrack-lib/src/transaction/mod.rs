use actix_web::{web, Scope};
use fintrack_repo::transaction_repo::TransactionEntry;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::HandlerError;

mod handlers;
pub(crate) mod service;

pub fn transaction_service() -> Scope {
    web::scope("/transactions")
        .service(handlers::get_recent_transactions)
        .service(handlers::get_transactions)
        .service(handlers::create_transaction)
        .service(handlers::get_transaction)
        .service(handlers::delete_transaction)
}

/// Client-facing transaction. `amount` is in major currency units; the
/// stores only ever see minor units.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Transaction {
    pub id: i32,
    pub description: String,
    pub currency: String,
    pub amount: Decimal,
    pub is_income: bool,
    pub created_at: i64,
    pub tags: Vec<String>,
}

impl Transaction {
    fn from_entry_and_tags(entry: TransactionEntry, tags: Vec<String>) -> Transaction {
        Transaction {
            id: entry.id,
            description: entry.description,
            currency: entry.currency,
            amount: to_major_units(entry.amount),
            is_income: entry.is_income,
            created_at: entry.created_at,
            tags,
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub currency: String,
    pub amount: Decimal,
    pub is_income: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Truncates toward zero after scaling, matching how amounts were captured
/// historically. Magnitudes are stored unsigned; the income flag carries the
/// sign convention.
pub(crate) fn to_minor_units(amount: Decimal) -> Result<i64, HandlerError> {
    if amount.is_sign_negative() {
        return Err(HandlerError::Validation(
            "Amount must not be negative".to_owned(),
        ));
    }
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|scaled| scaled.trunc())
        .and_then(|scaled| scaled.to_i64())
        .ok_or_else(|| HandlerError::Validation("Amount is out of range".to_owned()))
}

pub(crate) fn to_major_units(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}
