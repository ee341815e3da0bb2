use crate::error::HandlerError;
use crate::transaction::to_major_units;
use crate::user::{Balance, UserId, UserProfile};
use actix_web::{web, HttpResponse, Responder};
use fintrack_repo::Store;
use std::sync::Arc;

#[get("/me")]
pub async fn me(
    store: web::Data<Arc<dyn Store>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    let mut uow = store.begin().await?;
    let user = uow
        .get_user(user_id.into_inner())
        .await?
        .ok_or(HandlerError::NotFound("User"))?;
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

#[get("/balance")]
pub async fn balance(
    store: web::Data<Arc<dyn Store>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    let mut uow = store.begin().await?;
    let (balance, currency) = uow
        .get_balance(user_id.into_inner())
        .await?
        .ok_or(HandlerError::NotFound("User"))?;
    Ok(HttpResponse::Ok().json(Balance {
        balance: to_major_units(balance),
        currency,
    }))
}
