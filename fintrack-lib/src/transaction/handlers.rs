use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::error::HandlerError;
use crate::transaction::service::{self, TransactionQuery};
use crate::transaction::NewTransaction;
use crate::user::UserId;
use fintrack_repo::Store;

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    10
}

#[derive(Deserialize)]
struct ListParams {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_per_page")]
    per_page: i64,
    description: Option<String>,
    start_date: Option<i64>,
    end_date: Option<i64>,
}

/// `tags` may appear any number of times. `serde_urlencoded` keeps only the
/// last occurrence of a repeated key, so they are picked out of the raw
/// query string instead. Both `tags` and `tags[]` spellings are accepted.
fn tag_params(req: &HttpRequest) -> Result<Vec<String>, HandlerError> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .map_err(|e| HandlerError::Validation(e.to_string()))?;
    Ok(pairs
        .into_inner()
        .into_iter()
        .filter(|(key, _)| key == "tags" || key == "tags[]")
        .map(|(_, value)| value)
        .collect())
}

#[get("/recent")]
pub async fn get_recent_transactions(
    store: web::Data<Arc<dyn Store>>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, HandlerError> {
    let transactions =
        service::get_recent_transactions(store.get_ref().as_ref(), *user_id).await?;
    Ok(HttpResponse::Ok().json(transactions))
}

#[get("")]
pub async fn get_transactions(
    req: HttpRequest,
    store: web::Data<Arc<dyn Store>>,
    user_id: web::ReqData<UserId>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, HandlerError> {
    let tags = tag_params(&req)?;
    let params = params.into_inner();
    let query = TransactionQuery {
        page: params.page,
        per_page: params.per_page,
        description: params.description,
        start_date: params.start_date,
        end_date: params.end_date,
        tags,
    };

    let transactions = service::get_transactions(store.get_ref().as_ref(), *user_id, query).await?;
    Ok(HttpResponse::Ok().json(transactions))
}

#[post("")]
pub async fn create_transaction(
    store: web::Data<Arc<dyn Store>>,
    user_id: web::ReqData<UserId>,
    new_transaction: web::Json<NewTransaction>,
) -> Result<HttpResponse, HandlerError> {
    service::create_transaction(store.get_ref().as_ref(), *user_id, new_transaction.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(true))
}

#[get("/{transaction_id}")]
pub async fn get_transaction(
    store: web::Data<Arc<dyn Store>>,
    user_id: web::ReqData<UserId>,
    transaction_id: web::Path<i32>,
) -> Result<HttpResponse, HandlerError> {
    let transaction =
        service::get_transaction(store.get_ref().as_ref(), *user_id, transaction_id.into_inner())
            .await?;
    // absent or someone else's transaction both serialize as `null`
    Ok(HttpResponse::Ok().json(transaction))
}

#[delete("/{transaction_id}")]
pub async fn delete_transaction(
    store: web::Data<Arc<dyn Store>>,
    user_id: web::ReqData<UserId>,
    transaction_id: web::Path<i32>,
) -> Result<HttpResponse, HandlerError> {
    let deleted = service::delete_transaction(
        store.get_ref().as_ref(),
        *user_id,
        transaction_id.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(deleted))
}
