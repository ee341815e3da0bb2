extern crate rstest;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::test::TestRequest;
use actix_web::web::Data;
use actix_web::App;
use rstest::rstest;
use rust_decimal::Decimal;
use tracing::instrument;

use crate::utils::mock::MockAuthentication;
use fintrack_lib::user::UserProfile;
use fintrack_repo::Store;
use utils::store;
use utils::TestUser;

#[macro_use]
mod utils;

#[instrument(skip(store))]
#[rstest]
#[actix_rt::test]
async fn test_me_returns_profile_without_secrets(store: Arc<dyn Store>) {
    let test_user = TestUser::new(&store).await;
    let app = build_app!(store, test_user.user_id);
    let service = test::init_service(app).await;

    let request = TestRequest::get().uri("/users/me").to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());

    let body = test::read_body(response).await;
    let raw = std::str::from_utf8(&body).unwrap();
    assert!(!raw.contains("password"), "profile leaked: {}", raw);

    let profile: UserProfile = serde_json::from_str(raw).unwrap();
    assert_eq!(profile.id, test_user.user_id);
    assert_eq!(profile.username, test_user.username);
    assert_eq!(profile.primary_currency, "BYN");
}

#[instrument(skip(store))]
#[rstest]
#[actix_rt::test]
async fn test_new_user_starts_at_zero(store: Arc<dyn Store>) {
    let test_user = TestUser::new(&store).await;
    let app = build_app!(store, test_user.user_id);
    let service = test::init_service(app).await;

    let balance = balance_of!(&service);
    assert_eq!(balance, Decimal::ZERO);
}

#[instrument(skip(store))]
#[rstest]
#[actix_rt::test]
async fn test_unknown_user_is_not_found(store: Arc<dyn Store>) {
    let app = build_app!(store, 9999);
    let service = test::init_service(app).await;

    let request = TestRequest::get().uri("/users/me").to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = TestRequest::get().uri("/users/balance").to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
