use std::sync::Arc;

use rstest::*;
use tracing::info;
use tracing::Level;
use uuid::Uuid;

use fintrack_lib::auth::password::encode_password;
use fintrack_lib::user::UserId;
use fintrack_repo::user_repo::NewUser;
use fintrack_repo::Store;

pub mod mock;

macro_rules! build_app {
    ($store:ident, $user_id:expr) => {{
        let app = App::new()
            .app_data(Data::new($store.clone()))
            .wrap(fintrack_lib::tracing::create_middleware())
            .service(
                fintrack_lib::transaction::transaction_service()
                    .wrap(MockAuthentication { user_id: $user_id }),
            )
            .service(
                fintrack_lib::user::user_service()
                    .wrap(MockAuthentication { user_id: $user_id }),
            );
        tracing::info!("Built app");
        app
    }};
}

macro_rules! create_transaction {
    (&$service:ident, $new_transaction:ident) => {{
        let request = TestRequest::post()
            .uri("/transactions")
            .set_json(&$new_transaction)
            .to_request();
        let response = test::call_service(&$service, request).await;
        assert!(
            response.status().is_success(),
            "Got {} response when creating transaction",
            response.status()
        );
        let created: bool = test::read_body_json(response).await;
        assert!(created);
    }};
}

macro_rules! recent_transactions {
    (&$service:ident) => {{
        let request = TestRequest::get().uri("/transactions/recent").to_request();
        let response = test::call_service(&$service, request).await;
        assert!(
            response.status().is_success(),
            "Got {} response when fetching recent transactions",
            response.status()
        );
        let transactions: Vec<fintrack_lib::transaction::Transaction> =
            test::read_body_json(response).await;
        transactions
    }};
}

macro_rules! list_transactions {
    (&$service:ident, $query:expr) => {{
        let request = TestRequest::get()
            .uri(&format!("/transactions{}", $query))
            .to_request();
        let response = test::call_service(&$service, request).await;
        assert!(
            response.status().is_success(),
            "Got {} response when listing transactions",
            response.status()
        );
        let transactions: Vec<fintrack_lib::transaction::Transaction> =
            test::read_body_json(response).await;
        transactions
    }};
}

macro_rules! balance_of {
    (&$service:ident) => {{
        let request = TestRequest::get().uri("/users/balance").to_request();
        let response = test::call_service(&$service, request).await;
        assert!(
            response.status().is_success(),
            "Got {} response when fetching balance",
            response.status()
        );
        let balance: fintrack_lib::user::Balance = test::read_body_json(response).await;
        balance.balance
    }};
}

pub struct TestUser {
    pub user_id: UserId,
    pub username: String,
}

impl TestUser {
    pub async fn new(store: &Arc<dyn Store>) -> TestUser {
        let username = "test-user-".to_owned() + &Uuid::new_v4().to_string();
        let mut uow = store.begin().await.unwrap();
        let user = uow
            .create_user(NewUser {
                username: username.clone(),
                password_hash: encode_password("pass").unwrap(),
                image: format!(
                    "https://api.dicebear.com/7.x/identicon/svg?seed={}",
                    username
                ),
                primary_currency: "BYN".to_owned(),
            })
            .await
            .unwrap();
        uow.commit().await.unwrap();
        info!(user_id = user.id, %username, "Created user");
        TestUser {
            user_id: user.id,
            username,
        }
    }
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();
    info!("tracing initialized");
}

#[fixture]
pub fn store(_tracing_setup: &()) -> Arc<dyn Store> {
    let (store, _health_check) = fintrack_repo::mem_store::create_store();
    store
}
