mod handlers;
mod models;

use actix_web::{web, Scope};

pub type UserId = i32;

pub use models::{Balance, UserProfile};

pub fn user_service() -> Scope {
    web::scope("/users")
        .service(handlers::me)
        .service(handlers::balance)
}
