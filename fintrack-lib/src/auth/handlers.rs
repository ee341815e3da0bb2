use crate::auth::jwt::JWTAuth;
use crate::auth::password;
use crate::error::HandlerError;
use crate::user::UserProfile;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use fintrack_repo::user_repo::{NewUser, User};
use fintrack_repo::{Store, UnitOfWork};
use serde::Deserialize;
use serde::Serialize;
use std::sync::Arc;

const DEFAULT_CURRENCY: &str = "BYN";

#[derive(Serialize, Deserialize)]
pub struct RegistrationData {
    pub username: String,
    pub password: String,
    pub image: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

fn default_avatar(username: &str) -> String {
    format!(
        "https://api.dicebear.com/7.x/identicon/svg?seed={}",
        username
    )
}

/// Looks up the user and verifies the password. An unknown username and a
/// wrong password are both reported as `None`; callers must not tell them
/// apart.
async fn authenticate(
    uow: &mut dyn UnitOfWork,
    username: &str,
    password: &str,
) -> Result<Option<User>, HandlerError> {
    let Some(user) = uow.get_user_by_username(username).await? else {
        return Ok(None);
    };
    if password::verify_password(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

#[post("/register")]
pub async fn register(
    store: web::Data<Arc<dyn Store>>,
    data: web::Json<RegistrationData>,
) -> Result<impl Responder, HandlerError> {
    let data = data.into_inner();

    let mut uow = store.begin().await?;
    if uow.get_user_by_username(&data.username).await?.is_some() {
        return Err(HandlerError::Conflict(format!(
            "Username {} is already taken",
            data.username
        )));
    }

    let image = data
        .image
        .unwrap_or_else(|| default_avatar(&data.username));
    let password_hash = password::encode_password(&data.password)?;
    uow.create_user(NewUser {
        username: data.username,
        password_hash,
        image,
        primary_currency: DEFAULT_CURRENCY.to_owned(),
    })
    .await?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(true))
}

#[post("/token")]
pub async fn get_token(
    store: web::Data<Arc<dyn Store>>,
    credentials: web::Form<Credentials>,
    req: HttpRequest,
) -> Result<impl Responder, HandlerError> {
    let credentials = credentials.into_inner();

    let mut uow = store.begin().await?;
    let user = authenticate(uow.as_mut(), &credentials.username, &credentials.password)
        .await?
        .ok_or(HandlerError::Unauthorized)?;

    let jwt_auth = req.app_data::<JWTAuth>().unwrap();
    Ok(HttpResponse::Ok().json(Token {
        access_token: jwt_auth.create_token(user.id),
        token_type: "bearer".to_owned(),
    }))
}

#[post("/login")]
pub async fn login(
    store: web::Data<Arc<dyn Store>>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, HandlerError> {
    let credentials = credentials.into_inner();

    let mut uow = store.begin().await?;
    let user = authenticate(uow.as_mut(), &credentials.username, &credentials.password)
        .await?
        .ok_or(HandlerError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}
