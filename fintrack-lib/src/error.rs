use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use fintrack_repo::StoreError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid credentials")]
    Unauthorized,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<StoreError> for HandlerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UsernameTaken(username) => {
                HandlerError::Conflict(format!("Username {} is already taken", username))
            }
            StoreError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl From<argon2::Error> for HandlerError {
    fn from(e: argon2::Error) -> Self {
        HandlerError::Other(anyhow::Error::new(e).context("Password hashing failed"))
    }
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::NotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::Conflict(_) => StatusCode::CONFLICT,
            HandlerError::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerError::Validation(_) => StatusCode::BAD_REQUEST,
            HandlerError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if let HandlerError::Other(e) = self {
            // detail stays in the logs, the client gets a generic failure
            error!(err = ?e, "request failed");
            return HttpResponse::InternalServerError().finish();
        }
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
