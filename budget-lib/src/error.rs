use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use budget_repo::transaction_repo::TransactionRepoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Missing a field.")]
    MissingField,
    #[error(transparent)]
    Repo(#[from] TransactionRepoError),
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::MissingField => StatusCode::BAD_REQUEST,
            HandlerError::Repo(TransactionRepoError::TransactionNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            HandlerError::Repo(TransactionRepoError::Other(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
