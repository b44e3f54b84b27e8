use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::auth::UserId;
use crate::error::HandlerError;
use budget_repo::transaction_repo::{TransactionId, TransactionRepo};

use super::TransactionRequest;

#[post("")]
pub async fn create_new_transaction(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
    new_transaction: web::Json<TransactionRequest>,
) -> Result<impl Responder, HandlerError> {
    let new_transaction = new_transaction.into_inner().validate()?;
    let transaction = transaction_repo
        .create_new_transaction(&user_id.into_inner(), new_transaction)
        .await?;
    Ok(HttpResponse::Created().json(transaction))
}

#[get("")]
pub async fn get_user_transactions(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    let transactions = transaction_repo
        .get_user_transactions(&user_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(transactions))
}

#[get("/all")]
pub async fn get_all_transactions(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
) -> Result<impl Responder, HandlerError> {
    let transactions = transaction_repo.get_all_transactions().await?;
    Ok(HttpResponse::Ok().json(transactions))
}

#[get("/{transaction_id}")]
pub async fn get_transaction(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    transaction_id: web::Path<TransactionId>,
) -> Result<impl Responder, HandlerError> {
    let transaction = transaction_repo
        .get_transaction(transaction_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(transaction))
}

#[put("/{transaction_id}")]
pub async fn update_transaction(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    transaction_id: web::Path<TransactionId>,
    updated_transaction: web::Json<TransactionRequest>,
) -> Result<impl Responder, HandlerError> {
    let updated_transaction = updated_transaction.into_inner().validate()?;
    transaction_repo
        .update_transaction(transaction_id.into_inner(), updated_transaction)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/{transaction_id}")]
pub async fn delete_transaction(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    transaction_id: web::Path<TransactionId>,
) -> Result<impl Responder, HandlerError> {
    transaction_repo
        .delete_transaction(transaction_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
