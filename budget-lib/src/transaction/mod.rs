use actix_web::{web, Scope};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::HandlerError;
use budget_repo::transaction_repo::NewTransaction;

pub mod handlers;

pub fn transaction_service() -> Scope {
    web::scope("/transactions")
        .service(handlers::create_new_transaction)
        .service(handlers::get_user_transactions)
        // literal segment, must be registered ahead of /{transaction_id}
        .service(handlers::get_all_transactions)
        .service(handlers::get_transaction)
        .service(handlers::update_transaction)
        .service(handlers::delete_transaction)
}

/// Inbound payload for create and update. The business fields are optional
/// so an absent one can be rejected with a 400 before any datastore call.
/// Presence is the only check; an empty string passes.
#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub payee: Option<String>,
    pub amount: Option<Decimal>,
    pub budgets_category: Option<String>,
    pub accounts_name: Option<String>,
}

impl TransactionRequest {
    pub fn validate(self) -> Result<NewTransaction, HandlerError> {
        match (
            self.payee,
            self.amount,
            self.budgets_category,
            self.accounts_name,
        ) {
            (Some(payee), Some(amount), Some(budgets_category), Some(accounts_name)) => Ok(
                NewTransaction::new(payee, amount, budgets_category, accounts_name),
            ),
            _ => Err(HandlerError::MissingField),
        }
    }
}
