use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::user_repo::UserView;

pub type TransactionId = i32;

#[async_trait]
pub trait TransactionRepo: Sync + Send {
    async fn create_new_transaction(
        &self,
        user: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError>;

    /// Transactions owned by `user`, owner expanded to its public view.
    async fn get_user_transactions(
        &self,
        user: &str,
    ) -> Result<Vec<Transaction>, TransactionRepoError>;

    /// Every transaction regardless of owner, owner expanded.
    async fn get_all_transactions(&self) -> Result<Vec<Transaction>, TransactionRepoError>;

    async fn get_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Transaction, TransactionRepoError>;

    /// Replaces the four business fields and refreshes `update_date`.
    /// `create_date` and the owner are never touched.
    async fn update_transaction(
        &self,
        transaction_id: TransactionId,
        updated_transaction: NewTransaction,
    ) -> Result<(), TransactionRepoError>;

    async fn delete_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<(), TransactionRepoError>;
}

#[derive(Error, Debug)]
pub enum TransactionRepoError {
    #[error("Transaction with id {0} not found")]
    TransactionNotFound(TransactionId),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Owner reference on a transaction. Write paths store the bare id; read
/// paths join the user table and carry the sanitized public view. On the
/// wire the two cases stay distinguishable: a plain string or an object
/// without a password hash.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(untagged)]
pub enum UserRef {
    Expanded(UserView),
    Id(String),
}

impl UserRef {
    pub fn user_id(&self) -> &str {
        match self {
            UserRef::Id(id) => id,
            UserRef::Expanded(view) => &view.id,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub user: UserRef,
    pub payee: String,
    pub amount: Decimal,
    pub budgets_category: String,
    pub accounts_name: String,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub payee: String,
    pub amount: Decimal,
    pub budgets_category: String,
    pub accounts_name: String,
}

impl NewTransaction {
    pub const fn new(
        payee: String,
        amount: Decimal,
        budgets_category: String,
        accounts_name: String,
    ) -> NewTransaction {
        NewTransaction {
            payee,
            amount,
            budgets_category,
            accounts_name,
        }
    }
}
