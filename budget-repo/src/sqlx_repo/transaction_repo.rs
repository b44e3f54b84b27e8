use crate::sqlx_repo::SQLxRepo;
use crate::transaction_repo::TransactionRepoError::TransactionNotFound;
use crate::transaction_repo::{
    NewTransaction, Transaction, TransactionId, TransactionRepo, TransactionRepoError, UserRef,
};
use crate::user_repo::UserView;
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{query, query_as, query_scalar};
use tracing::instrument;

// Read-side row. The owner columns come from a LEFT JOIN against users, so
// they are null when the referenced user no longer exists.
#[derive(sqlx::FromRow)]
struct TransactionEntry {
    id: TransactionId,
    payee: String,
    amount: Decimal,
    budgets_category: String,
    accounts_name: String,
    user_id: String,
    create_date: DateTime<Utc>,
    update_date: DateTime<Utc>,
    user_name: Option<String>,
    user_email: Option<String>,
}

impl From<TransactionEntry> for Transaction {
    fn from(value: TransactionEntry) -> Self {
        let user = match (value.user_name, value.user_email) {
            (Some(name), Some(email)) => UserRef::Expanded(UserView {
                id: value.user_id,
                name,
                email,
            }),
            _ => UserRef::Id(value.user_id),
        };
        Transaction {
            id: value.id,
            user,
            payee: value.payee,
            amount: value.amount,
            budgets_category: value.budgets_category,
            accounts_name: value.accounts_name,
            create_date: value.create_date,
            update_date: value.update_date,
        }
    }
}

const SELECT_EXPANDED: &str = "SELECT t.id, t.payee, t.amount, t.budgets_category, \
     t.accounts_name, t.user_id, t.create_date, t.update_date, \
     u.name AS user_name, u.email AS user_email \
     FROM transactions t LEFT JOIN users u ON u.id = t.user_id";

#[async_trait]
impl TransactionRepo for SQLxRepo {
    #[instrument(skip(self, new_transaction))]
    async fn create_new_transaction(
        &self,
        user: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let now = Utc::now();
        let id: TransactionId = query_scalar(
            "INSERT INTO transactions(payee, amount, budgets_category, accounts_name, \
             user_id, create_date, update_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) RETURNING id",
        )
        .bind(&new_transaction.payee)
        .bind(new_transaction.amount)
        .bind(&new_transaction.budgets_category)
        .bind(&new_transaction.accounts_name)
        .bind(user)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert transaction")?;

        Ok(Transaction {
            id,
            user: UserRef::Id(user.to_owned()),
            payee: new_transaction.payee,
            amount: new_transaction.amount,
            budgets_category: new_transaction.budgets_category,
            accounts_name: new_transaction.accounts_name,
            create_date: now,
            update_date: now,
        })
    }

    #[instrument(skip(self))]
    async fn get_user_transactions(
        &self,
        user: &str,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let entries: Vec<TransactionEntry> =
            query_as(&format!("{} WHERE t.user_id = $1 ORDER BY t.id", SELECT_EXPANDED))
                .bind(user)
                .fetch_all(&self.pool)
                .await
                .with_context(|| format!("Unable to get transactions for user {}", user))?;
        Ok(entries.into_iter().map(|e| e.into()).collect())
    }

    #[instrument(skip(self))]
    async fn get_all_transactions(&self) -> Result<Vec<Transaction>, TransactionRepoError> {
        let entries: Vec<TransactionEntry> =
            query_as(&format!("{} ORDER BY t.id", SELECT_EXPANDED))
                .fetch_all(&self.pool)
                .await
                .context("Unable to get all transactions")?;
        Ok(entries.into_iter().map(|e| e.into()).collect())
    }

    #[instrument(skip(self))]
    async fn get_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Transaction, TransactionRepoError> {
        let entry: Option<TransactionEntry> =
            query_as(&format!("{} WHERE t.id = $1", SELECT_EXPANDED))
                .bind(transaction_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get transaction {}", transaction_id))?;
        entry
            .ok_or(TransactionNotFound(transaction_id))
            .map(|e| e.into())
    }

    #[instrument(skip(self, updated_transaction))]
    async fn update_transaction(
        &self,
        transaction_id: TransactionId,
        updated_transaction: NewTransaction,
    ) -> Result<(), TransactionRepoError> {
        let result = query(
            "UPDATE transactions SET payee = $1, amount = $2, budgets_category = $3, \
             accounts_name = $4, update_date = $5 WHERE id = $6",
        )
        .bind(&updated_transaction.payee)
        .bind(updated_transaction.amount)
        .bind(&updated_transaction.budgets_category)
        .bind(&updated_transaction.accounts_name)
        .bind(Utc::now())
        .bind(transaction_id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Unable to update transaction {}", transaction_id))?;
        if result.rows_affected() == 0 {
            Err(TransactionNotFound(transaction_id))
        } else {
            Ok(())
        }
    }

    #[instrument(skip(self))]
    async fn delete_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<(), TransactionRepoError> {
        let result = query("DELETE FROM transactions WHERE id = $1")
            .bind(transaction_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to delete transaction {}", transaction_id))?;
        if result.rows_affected() == 0 {
            Err(TransactionNotFound(transaction_id))
        } else {
            Ok(())
        }
    }
}
