use crate::mem_repo::{State, StoredTransaction};
use crate::transaction_repo::TransactionRepoError::TransactionNotFound;
use crate::transaction_repo::{
    NewTransaction, Transaction, TransactionId, TransactionRepo, TransactionRepoError, UserRef,
};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub struct MemTransactionRepo {
    state: Arc<RwLock<State>>,
}

impl MemTransactionRepo {
    pub fn new(state: Arc<RwLock<State>>) -> MemTransactionRepo {
        MemTransactionRepo { state }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

/// Builds the read-side representation: the owner reference is expanded to
/// its public view when the user record exists, otherwise the bare id is
/// passed through (a join against a missing user row behaves the same way).
fn expand(state: &State, id: TransactionId, stored: &StoredTransaction) -> Transaction {
    let user = match state.users.get(&stored.user_id) {
        Some(user) => UserRef::Expanded(user.view()),
        None => UserRef::Id(stored.user_id.clone()),
    };
    Transaction {
        id,
        user,
        payee: stored.payee.clone(),
        amount: stored.amount,
        budgets_category: stored.budgets_category.clone(),
        accounts_name: stored.accounts_name.clone(),
        create_date: stored.create_date,
        update_date: stored.update_date,
    }
}

#[async_trait]
impl TransactionRepo for MemTransactionRepo {
    async fn create_new_transaction(
        &self,
        user: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let mut write_guard = self.write_lock()?;

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let now = Utc::now();
        let stored = StoredTransaction {
            user_id: user.to_owned(),
            payee: new_transaction.payee,
            amount: new_transaction.amount,
            budgets_category: new_transaction.budgets_category,
            accounts_name: new_transaction.accounts_name,
            create_date: now,
            update_date: now,
        };

        let transaction = Transaction {
            id,
            user: UserRef::Id(stored.user_id.clone()),
            payee: stored.payee.clone(),
            amount: stored.amount,
            budgets_category: stored.budgets_category.clone(),
            accounts_name: stored.accounts_name.clone(),
            create_date: stored.create_date,
            update_date: stored.update_date,
        };
        write_guard.transactions.insert(id, stored);

        Ok(transaction)
    }

    async fn get_user_transactions(
        &self,
        user: &str,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let read_guard = self.read_lock()?;

        let mut transactions: Vec<Transaction> = read_guard
            .transactions
            .iter()
            .filter(|(_, stored)| stored.user_id == user)
            .map(|(id, stored)| expand(&read_guard, *id, stored))
            .collect();
        transactions.sort_by_key(|t| t.id);

        Ok(transactions)
    }

    async fn get_all_transactions(&self) -> Result<Vec<Transaction>, TransactionRepoError> {
        let read_guard = self.read_lock()?;

        let mut transactions: Vec<Transaction> = read_guard
            .transactions
            .iter()
            .map(|(id, stored)| expand(&read_guard, *id, stored))
            .collect();
        transactions.sort_by_key(|t| t.id);

        Ok(transactions)
    }

    async fn get_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Transaction, TransactionRepoError> {
        let read_guard = self.read_lock()?;

        let stored = read_guard
            .transactions
            .get(&transaction_id)
            .ok_or(TransactionNotFound(transaction_id))?;
        Ok(expand(&read_guard, transaction_id, stored))
    }

    async fn update_transaction(
        &self,
        transaction_id: TransactionId,
        updated_transaction: NewTransaction,
    ) -> Result<(), TransactionRepoError> {
        let mut write_guard = self.write_lock()?;

        let stored = write_guard
            .transactions
            .get_mut(&transaction_id)
            .ok_or(TransactionNotFound(transaction_id))?;

        stored.payee = updated_transaction.payee;
        stored.amount = updated_transaction.amount;
        stored.budgets_category = updated_transaction.budgets_category;
        stored.accounts_name = updated_transaction.accounts_name;
        stored.update_date = Utc::now();

        Ok(())
    }

    async fn delete_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<(), TransactionRepoError> {
        let mut write_guard = self.write_lock()?;

        write_guard
            .transactions
            .remove(&transaction_id)
            .map(|_| ())
            .ok_or(TransactionNotFound(transaction_id))
    }
}
