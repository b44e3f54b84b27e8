use crate::transaction_repo::{TransactionId, TransactionRepo};
use crate::user_repo::{User, UserRepo};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

mod transaction_repo;
mod user_repo;

pub fn create_repos() -> (Arc<dyn TransactionRepo>, Arc<dyn UserRepo>) {
    let state = Arc::new(RwLock::new(State::new()));

    let transaction_repo = transaction_repo::MemTransactionRepo::new(state.clone());
    let user_repo = user_repo::MemUserRepo::new(state);

    (Arc::new(transaction_repo), Arc::new(user_repo))
}

pub(crate) struct StoredTransaction {
    pub user_id: String,
    pub payee: String,
    pub amount: Decimal,
    pub budgets_category: String,
    pub accounts_name: String,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

// Shared between the transaction and user repos so that transaction reads
// can expand the owner reference, the way the SQL backend joins the users
// table.
pub(crate) struct State {
    pub transactions: HashMap<TransactionId, StoredTransaction>,
    pub users: HashMap<String, User>,
    pub next_id: TransactionId,
}

impl State {
    fn new() -> State {
        State {
            transactions: HashMap::new(),
            users: HashMap::new(),
            next_id: 0,
        }
    }
}
