// File: ultrabot-core/tests/test_utils/mod.rs

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use ultrabot_common::models::{Account, Completion, UltraBosses};
use ultrabot_common::traits::repository_traits::AccountStore;
use ultrabot_core::Error;

/// AccountStore backed by a Vec, counting how many times it was saved.
#[derive(Default)]
pub struct MemoryAccountStore {
    pub accounts: Mutex<Vec<Account>>,
    pub saves: Mutex<usize>,
}

impl MemoryAccountStore {
    pub fn with(accounts: Vec<Account>) -> Self {
        Self { accounts: Mutex::new(accounts), saves: Mutex::new(0) }
    }

    pub fn snapshot(&self) -> Vec<Account> {
        self.accounts.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn load_accounts(&self) -> Result<Vec<Account>, Error> {
        Ok(self.snapshot())
    }

    async fn save_accounts(&self, accounts: &[Account]) -> Result<(), Error> {
        *self.accounts.lock().unwrap() = accounts.to_vec();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

pub fn account(name: &str, bosses: &[(&str, Completion)]) -> Account {
    Account::new(name, bosses.iter().copied().collect::<UltraBosses>())
}

/// Two accounts sharing bosses A, B and C; nothing done yet.
pub fn roster() -> Vec<Account> {
    let bosses = [("A", Completion::NotDone), ("B", Completion::NotDone), ("C", Completion::NotDone)];
    vec![account("alt1", &bosses), account("alt2", &bosses)]
}
