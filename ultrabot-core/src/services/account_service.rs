use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use ultrabot_common::models::{Account, ClaimChange, Completion};
use ultrabot_common::traits::repository_traits::AccountStore;

use crate::Error;

/// Read-modify-write operations over the account roster.
///
/// Each call loads the full collection from the store, changes at most one
/// account, and writes the full collection back. Updates hold `write_lock`
/// from load to save, so concurrent handlers never overwrite each other.
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    write_lock: Mutex<()>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        self.store.load_accounts().await
    }

    pub async fn toggle_dailies(&self, username: &str) -> Result<Account, Error> {
        let (account, dailies) = self
            .update_account(username, |acc| Ok(acc.toggle_dailies()))
            .await?;
        info!("Dailies for '{}' => {}", username, dailies);
        Ok(account)
    }

    /// Claims an available account for `actor`, or releases an in-use one.
    /// Release does not check that `actor` is the user holding the claim.
    pub async fn toggle_claim(&self, username: &str, actor: &str) -> Result<(Account, ClaimChange), Error> {
        let (account, change) = self
            .update_account(username, |acc| acc.toggle_claim(actor))
            .await?;
        match &change {
            ClaimChange::Claimed { user } => info!("'{}' claimed by {}", username, user),
            ClaimChange::Released { previous_user } => {
                info!("'{}' released by {} (was held by {})", username, actor, previous_user)
            }
        }
        Ok((account, change))
    }

    pub async fn set_ultra_bosses(&self, username: &str, selected: &[String]) -> Result<Account, Error> {
        let (account, done) = self
            .update_account(username, |acc| {
                acc.set_completed_bosses(selected);
                Ok(acc.ultra_bosses.iter().filter(|(_, c)| *c == Completion::Done).count())
            })
            .await?;
        info!(
            "Ultra bosses for '{}' => {}/{} done",
            username,
            done,
            account.ultra_bosses.len()
        );
        Ok(account)
    }

    async fn update_account<T, F>(&self, username: &str, apply: F) -> Result<(Account, T), Error>
    where
        F: FnOnce(&mut Account) -> Result<T, Error>,
    {
        let _guard = self.write_lock.lock().await;
        let mut accounts = self.store.load_accounts().await?;
        let account = accounts
            .iter_mut()
            .find(|acc| acc.username == username)
            .ok_or_else(|| Error::NotFound(format!("account '{username}'")))?;
        let out = apply(account)?;
        let updated = account.clone();
        self.store.save_accounts(&accounts).await?;
        Ok((updated, out))
    }
}
