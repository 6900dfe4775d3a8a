use async_trait::async_trait;

use crate::error::Error;
use crate::models::Account;

/// Whole-collection storage for the tracked accounts.
///
/// There is no partial update: callers load everything, change what they
/// need, and hand the full collection back to `save_accounts`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn load_accounts(&self) -> Result<Vec<Account>, Error>;
    async fn save_accounts(&self, accounts: &[Account]) -> Result<(), Error>;
}
