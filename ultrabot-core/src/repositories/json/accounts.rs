// File: ultrabot-core/src/repositories/json/accounts.rs

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;
use tracing::debug;

use ultrabot_common::models::Account;
use ultrabot_common::traits::repository_traits::AccountStore;

use crate::Error;

/// Keeps the whole roster in a single JSON array on disk.
///
/// Every save replaces the file with the full collection, written to a
/// temp file next to it and renamed over the original. There is no file
/// locking, so two processes racing each other means the last one wins.
#[derive(Debug, Clone)]
pub struct JsonAccountStore {
    path: PathBuf,
}

impl JsonAccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, source: std::io::Error) -> Error {
        Error::Storage {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// Pretty JSON with four-space indentation, the layout hand-edited roster
/// files already use.
pub fn to_roster_json(accounts: &[Account]) -> Result<Vec<u8>, Error> {
    let mut ser = Serializer::with_formatter(Vec::new(), PrettyFormatter::with_indent(b"    "));
    accounts.serialize(&mut ser)?;
    Ok(ser.into_inner())
}

/// Write `data` to `path` through a temp file in the same directory, so a
/// crash mid-write leaves the previous roster in place.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn check_unique_usernames(accounts: &[Account]) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for acc in accounts {
        if !seen.insert(acc.username.as_str()) {
            return Err(Error::Parse(format!("duplicate account username '{}'", acc.username)));
        }
    }
    Ok(())
}

#[async_trait]
impl AccountStore for JsonAccountStore {
    async fn load_accounts(&self) -> Result<Vec<Account>, Error> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.storage_error(e))?;
        let accounts: Vec<Account> = serde_json::from_str(&raw)?;
        check_unique_usernames(&accounts)?;
        debug!("Loaded {} accounts from {}", accounts.len(), self.path.display());
        Ok(accounts)
    }

    async fn save_accounts(&self, accounts: &[Account]) -> Result<(), Error> {
        let data = to_roster_json(accounts)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || atomic_write(&path, &data))
            .await
            .map_err(|e| self.storage_error(std::io::Error::other(e)))?
            .map_err(|e| self.storage_error(e))?;
        debug!("Saved {} accounts to {}", accounts.len(), self.path.display());
        Ok(())
    }
}
