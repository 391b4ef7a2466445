use super::{Account, AccountRepository, NewAccount, SaveOutcome};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process account store with the same duplicate rule as the `accounts`
/// table: one account per case-insensitive email.
#[derive(Debug, Default)]
pub struct MemoryAccountRepository {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryAccountRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored accounts, in insertion order.
    pub async fn accounts(&self) -> Vec<Account> {
        self.accounts.read().await.clone()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn count(&self) -> Result<u64> {
        Ok(self.accounts.read().await.len() as u64)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|account| account.email == email).cloned())
    }

    async fn save(&self, account: NewAccount) -> Result<SaveOutcome> {
        let mut accounts = self.accounts.write().await;
        let key = account.email.to_lowercase();
        if accounts
            .iter()
            .any(|existing| existing.email.to_lowercase() == key)
        {
            return Ok(SaveOutcome::Duplicate);
        }

        let account = account.into_account(Uuid::now_v7());
        accounts.push(account.clone());
        Ok(SaveOutcome::Created(account))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
