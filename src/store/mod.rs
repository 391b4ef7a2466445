//! Account storage.
//!
//! Handlers only see [`AccountRepository`]; the server wires in
//! [`PgAccountRepository`] and tests use [`MemoryAccountRepository`].
//! Callers are responsible for canonicalizing emails before lookups: both
//! implementations compare `find_by_email` arguments exactly.

mod memory;
mod postgres;

pub use memory::MemoryAccountRepository;
pub use postgres::{PgAccountRepository, SCHEMA_SQL, apply_schema};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// How the account owner will be verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationType {
    Email,
}

impl VerificationType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
        }
    }
}

impl FromStr for VerificationType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "EMAIL" => Ok(Self::Email),
            other => Err(anyhow!("unknown verification type: {other}")),
        }
    }
}

impl fmt::Display for VerificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored account.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub verification_type: VerificationType,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"***")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("verification_type", &self.verification_type)
            .finish()
    }
}

/// Account fields accepted by [`AccountRepository::save`].
///
/// `email` must already be canonical (trimmed, lowercase).
#[derive(Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub verification_type: VerificationType,
}

impl NewAccount {
    fn into_account(self, id: Uuid) -> Account {
        Account {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            verification_type: self.verification_type,
        }
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"***")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("verification_type", &self.verification_type)
            .finish()
    }
}

/// Result of [`AccountRepository::save`].
#[derive(Debug)]
pub enum SaveOutcome {
    Created(Account),
    /// An account with the same case-insensitive email already exists.
    Duplicate,
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Number of stored accounts.
    async fn count(&self) -> Result<u64>;

    /// Exact-match lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Insert a new account unless its email is already taken.
    async fn save(&self, account: NewAccount) -> Result<SaveOutcome>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<()>;
}
