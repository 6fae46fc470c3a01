use anyhow::Result;
use parlor_types::{AccountBalance, AccountId, Record};
use std::future::Future;

#[cfg(any(test, feature = "mocks"))]
use std::collections::HashMap;

/// The ledger store seam: balance rows plus the append-only journal.
///
/// All balance mutations stage through `put_balance`/`append` and become
/// durable together at `commit`; a command that fails validation simply
/// never reaches `commit`, so callers observe either a fully applied
/// change or none at all. The handle is exclusively owned (`&mut self`
/// on every mutator), which serializes concurrent commands at the store
/// boundary.
pub trait Store {
    /// Read an account's balance row (`None` for unknown accounts).
    fn balance(&self, account: &AccountId) -> impl Future<Output = Result<Option<AccountBalance>>>;

    /// Upsert an account's balance row.
    fn put_balance(
        &mut self,
        account: AccountId,
        row: AccountBalance,
    ) -> impl Future<Output = Result<()>>;

    /// Append a record to the journal, returning its location.
    fn append(&mut self, record: Record) -> impl Future<Output = Result<u64>>;

    /// Current journal length; the next append lands at this location.
    fn journal_len(&self) -> u64;

    /// Read a journal record by location.
    fn read(&self, loc: u64) -> impl Future<Output = Result<Option<Record>>>;

    /// Make all staged changes durable.
    fn commit(&mut self) -> impl Future<Output = Result<()>>;
}

/// In-memory store for tests, simulations, and ephemeral deployments.
#[cfg(any(test, feature = "mocks"))]
#[derive(Default)]
pub struct Memory {
    balances: HashMap<AccountId, AccountBalance>,
    journal: Vec<Record>,
}

#[cfg(any(test, feature = "mocks"))]
impl Memory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(any(test, feature = "mocks"))]
impl Store for Memory {
    async fn balance(&self, account: &AccountId) -> Result<Option<AccountBalance>> {
        Ok(self.balances.get(account).cloned())
    }

    async fn put_balance(&mut self, account: AccountId, row: AccountBalance) -> Result<()> {
        self.balances.insert(account, row);
        Ok(())
    }

    async fn append(&mut self, record: Record) -> Result<u64> {
        let loc = self.journal.len() as u64;
        self.journal.push(record);
        Ok(loc)
    }

    fn journal_len(&self) -> u64 {
        self.journal.len() as u64
    }

    async fn read(&self, loc: u64) -> Result<Option<Record>> {
        Ok(self.journal.get(loc as usize).cloned())
    }

    async fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}
