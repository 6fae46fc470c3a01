//! Durable ledger store.
//!
//! Balance rows live in an authenticated key/value database keyed by the
//! Sha256 digest of the account id; ledger entries and round audit records
//! live in a keyless append-only journal. The journal commits before the
//! balance store, and the balance commit's metadata records the journal
//! length it covers. On open, any journal tail committed ahead of the
//! balances is replayed into the rows (ledger entries carry
//! `balance_after`, which makes them replayable).

use crate::store::Store;
use anyhow::{anyhow, Context as _, Result};
use commonware_codec::Encode;
use commonware_cryptography::{
    sha256::{Digest, Sha256},
    Hasher,
};
use commonware_runtime::{buffer::PoolRef, Clock, Metrics, Spawner, Storage};
use commonware_storage::adb::any::variable::Any as AnyAdb;
use commonware_storage::adb::{self, keyless};
use commonware_storage::translator::Translator;
use commonware_utils::{NZUsize, NZU64};
use parlor_types::{AccountBalance, AccountId, GameTag, Record, Value};

/// Authenticated database holding balance rows and commit metadata.
pub type BalanceAdb<E, T> = AnyAdb<E, Digest, Value, Sha256, T>;

/// Durable [`Store`] over a balance adb and a keyless record journal.
pub struct Database<E: Spawner + Metrics + Clock + Storage, T: Translator> {
    balances: BalanceAdb<E, T>,
    journal: keyless::Keyless<E, Record, Sha256>,
}

impl<E: Spawner + Metrics + Clock + Storage, T: Translator> Database<E, T> {
    /// Open (or create) the store under `prefix`-named partitions and
    /// replay any journal tail the balance store has not yet covered.
    pub async fn init(context: &E, prefix: &str, translator: T) -> Result<Self> {
        let buffer_pool = PoolRef::new(NZUsize!(1024), NZUsize!(1024));

        let balances = AnyAdb::init(
            context.with_label("balances"),
            adb::any::variable::Config {
                mmr_journal_partition: format!("{prefix}-balances-mmr-journal"),
                mmr_metadata_partition: format!("{prefix}-balances-mmr-metadata"),
                mmr_items_per_blob: NZU64!(1024),
                mmr_write_buffer: NZUsize!(1024),
                log_journal_partition: format!("{prefix}-balances-log-journal"),
                log_items_per_section: NZU64!(1024),
                log_write_buffer: NZUsize!(1024),
                log_compression: None,
                log_codec_config: (),
                locations_journal_partition: format!("{prefix}-balances-locations-journal"),
                locations_items_per_blob: NZU64!(1024),
                translator,
                thread_pool: None,
                buffer_pool: buffer_pool.clone(),
            },
        )
        .await
        .context("init balance adb")?;

        let journal = keyless::Keyless::<_, Record, Sha256>::init(
            context.with_label("journal"),
            keyless::Config {
                mmr_journal_partition: format!("{prefix}-journal-mmr-journal"),
                mmr_metadata_partition: format!("{prefix}-journal-mmr-metadata"),
                mmr_items_per_blob: NZU64!(1024),
                mmr_write_buffer: NZUsize!(1024),
                log_journal_partition: format!("{prefix}-journal-log-journal"),
                log_items_per_section: NZU64!(1024),
                log_write_buffer: NZUsize!(1024),
                log_compression: None,
                log_codec_config: (),
                locations_journal_partition: format!("{prefix}-journal-locations-journal"),
                locations_items_per_blob: NZU64!(1024),
                locations_write_buffer: NZUsize!(1024),
                thread_pool: None,
                buffer_pool,
            },
        )
        .await
        .context("init record journal")?;

        let mut db = Self { balances, journal };
        db.recover().await?;
        Ok(db)
    }

    fn key(account: &AccountId) -> Digest {
        Sha256::hash(&account.encode())
    }

    /// Journal length already folded into the balance store.
    async fn covered(&self) -> Result<u64> {
        Ok(self
            .balances
            .get_metadata()
            .await
            .context("read balance metadata")?
            .and_then(|(_, v)| match v {
                Some(Value::Commit { journal }) => Some(journal),
                _ => None,
            })
            .unwrap_or(0))
    }

    /// Replay a journal tail committed ahead of the balance store.
    async fn recover(&mut self) -> Result<()> {
        let covered = self.covered().await?;
        let len = self.journal.op_count();
        if covered > len {
            return Err(anyhow!(
                "balance store ahead of journal (covered={covered}, journal={len})"
            ));
        }
        if covered == len {
            return Ok(());
        }

        tracing::warn!(covered, len, "journal ahead of balances; replaying tail");
        let mut replayed = 0u64;
        for loc in covered..len {
            let Some(Record::Ledger(entry)) = self
                .journal
                .get(loc)
                .await
                .with_context(|| format!("read journal record (loc={loc})"))?
            else {
                continue;
            };
            let key = Self::key(&entry.account);
            let mut row = match self.balances.get(&key).await.context("read balance row")? {
                Some(Value::Balance(row)) => row,
                _ => AccountBalance::default(),
            };
            row.balance = entry.balance_after;
            row.last_updated = entry.ts;
            if entry.game == GameTag::Faucet {
                row.last_faucet = Some(entry.ts);
            }
            self.balances
                .update(key, Value::Balance(row))
                .await
                .context("replay balance row")?;
            replayed += 1;
        }
        self.balances
            .commit(Some(Value::Commit { journal: len }))
            .await
            .context("commit replayed balances")?;
        tracing::info!(replayed, "ledger recovery complete");
        Ok(())
    }

    /// Flush any staged changes and release the store.
    pub async fn close(mut self) -> Result<()> {
        Store::commit(&mut self).await
    }
}

impl<E: Spawner + Metrics + Clock + Storage, T: Translator> Store for Database<E, T> {
    async fn balance(&self, account: &AccountId) -> Result<Option<AccountBalance>> {
        match self
            .balances
            .get(&Self::key(account))
            .await
            .context("adb get")?
        {
            Some(Value::Balance(row)) => Ok(Some(row)),
            Some(Value::Commit { .. }) => Err(anyhow!("commit metadata stored under account key")),
            None => Ok(None),
        }
    }

    async fn put_balance(&mut self, account: AccountId, row: AccountBalance) -> Result<()> {
        self.balances
            .update(Self::key(&account), Value::Balance(row))
            .await
            .context("adb update")?;
        Ok(())
    }

    async fn append(&mut self, record: Record) -> Result<u64> {
        let loc = self.journal.op_count();
        self.journal.append(record).await.context("journal append")?;
        Ok(loc)
    }

    fn journal_len(&self) -> u64 {
        self.journal.op_count()
    }

    async fn read(&self, loc: u64) -> Result<Option<Record>> {
        self.journal.get(loc).await.context("journal get")
    }

    async fn commit(&mut self) -> Result<()> {
        // Journal first: a crash between the two commits leaves a tail that
        // recovery replays on the next open.
        let len = self.journal.op_count();
        self.journal
            .commit(Some(Record::Commit { entries: len }))
            .await
            .context("commit journal")?;
        let len = self.journal.op_count();
        self.balances
            .commit(Some(Value::Commit { journal: len }))
            .await
            .context("commit balances")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::{adjust, balance_of};
    use commonware_runtime::{deterministic::Runner, Runner as _};
    use commonware_storage::translator::EightCap;

    #[test]
    fn test_database_persists_across_reopen() {
        let executor = Runner::default();
        executor.start(|context| async move {
            let account = AccountId::new(1, 2);

            let mut db = Database::init(&context, "parlor-test", EightCap)
                .await
                .expect("init database");
            let balance = adjust(&mut db, account, 250, GameTag::Admin, None, 100)
                .await
                .expect("credit");
            assert_eq!(balance, 250);
            adjust(&mut db, account, -100, GameTag::Slots, Some("bet"), 101)
                .await
                .expect("debit");
            db.close().await.expect("close database");

            let db = Database::init(&context, "parlor-test", EightCap)
                .await
                .expect("reopen database");
            assert_eq!(balance_of(&db, &account).await.expect("read"), 150);

            // Ledger entries survive alongside the commit markers.
            let mut entries = 0;
            for loc in 0..db.journal_len() {
                if let Some(Record::Ledger(_)) = db.read(loc).await.expect("read journal") {
                    entries += 1;
                }
            }
            assert_eq!(entries, 2);
        });
    }

    #[test]
    fn test_recovery_replays_journal_tail() {
        let executor = Runner::default();
        executor.start(|context| async move {
            let account = AccountId::new(1, 2);

            // Commit the journal but not the balance store, simulating a
            // crash between the two commits.
            let mut db = Database::init(&context, "parlor-crash", EightCap)
                .await
                .expect("init database");
            let loc = db.journal.op_count();
            db.journal
                .append(Record::Ledger(parlor_types::LedgerEntry {
                    id: loc,
                    account,
                    game: GameTag::Faucet,
                    delta: 500,
                    balance_after: 500,
                    ts: 42,
                    note: Some("daily faucet".to_string()),
                }))
                .await
                .expect("append");
            let len = db.journal.op_count();
            db.journal
                .commit(Some(Record::Commit { entries: len }))
                .await
                .expect("commit journal");
            drop(db);

            // Reopen: recovery folds the tail into the balance rows.
            let db = Database::init(&context, "parlor-crash", EightCap)
                .await
                .expect("reopen database");
            let row = db.balance(&account).await.expect("read").expect("row exists");
            assert_eq!(row.balance, 500);
            assert_eq!(row.last_updated, 42);
            assert_eq!(row.last_faucet, Some(42));
        });
    }
}
