//! The balance service: the sole atomic read-modify-write primitive over
//! the ledger store. Every balance mutation in the system flows through
//! [`adjust`] (or its row-stamping variant), which upserts the balance row
//! and appends one ledger entry in the same committed transaction.

use crate::store::Store;
use parlor_types::constants::MAX_NOTE_LENGTH;
use parlor_types::{AccountBalance, AccountId, CasinoError, GameTag, LedgerEntry, Record};
use tracing::debug;

/// Annotations longer than the ledger limit are clamped (on a char
/// boundary) rather than rejected; they are informational only.
fn clamp_note(note: &str) -> String {
    let mut end = MAX_NOTE_LENGTH.min(note.len());
    while !note.is_char_boundary(end) {
        end -= 1;
    }
    note[..end].to_string()
}

/// Non-mutating balance read; unknown accounts hold 0.
pub async fn balance_of<S: Store>(store: &S, account: &AccountId) -> Result<u64, CasinoError> {
    Ok(store
        .balance(account)
        .await?
        .map_or(0, |row| row.balance))
}

/// Atomically apply `delta` to the account.
///
/// A delta that would drive the balance negative aborts with
/// `InsufficientFunds` and writes nothing; on success the new balance row
/// and a ledger entry (with `balance_after` snapshot) commit together.
pub async fn adjust<S: Store>(
    store: &mut S,
    account: AccountId,
    delta: i64,
    game: GameTag,
    note: Option<&str>,
    now: u64,
) -> Result<u64, CasinoError> {
    adjust_row(store, account, delta, game, note, now, |_| {}).await
}

/// [`adjust`] plus an extra stamp on the balance row inside the same
/// transaction (used by the faucet to record the claim time atomically).
pub(crate) async fn adjust_row<S, F>(
    store: &mut S,
    account: AccountId,
    delta: i64,
    game: GameTag,
    note: Option<&str>,
    now: u64,
    stamp: F,
) -> Result<u64, CasinoError>
where
    S: Store,
    F: FnOnce(&mut AccountBalance),
{
    let mut row = store.balance(&account).await?.unwrap_or_default();
    let current = row.balance;
    row.balance = if delta >= 0 {
        current.saturating_add(delta as u64)
    } else {
        let need = delta.unsigned_abs();
        match current.checked_sub(need) {
            Some(remaining) => remaining,
            None => {
                return Err(CasinoError::InsufficientFunds {
                    have: current,
                    need,
                })
            }
        }
    };
    row.last_updated = now;
    stamp(&mut row);

    let balance_after = row.balance;
    store.put_balance(account, row).await?;
    let id = store.journal_len();
    store
        .append(Record::Ledger(LedgerEntry {
            id,
            account,
            game,
            delta,
            balance_after,
            ts: now,
            note: note.map(clamp_note),
        }))
        .await?;
    store.commit().await?;

    debug!(%account, %game, delta, balance_after, "ledger entry appended");
    Ok(balance_after)
}

/// Set the balance to an exact amount, expressed as a computed delta so it
/// is ledgered identically to game activity.
pub async fn set_to<S: Store>(
    store: &mut S,
    account: AccountId,
    target: u64,
    note: Option<&str>,
    now: u64,
) -> Result<u64, CasinoError> {
    let current = balance_of(store, &account).await?;
    let delta = i64::try_from(target)
        .map_err(|_| CasinoError::InvalidBet)?
        .saturating_sub(i64::try_from(current).unwrap_or(i64::MAX));
    adjust(store, account, delta, GameTag::Admin, note, now).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Memory;
    use futures::executor::block_on;

    const NOW: u64 = 1_700_000_000;

    fn account() -> AccountId {
        AccountId::new(1, 2)
    }

    #[test]
    fn test_unknown_account_defaults_to_zero() {
        let store = Memory::new();
        let balance = block_on(balance_of(&store, &account())).unwrap();
        assert_eq!(balance, 0);
    }

    #[test]
    fn test_adjust_credits_and_debits() {
        let mut store = Memory::new();
        let balance =
            block_on(adjust(&mut store, account(), 100, GameTag::Admin, None, NOW)).unwrap();
        assert_eq!(balance, 100);
        let balance =
            block_on(adjust(&mut store, account(), -40, GameTag::Slots, Some("bet"), NOW)).unwrap();
        assert_eq!(balance, 60);
        assert_eq!(store.journal_len(), 2);
    }

    #[test]
    fn test_negative_result_rejected_without_write() {
        let mut store = Memory::new();
        block_on(adjust(&mut store, account(), 30, GameTag::Admin, None, NOW)).unwrap();

        let err = block_on(adjust(&mut store, account(), -50, GameTag::Slots, None, NOW))
            .expect_err("overdraw must fail");
        match err {
            CasinoError::InsufficientFunds { have, need } => {
                assert_eq!(have, 30);
                assert_eq!(need, 50);
            }
            other => panic!("unexpected error: {other}"),
        }

        // Balance and journal untouched by the aborted transaction.
        assert_eq!(block_on(balance_of(&store, &account())).unwrap(), 30);
        assert_eq!(store.journal_len(), 1);
    }

    #[test]
    fn test_entry_snapshot_matches_row() {
        let mut store = Memory::new();
        block_on(adjust(&mut store, account(), 500, GameTag::Faucet, None, NOW)).unwrap();
        block_on(adjust(&mut store, account(), -200, GameTag::Roulette, None, NOW)).unwrap();

        let last = block_on(store.read(store.journal_len() - 1)).unwrap().unwrap();
        let Record::Ledger(entry) = last else {
            panic!("expected ledger entry");
        };
        assert_eq!(entry.balance_after, 300);
        assert_eq!(block_on(balance_of(&store, &account())).unwrap(), 300);
    }

    #[test]
    fn test_overlong_notes_are_clamped() {
        let mut store = Memory::new();
        let note = "x".repeat(500);
        block_on(adjust(
            &mut store,
            account(),
            10,
            GameTag::Admin,
            Some(&note),
            NOW,
        ))
        .unwrap();

        let Record::Ledger(entry) = block_on(store.read(0)).unwrap().unwrap() else {
            panic!("expected ledger entry");
        };
        assert_eq!(entry.note.unwrap().len(), 128);
    }

    #[test]
    fn test_set_to_is_ledgered_as_delta() {
        let mut store = Memory::new();
        block_on(adjust(&mut store, account(), 120, GameTag::Admin, None, NOW)).unwrap();
        let balance = block_on(set_to(&mut store, account(), 75, Some("admin-script"), NOW)).unwrap();
        assert_eq!(balance, 75);

        let last = block_on(store.read(store.journal_len() - 1)).unwrap().unwrap();
        let Record::Ledger(entry) = last else {
            panic!("expected ledger entry");
        };
        assert_eq!(entry.delta, -45);
        assert_eq!(entry.game, GameTag::Admin);
    }
}
