//! One-time welcome grant and the daily faucet.

use crate::balance::{adjust, adjust_row};
use crate::store::Store;
use parlor_types::api::FaucetOutcome;
use parlor_types::constants::SECONDS_PER_DAY;
use parlor_types::{AccountId, CasinoError, GameTag, Record};
use tracing::info;

/// Credit the welcome grant once, on an account's first wagering game.
///
/// Returns the granted amount (0 if the account has wagered before or was
/// already granted). The history check and the credit run inside one
/// store transaction, so two racing first plays produce exactly one grant:
/// the loser observes the winner's committed `welcome` entry and no-ops.
pub async fn grant_if_first_play<S: Store>(
    store: &mut S,
    account: AccountId,
    amount: u64,
    now: u64,
) -> Result<u64, CasinoError> {
    if amount == 0 || has_prior_play(store, &account).await? {
        return Ok(0);
    }
    let new_balance = adjust(
        store,
        account,
        i64::try_from(amount).unwrap_or(i64::MAX),
        GameTag::Welcome,
        Some("first_play_grant"),
        now,
    )
    .await?;
    info!(%account, amount, new_balance, "welcome grant credited");
    Ok(amount)
}

/// Whether the account has any wagering or welcome entry in the ledger.
///
/// Scans newest-first: active accounts short-circuit on their most recent
/// round, so the full scan only happens for genuinely fresh accounts.
async fn has_prior_play<S: Store>(store: &S, account: &AccountId) -> Result<bool, CasinoError> {
    for loc in (0..store.journal_len()).rev() {
        if let Some(Record::Ledger(entry)) = store.read(loc).await? {
            if entry.account == *account
                && (entry.game == GameTag::Welcome || GameTag::WAGERING.contains(&entry.game))
            {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Claim the daily faucet: a fixed credit, at most once per UTC day.
///
/// The credit and the `last_faucet` stamp commit in the same transaction.
pub async fn claim_faucet<S: Store>(
    store: &mut S,
    account: AccountId,
    amount: u64,
    now: u64,
) -> Result<FaucetOutcome, CasinoError> {
    let row = store.balance(&account).await?.unwrap_or_default();
    let today = now / SECONDS_PER_DAY;
    if let Some(last) = row.last_faucet {
        if last / SECONDS_PER_DAY == today {
            return Ok(FaucetOutcome::AlreadyClaimed {
                balance: row.balance,
                next_reset: (today + 1) * SECONDS_PER_DAY,
            });
        }
    }
    let new_balance = adjust_row(
        store,
        account,
        i64::try_from(amount).unwrap_or(i64::MAX),
        GameTag::Faucet,
        Some("daily faucet"),
        now,
        |row| row.last_faucet = Some(now),
    )
    .await?;
    info!(%account, amount, new_balance, "faucet claimed");
    Ok(FaucetOutcome::Claimed {
        amount,
        new_balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::balance_of;
    use crate::store::Memory;
    use futures::executor::block_on;

    const NOW: u64 = 1_700_000_000;

    fn account() -> AccountId {
        AccountId::new(1, 2)
    }

    #[test]
    fn test_grant_credits_fresh_account() {
        let mut store = Memory::new();
        let granted = block_on(grant_if_first_play(&mut store, account(), 2_000, NOW)).unwrap();
        assert_eq!(granted, 2_000);
        assert_eq!(block_on(balance_of(&store, &account())).unwrap(), 2_000);
    }

    #[test]
    fn test_grant_is_one_time() {
        let mut store = Memory::new();
        block_on(grant_if_first_play(&mut store, account(), 2_000, NOW)).unwrap();
        let granted = block_on(grant_if_first_play(&mut store, account(), 2_000, NOW)).unwrap();
        assert_eq!(granted, 0);

        let welcome_entries = (0..store.journal_len())
            .filter(|&loc| {
                matches!(
                    block_on(store.read(loc)).unwrap(),
                    Some(Record::Ledger(entry)) if entry.game == GameTag::Welcome
                )
            })
            .count();
        assert_eq!(welcome_entries, 1);
    }

    #[test]
    fn test_prior_wagering_blocks_grant() {
        let mut store = Memory::new();
        block_on(adjust(&mut store, account(), 100, GameTag::Admin, None, NOW)).unwrap();
        block_on(adjust(&mut store, account(), -10, GameTag::Slots, Some("bet"), NOW)).unwrap();

        let granted = block_on(grant_if_first_play(&mut store, account(), 2_000, NOW)).unwrap();
        assert_eq!(granted, 0);
    }

    #[test]
    fn test_faucet_and_admin_history_do_not_block_grant() {
        let mut store = Memory::new();
        block_on(claim_faucet(&mut store, account(), 500, NOW)).unwrap();
        block_on(adjust(&mut store, account(), 50, GameTag::Admin, None, NOW)).unwrap();

        let granted = block_on(grant_if_first_play(&mut store, account(), 2_000, NOW)).unwrap();
        assert_eq!(granted, 2_000);
    }

    #[test]
    fn test_faucet_once_per_utc_day() {
        let mut store = Memory::new();
        let first = block_on(claim_faucet(&mut store, account(), 500, NOW)).unwrap();
        assert!(matches!(first, FaucetOutcome::Claimed { amount: 500, .. }));

        let again = block_on(claim_faucet(&mut store, account(), 500, NOW + 60)).unwrap();
        match again {
            FaucetOutcome::AlreadyClaimed { balance, next_reset } => {
                assert_eq!(balance, 500);
                assert_eq!(next_reset % SECONDS_PER_DAY, 0);
                assert!(next_reset > NOW);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        // A new UTC day allows another claim even if fewer than 24h passed.
        let tomorrow = (NOW / SECONDS_PER_DAY + 1) * SECONDS_PER_DAY + 1;
        let next = block_on(claim_faucet(&mut store, account(), 500, tomorrow)).unwrap();
        assert!(matches!(next, FaucetOutcome::Claimed { .. }));
    }
}
