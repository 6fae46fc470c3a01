//! Read-only reporting queries over the journal.
//!
//! These feed the external reporting tools (leaderboards, profit tables,
//! RTP, ledger search). They never mutate balances; administrative
//! changes go through the balance service like everything else.
//!
//! All aggregates derive from journal scans: since every balance change
//! appends a ledger entry with a `balance_after` snapshot, the latest
//! entry per account is the balance itself.

use crate::store::Store;
use parlor_types::{AccountId, CasinoError, GameTag, LedgerEntry, Record};
use std::collections::HashMap;

/// Filter for ledger searches. All fields are conjunctive; `None` matches
/// everything.
#[derive(Clone, Debug, Default)]
pub struct LedgerFilter {
    pub account: Option<AccountId>,
    pub guild: Option<u64>,
    pub game: Option<GameTag>,
    /// Inclusive lower bound on the entry timestamp.
    pub since: Option<u64>,
    /// Inclusive upper bound on the entry timestamp.
    pub until: Option<u64>,
}

impl LedgerFilter {
    fn matches(&self, entry: &LedgerEntry) -> bool {
        self.account.map_or(true, |a| entry.account == a)
            && self.guild.map_or(true, |g| entry.account.guild == g)
            && self.game.map_or(true, |g| entry.game == g)
            && self.since.map_or(true, |t| entry.ts >= t)
            && self.until.map_or(true, |t| entry.ts <= t)
    }
}

/// Search the ledger, newest first, up to `limit` entries.
pub async fn search_ledger<S: Store>(
    store: &S,
    filter: &LedgerFilter,
    limit: usize,
) -> Result<Vec<LedgerEntry>, CasinoError> {
    let mut out = Vec::new();
    for loc in (0..store.journal_len()).rev() {
        if out.len() >= limit {
            break;
        }
        if let Some(Record::Ledger(entry)) = store.read(loc).await? {
            if filter.matches(&entry) {
                out.push(entry);
            }
        }
    }
    Ok(out)
}

/// Balance leaderboard, highest first. Derived from the latest ledger
/// entry per account, which by the ledger invariant equals the balance
/// row.
pub async fn balance_leaderboard<S: Store>(
    store: &S,
    guild: Option<u64>,
    limit: usize,
) -> Result<Vec<(AccountId, u64)>, CasinoError> {
    let mut balances: HashMap<AccountId, u64> = HashMap::new();
    for loc in 0..store.journal_len() {
        if let Some(Record::Ledger(entry)) = store.read(loc).await? {
            if guild.map_or(true, |g| entry.account.guild == g) {
                balances.insert(entry.account, entry.balance_after);
            }
        }
    }
    let mut rows: Vec<_> = balances.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    rows.truncate(limit);
    Ok(rows)
}

/// Net profit per account (sum of ledger deltas), highest first.
pub async fn net_profits<S: Store>(
    store: &S,
    guild: Option<u64>,
    limit: usize,
) -> Result<Vec<(AccountId, i64)>, CasinoError> {
    let mut totals: HashMap<AccountId, i64> = HashMap::new();
    for loc in 0..store.journal_len() {
        if let Some(Record::Ledger(entry)) = store.read(loc).await? {
            if guild.map_or(true, |g| entry.account.guild == g) {
                *totals.entry(entry.account).or_default() += entry.delta;
            }
        }
    }
    let mut rows: Vec<_> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    rows.truncate(limit);
    Ok(rows)
}

/// Per-game return-to-player aggregate from the round audit records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RtpReport {
    pub rounds: u64,
    pub total_bet: u64,
    pub total_payout: u64,
}

impl RtpReport {
    /// `sum(payout) / sum(bet)`, or `None` before any wagering.
    pub fn rtp(&self) -> Option<f64> {
        (self.total_bet > 0).then(|| self.total_payout as f64 / self.total_bet as f64)
    }
}

/// Aggregate RTP for slots or roulette (the two audited games).
pub async fn game_rtp<S: Store>(store: &S, game: GameTag) -> Result<RtpReport, CasinoError> {
    let mut report = RtpReport::default();
    for loc in 0..store.journal_len() {
        let (bet, payout) = match store.read(loc).await? {
            Some(Record::Slots(round)) if game == GameTag::Slots => (round.bet, round.payout),
            Some(Record::Roulette(round)) if game == GameTag::Roulette => {
                (round.bet, round.payout)
            }
            _ => continue,
        };
        report.rounds += 1;
        report.total_bet = report.total_bet.saturating_add(bet);
        report.total_payout = report.total_payout.saturating_add(payout);
    }
    Ok(report)
}
