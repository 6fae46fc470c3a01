//! The casino engine: command dispatch over the balance service, the
//! welcome grant policy, the game engines, and the audit recorder.
//!
//! Every round follows the same shape: validate input, probe the welcome
//! grant on first play, debit the bet atomically, resolve the outcome from
//! the randomness source, credit any payout atomically, then append the
//! round audit record. Audit failures never roll back settlement; they are
//! logged and the round is still reported as settled.

use crate::balance;
use crate::config::CasinoConfig;
use crate::games::hilo::{self, HiLoSession, HiLoState, RoundResult};
use crate::games::roulette;
use crate::games::slots;
use crate::games::GameRng;
use crate::grant;
use crate::sessions::SessionTable;
use crate::store::Store;
use parlor_types::api::{
    AdminOp, Command, FaucetOutcome, Guess, HiLoOutcome, Outcome, RouletteOutcome, SlotsOutcome,
};
use parlor_types::{
    AccountId, CasinoError, GameTag, Record, RouletteRound, SlotsRound,
};
use tracing::{info, warn};

/// Append an audit record in its own transaction.
async fn append_audit<S: Store>(store: &mut S, record: Record) -> anyhow::Result<()> {
    store.append(record).await?;
    store.commit().await
}

/// The engine facade handed to the command router.
pub struct Casino<S: Store> {
    store: S,
    config: CasinoConfig,
    sessions: SessionTable,
    rng: GameRng,
}

impl<S: Store> Casino<S> {
    pub fn new(store: S, config: CasinoConfig) -> Self {
        Self::with_rng(store, config, GameRng::new())
    }

    /// Construct with an explicit randomness source (seeded in tests and
    /// simulations).
    pub fn with_rng(store: S, config: CasinoConfig, rng: GameRng) -> Self {
        Self {
            store,
            config,
            sessions: SessionTable::new(),
            rng,
        }
    }

    pub fn config(&self) -> &CasinoConfig {
        &self.config
    }

    /// Read-only access to the underlying store, for reporting queries.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tear down the engine and hand the store back to the caller.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Install a session directly (test setup).
    #[cfg(any(test, feature = "mocks"))]
    pub fn seed_session(&mut self, session: HiLoSession) -> Result<(), CasinoError> {
        self.sessions.insert(session)
    }

    fn validate_bet(bet: u64) -> Result<i64, CasinoError> {
        if bet == 0 {
            return Err(CasinoError::InvalidBet);
        }
        i64::try_from(bet).map_err(|_| CasinoError::InvalidBet)
    }

    /// Dispatch one routed command.
    pub async fn invoke(&mut self, command: Command, now: u64) -> Result<Outcome, CasinoError> {
        match command {
            Command::Balance { account } => {
                let balance = balance::balance_of(&self.store, &account).await?;
                Ok(Outcome::Balance { account, balance })
            }
            Command::Faucet { account } => {
                Ok(Outcome::Faucet(self.claim_faucet(account, now).await?))
            }
            Command::AdminAdjust { account, op, note } => {
                let new_balance = self.admin_adjust(account, op, note.as_deref(), now).await?;
                Ok(Outcome::AdminAdjust {
                    account,
                    new_balance,
                })
            }
            Command::SlotsSpin { account, bet } => {
                Ok(Outcome::Slots(self.slots_spin(account, bet, now).await?))
            }
            Command::RouletteSpin {
                account,
                bet,
                selection,
            } => Ok(Outcome::Roulette(
                self.roulette_spin(account, bet, &selection, now).await?,
            )),
            Command::HiLoStart {
                account,
                session,
                bet,
            } => Ok(Outcome::HiLo(
                self.hilo_start(account, session, bet, now).await?,
            )),
            Command::HiLoGuess {
                account,
                session,
                guess,
            } => Ok(Outcome::HiLo(
                self.hilo_guess(account, session, guess, now).await?,
            )),
            Command::HiLoCashOut { account, session } => Ok(Outcome::HiLo(
                self.hilo_cash_out(account, session, now).await?,
            )),
        }
    }

    pub async fn balance_of(&self, account: &AccountId) -> Result<u64, CasinoError> {
        balance::balance_of(&self.store, account).await
    }

    pub async fn claim_faucet(
        &mut self,
        account: AccountId,
        now: u64,
    ) -> Result<FaucetOutcome, CasinoError> {
        grant::claim_faucet(&mut self.store, account, self.config.faucet_grant, now).await
    }

    /// Administrative balance change, ledgered identically to game activity.
    pub async fn admin_adjust(
        &mut self,
        account: AccountId,
        op: AdminOp,
        note: Option<&str>,
        now: u64,
    ) -> Result<u64, CasinoError> {
        match op {
            AdminOp::Set(target) => {
                balance::set_to(&mut self.store, account, target, note, now).await
            }
            AdminOp::Add(amount) => {
                let delta = i64::try_from(amount).map_err(|_| CasinoError::InvalidBet)?;
                balance::adjust(&mut self.store, account, delta, GameTag::Admin, note, now).await
            }
            AdminOp::Sub(amount) => {
                let delta = i64::try_from(amount).map_err(|_| CasinoError::InvalidBet)?;
                balance::adjust(&mut self.store, account, -delta, GameTag::Admin, note, now).await
            }
        }
    }

    /// Spin the slot machine once.
    pub async fn slots_spin(
        &mut self,
        account: AccountId,
        bet: u64,
        now: u64,
    ) -> Result<SlotsOutcome, CasinoError> {
        let delta = Self::validate_bet(bet)?;
        let welcome_granted =
            grant::grant_if_first_play(&mut self.store, account, self.config.welcome_grant, now)
                .await?;

        balance::adjust(
            &mut self.store,
            account,
            -delta,
            GameTag::Slots,
            Some("bet"),
            now,
        )
        .await?;

        let symbols = slots::spin_reels(&mut self.rng);
        let payout = slots::payout_for(&self.config.slots, &symbols, bet);
        let new_balance = if payout > 0 {
            balance::adjust(
                &mut self.store,
                account,
                i64::try_from(payout).unwrap_or(i64::MAX),
                GameTag::Slots,
                Some("payout"),
                now,
            )
            .await?
        } else {
            balance::balance_of(&self.store, &account).await?
        };

        let round = SlotsRound {
            id: self.store.journal_len(),
            account,
            bet,
            payout,
            symbols,
            ts: now,
        };
        if let Err(err) = append_audit(&mut self.store, Record::Slots(round)).await {
            warn!(%account, ?err, "slots audit write failed; round already settled");
        }
        info!(%account, bet, payout, new_balance, "slots round settled");

        Ok(SlotsOutcome {
            symbols,
            bet,
            payout,
            new_balance,
            welcome_granted,
        })
    }

    /// Spin the roulette wheel against one selection.
    pub async fn roulette_spin(
        &mut self,
        account: AccountId,
        bet: u64,
        selection_text: &str,
        now: u64,
    ) -> Result<RouletteOutcome, CasinoError> {
        let delta = Self::validate_bet(bet)?;
        let selection = roulette::parse_selection(selection_text)
            .ok_or_else(|| CasinoError::InvalidSelection(selection_text.to_string()))?;
        let welcome_granted =
            grant::grant_if_first_play(&mut self.store, account, self.config.welcome_grant, now)
                .await?;

        balance::adjust(
            &mut self.store,
            account,
            -delta,
            GameTag::Roulette,
            Some("bet"),
            now,
        )
        .await?;

        let number = self.rng.spin_wheel();
        let color = roulette::wheel_color(number);
        let payout = roulette::payout_units(selection, number).saturating_mul(bet);
        let new_balance = if payout > 0 {
            balance::adjust(
                &mut self.store,
                account,
                i64::try_from(payout).unwrap_or(i64::MAX),
                GameTag::Roulette,
                Some("payout"),
                now,
            )
            .await?
        } else {
            balance::balance_of(&self.store, &account).await?
        };

        let round = RouletteRound {
            id: self.store.journal_len(),
            account,
            bet,
            payout,
            selection: selection_text.trim().to_string(),
            number,
            color,
            ts: now,
        };
        if let Err(err) = append_audit(&mut self.store, Record::Roulette(round)).await {
            warn!(%account, ?err, "roulette audit write failed; round already settled");
        }
        info!(%account, bet, number, %color, payout, new_balance, "roulette round settled");

        Ok(RouletteOutcome {
            selection: selection_text.trim().to_string(),
            number,
            color,
            bet,
            payout,
            new_balance,
            welcome_granted,
        })
    }

    /// Open a Hi-Lo session and deal the first card. No charge yet; each
    /// guess is charged when it is made.
    pub async fn hilo_start(
        &mut self,
        account: AccountId,
        session_id: u64,
        bet: u64,
        now: u64,
    ) -> Result<HiLoOutcome, CasinoError> {
        Self::validate_bet(bet)?;
        let welcome_granted =
            grant::grant_if_first_play(&mut self.store, account, self.config.welcome_grant, now)
                .await?;

        let balance = balance::balance_of(&self.store, &account).await?;
        if balance < bet {
            return Err(CasinoError::InsufficientFunds {
                have: balance,
                need: bet,
            });
        }

        let card = self.rng.draw_card();
        self.sessions
            .insert(HiLoSession::open(session_id, account, bet, card, now))?;
        info!(%account, session = session_id, bet, "hi-lo session opened");

        Ok(HiLoOutcome::Dealt {
            session: session_id,
            card,
            balance,
            welcome_granted,
        })
    }

    /// Resolve one Hi-Lo guess.
    pub async fn hilo_guess(
        &mut self,
        account: AccountId,
        session_id: u64,
        guess: Guess,
        now: u64,
    ) -> Result<HiLoOutcome, CasinoError> {
        let session = self.sessions.get_mut(session_id, &account)?;
        if let Some(outcome) = session.terminal_outcome() {
            return Ok(outcome.clone());
        }

        let bet = session.bet;
        let have = balance::balance_of(&self.store, &account).await?;
        if have < bet {
            // No card drawn, no charge; the session just ends.
            let outcome = HiLoOutcome::InsufficientFunds {
                session: session_id,
                balance: have,
            };
            session.finish(HiLoState::InsufficientFunds, outcome.clone(), now);
            return Ok(outcome);
        }

        // Pessimistic charge: the bet comes off before the draw.
        balance::adjust(
            &mut self.store,
            account,
            -(bet as i64),
            GameTag::HiLo,
            Some("bet"),
            now,
        )
        .await?;

        let previous = session.current;
        let drawn = self.rng.draw_card();
        match hilo::resolve_guess(previous, drawn, guess) {
            RoundResult::Push => {
                let balance = balance::adjust(
                    &mut self.store,
                    account,
                    bet as i64,
                    GameTag::HiLo,
                    Some("push"),
                    now,
                )
                .await?;
                session.advance(drawn, now);
                info!(%account, session = session_id, previous, drawn, "hi-lo push");
                Ok(HiLoOutcome::Push {
                    session: session_id,
                    previous,
                    drawn,
                    balance,
                    rounds: session.rounds,
                })
            }
            RoundResult::Win => {
                // Even money: the debited bet comes back plus the same again.
                let balance = balance::adjust(
                    &mut self.store,
                    account,
                    (bet as i64).saturating_mul(2),
                    GameTag::HiLo,
                    Some("payout"),
                    now,
                )
                .await?;
                session.advance(drawn, now);
                info!(%account, session = session_id, previous, drawn, "hi-lo win");
                Ok(HiLoOutcome::Won {
                    session: session_id,
                    previous,
                    drawn,
                    net: bet,
                    balance,
                    rounds: session.rounds,
                })
            }
            RoundResult::Lose => {
                let balance = balance::balance_of(&self.store, &account).await?;
                let outcome = HiLoOutcome::Lost {
                    session: session_id,
                    previous,
                    drawn,
                    bet,
                    balance,
                };
                session.finish(HiLoState::Lost, outcome.clone(), now);
                info!(%account, session = session_id, previous, drawn, "hi-lo loss");
                Ok(outcome)
            }
        }
    }

    /// Bank the session. Only valid once the first round has settled; the
    /// balance is unchanged by this action.
    pub async fn hilo_cash_out(
        &mut self,
        account: AccountId,
        session_id: u64,
        now: u64,
    ) -> Result<HiLoOutcome, CasinoError> {
        let session = self.sessions.get_mut(session_id, &account)?;
        if let Some(outcome) = session.terminal_outcome() {
            return Ok(outcome.clone());
        }
        if !session.can_cash_out {
            return Err(CasinoError::CashOutUnavailable);
        }

        let balance = balance::balance_of(&self.store, &account).await?;
        let outcome = HiLoOutcome::CashedOut {
            session: session_id,
            rounds: session.rounds,
            balance,
        };
        session.finish(HiLoState::CashedOut, outcome.clone(), now);
        info!(%account, session = session_id, rounds = session.rounds, "hi-lo cashed out");
        Ok(outcome)
    }

    /// Cooperative timeout sweep; the host drives this from its timer.
    /// Returns the sessions finalized this pass so the router can report
    /// them.
    pub fn expire_sessions(&mut self, now: u64) -> Vec<HiLoOutcome> {
        self.sessions
            .expire_idle(now, self.config.hilo_timeout_secs)
    }
}
