//! Estimate per-game house edge by settling many rounds against an
//! in-memory store.
//!
//! Run with: `cargo run --example house_edge --features mocks`

use futures::executor::block_on;
use parlor_engine::{query, Casino, CasinoConfig, GameRng, Memory};
use parlor_types::api::{AdminOp, Guess, HiLoOutcome};
use parlor_types::{AccountId, GameTag};

const TRIALS: u64 = 50_000;
const BET: u64 = 100;
const BANKROLL: u64 = 1_000_000_000;

struct Row {
    game: &'static str,
    wagered: u64,
    returned: u64,
}

impl Row {
    fn edge(&self) -> f64 {
        if self.wagered == 0 {
            return 0.0;
        }
        1.0 - self.returned as f64 / self.wagered as f64
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::WARN)
        .init();

    let account = AccountId::new(1, 1);
    let mut casino = Casino::with_rng(
        Memory::new(),
        CasinoConfig::default(),
        GameRng::from_seed([7u8; 32]),
    );

    let rows = block_on(async {
        casino
            .admin_adjust(account, AdminOp::Add(BANKROLL), Some("bankroll"), 0)
            .await
            .expect("fund bankroll");
        // Burn the welcome grant so it does not skew the estimates.
        casino.slots_spin(account, BET, 0).await.expect("first spin");

        let mut slots = Row { game: "slots", wagered: 0, returned: 0 };
        for now in 0..TRIALS {
            let outcome = casino.slots_spin(account, BET, now).await.expect("spin");
            slots.wagered += BET;
            slots.returned += outcome.payout;
        }

        let mut roulette = Row { game: "roulette (red)", wagered: 0, returned: 0 };
        for now in 0..TRIALS {
            let outcome = casino
                .roulette_spin(account, BET, "red", now)
                .await
                .expect("spin");
            roulette.wagered += BET;
            roulette.returned += outcome.payout;
        }

        let mut hilo = Row { game: "hi-lo (one guess, cash out)", wagered: 0, returned: 0 };
        for trial in 0..TRIALS {
            let session = 1_000 + trial;
            let dealt = casino
                .hilo_start(account, session, BET, trial)
                .await
                .expect("start");
            let HiLoOutcome::Dealt { card, .. } = dealt else {
                panic!("expected deal");
            };
            let guess = if parlor_types::cards::card_rank_ace_high(card) <= 8 {
                Guess::Higher
            } else {
                Guess::Lower
            };
            let outcome = casino
                .hilo_guess(account, session, guess, trial)
                .await
                .expect("guess");
            hilo.wagered += BET;
            match outcome {
                HiLoOutcome::Won { net, .. } => hilo.returned += BET + net,
                HiLoOutcome::Push { .. } => hilo.returned += BET,
                HiLoOutcome::Lost { .. } => {}
                other => panic!("unexpected outcome: {other:?}"),
            }
            // Terminal sessions replay their outcome; the rest cash out.
            casino
                .hilo_cash_out(account, session, trial)
                .await
                .expect("cash out");
            // Keep the session table small.
            casino.expire_sessions(trial.saturating_add(3_600));
        }

        let slots_rtp = query::game_rtp(casino.store(), GameTag::Slots)
            .await
            .expect("slots rtp");
        let roulette_rtp = query::game_rtp(casino.store(), GameTag::Roulette)
            .await
            .expect("roulette rtp");
        println!(
            "audited RTP: slots {:.4} over {} rounds, roulette {:.4} over {} rounds",
            slots_rtp.rtp().unwrap_or(0.0),
            slots_rtp.rounds,
            roulette_rtp.rtp().unwrap_or(0.0),
            roulette_rtp.rounds,
        );

        vec![slots, roulette, hilo]
    });

    println!("{:<32} {:>12} {:>12} {:>8}", "game", "wagered", "returned", "edge");
    for row in rows {
        println!(
            "{:<32} {:>12} {:>12} {:>7.2}%",
            row.game,
            row.wagered,
            row.returned,
            row.edge() * 100.0
        );
    }
}
