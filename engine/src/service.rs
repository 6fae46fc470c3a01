//! Mailbox wrapper for the engine.
//!
//! The hosting bot runs one engine task; command handlers hold a cloneable
//! [`Mailbox`] and await replies over oneshot channels. Draining commands
//! through a single task is what serializes every balance mutation: two
//! racing first plays arrive in some order, and the second observes the
//! first's committed state.

use crate::casino::Casino;
use crate::store::Store;
use futures::channel::{mpsc, oneshot};
use futures::{SinkExt, StreamExt};
use parlor_types::api::{Command, HiLoOutcome, Outcome};
use parlor_types::CasinoError;
use tracing::warn;

/// Messages sent to the engine task.
pub enum Message {
    Invoke {
        command: Command,
        now: u64,
        response: oneshot::Sender<Result<Outcome, CasinoError>>,
    },
    /// Timer tick: finalize idle Hi-Lo sessions.
    Sweep {
        now: u64,
        response: oneshot::Sender<Vec<HiLoOutcome>>,
    },
}

/// Handle for submitting commands to the engine task.
#[derive(Clone)]
pub struct Mailbox {
    sender: mpsc::Sender<Message>,
}

impl Mailbox {
    pub async fn invoke(&mut self, command: Command, now: u64) -> Result<Outcome, CasinoError> {
        let (response, receiver) = oneshot::channel();
        self.sender
            .send(Message::Invoke {
                command,
                now,
                response,
            })
            .await
            .map_err(|_| CasinoError::Storage(anyhow::anyhow!("engine mailbox closed")))?;
        receiver
            .await
            .map_err(|_| CasinoError::Storage(anyhow::anyhow!("engine stopped before replying")))?
    }

    /// Finalize idle sessions; returns the timeout outcomes for rendering.
    pub async fn sweep(&mut self, now: u64) -> Vec<HiLoOutcome> {
        let (response, receiver) = oneshot::channel();
        if self
            .sender
            .send(Message::Sweep { now, response })
            .await
            .is_err()
        {
            warn!("engine mailbox closed; sweep dropped");
            return Vec::new();
        }
        receiver.await.unwrap_or_default()
    }
}

/// Create a mailbox and its receiving end.
pub fn mailbox(buffer: usize) -> (Mailbox, mpsc::Receiver<Message>) {
    let (sender, receiver) = mpsc::channel(buffer);
    (Mailbox { sender }, receiver)
}

/// Drive the engine until every mailbox clone is dropped. Returns the
/// engine so the host can close the store cleanly.
pub async fn run<S: Store>(
    mut casino: Casino<S>,
    mut receiver: mpsc::Receiver<Message>,
) -> Casino<S> {
    while let Some(message) = receiver.next().await {
        match message {
            Message::Invoke {
                command,
                now,
                response,
            } => {
                let result = casino.invoke(command, now).await;
                if response.send(result).is_err() {
                    warn!("caller went away; reply dropped");
                }
            }
            Message::Sweep { now, response } => {
                let outcomes = casino.expire_sessions(now);
                if response.send(outcomes).is_err() {
                    warn!("caller went away; sweep reply dropped");
                }
            }
        }
    }
    casino
}
