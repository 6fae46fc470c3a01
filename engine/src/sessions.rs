//! In-memory Hi-Lo session table.
//!
//! Sessions are keyed by interaction id and scoped to one exchange.
//! Actions from anyone but the owner are rejected without touching the
//! session. The cooperative timeout sweep finalizes idle sessions and
//! eventually drops terminal tombstones (kept around so repeated actions
//! against a finished session can replay its outcome).

use crate::games::hilo::HiLoSession;
use parlor_types::api::HiLoOutcome;
use parlor_types::{AccountId, CasinoError};
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
pub struct SessionTable {
    sessions: HashMap<u64, HiLoSession>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session: HiLoSession) -> Result<(), CasinoError> {
        if self.sessions.contains_key(&session.id) {
            return Err(CasinoError::SessionExists(session.id));
        }
        self.sessions.insert(session.id, session);
        Ok(())
    }

    /// Look up a session, enforcing ownership.
    pub fn get_mut(
        &mut self,
        id: u64,
        account: &AccountId,
    ) -> Result<&mut HiLoSession, CasinoError> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(CasinoError::SessionNotFound(id))?;
        if session.owner != *account {
            return Err(CasinoError::NotSessionOwner(id));
        }
        Ok(session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Finalize sessions idle past `timeout` and drop terminal tombstones
    /// idle past the same window. Returns the timeout outcomes so the
    /// caller can report them.
    pub fn expire_idle(&mut self, now: u64, timeout: u64) -> Vec<HiLoOutcome> {
        let mut timed_out = Vec::new();
        self.sessions.retain(|id, session| {
            let idle = now.saturating_sub(session.last_action);
            if idle < timeout {
                return true;
            }
            if session.is_terminal() {
                debug!(session = *id, "dropping finished hi-lo session");
                return false;
            }
            timed_out.push(session.time_out(now));
            debug!(session = *id, rounds = session.rounds, "hi-lo session timed out");
            true
        });
        timed_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: u64, user: u64, now: u64) -> HiLoSession {
        HiLoSession::open(id, AccountId::new(1, user), 20, 6, now)
    }

    #[test]
    fn test_duplicate_session_rejected() {
        let mut table = SessionTable::new();
        table.insert(session(1, 2, 0)).unwrap();
        assert!(matches!(
            table.insert(session(1, 2, 0)),
            Err(CasinoError::SessionExists(1))
        ));
    }

    #[test]
    fn test_owner_guard() {
        let mut table = SessionTable::new();
        table.insert(session(1, 2, 0)).unwrap();

        assert!(table.get_mut(1, &AccountId::new(1, 2)).is_ok());
        assert!(matches!(
            table.get_mut(1, &AccountId::new(1, 3)),
            Err(CasinoError::NotSessionOwner(1))
        ));
        assert!(matches!(
            table.get_mut(9, &AccountId::new(1, 2)),
            Err(CasinoError::SessionNotFound(9))
        ));
    }

    #[test]
    fn test_expiry_finalizes_then_drops() {
        let mut table = SessionTable::new();
        table.insert(session(1, 2, 100)).unwrap();

        // Not idle long enough.
        assert!(table.expire_idle(120, 30).is_empty());
        assert_eq!(table.len(), 1);

        // First sweep past the window: times out, tombstone retained.
        let outcomes = table.expire_idle(131, 30);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            outcomes[0],
            HiLoOutcome::TimedOut { session: 1, rounds: 0 }
        ));
        assert_eq!(table.len(), 1);

        // Second sweep past the window: tombstone dropped.
        assert!(table.expire_idle(200, 30).is_empty());
        assert!(table.is_empty());
    }
}
