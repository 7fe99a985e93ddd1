use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::types::Challenge;

/// Process-wide store of pending login challenges.
///
/// The mutex guards only the map itself; it is never held across a network
/// call. All consumption goes through [`ChallengeStore::take`] so that two
/// concurrent verifications of the same id cannot both succeed.
pub(crate) static LOGIN_CHALLENGES: LazyLock<Mutex<ChallengeStore>> =
    LazyLock::new(|| Mutex::new(ChallengeStore::new()));

#[derive(Debug, Default)]
pub(crate) struct ChallengeStore {
    challenges: HashMap<String, Challenge>,
}

impl ChallengeStore {
    pub(crate) fn new() -> Self {
        tracing::debug!("Creating in-memory login challenge store");
        Self {
            challenges: HashMap::new(),
        }
    }

    /// Insert a challenge under its id. Ids carry 256 bits of entropy, so a
    /// collision is not expected; if one happens anyway, last write wins.
    pub(crate) fn put(&mut self, id: String, challenge: Challenge) {
        self.challenges.insert(id, challenge);
    }

    /// Atomically remove and return the challenge for `id`.
    ///
    /// Entries already past their expiry are dropped and reported as absent,
    /// so an expired challenge is never handed out even if no sweep ran
    /// since it lapsed. Absent, expired and already-consumed ids are
    /// indistinguishable from the caller's point of view.
    pub(crate) fn take(&mut self, id: &str, now: DateTime<Utc>) -> Option<Challenge> {
        match self.challenges.remove(id) {
            Some(challenge) if challenge.expires_at() <= now => {
                tracing::debug!("Dropped expired login challenge on take");
                None
            }
            other => other,
        }
    }

    /// Drop a challenge without consuming it, e.g. to roll back a challenge
    /// whose code could not be delivered.
    pub(crate) fn remove(&mut self, id: &str) {
        self.challenges.remove(id);
    }

    /// Drop every challenge whose expiry is at or before `now`.
    ///
    /// Called at the start of each create/verify operation; there is no
    /// background timer.
    pub(crate) fn sweep(&mut self, now: DateTime<Utc>) {
        let before = self.challenges.len();
        self.challenges.retain(|_, challenge| challenge.expires_at() > now);
        let swept = before - self.challenges.len();
        if swept > 0 {
            tracing::debug!("Swept {} expired login challenge(s)", swept);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.challenges.len()
    }
}
