//! Per-action, per-user command cooldowns.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use tokio::time::{Instant, sleep_until};
use tracing::debug;
use twilight_model::id::{Id, marker::UserMarker};

/// Cooldown applied when a command does not set its own.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(3);

type CooldownKey = (String, Id<UserMarker>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    /// The use was recorded; the caller may proceed.
    Ready,
    Cooling {
        remaining: Duration,
        /// Unix timestamp (seconds) at which the action frees up again.
        expires_at_unix: u64,
    },
}

impl CooldownStatus {
    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }
}

/// Shared cooldown store. Clones refer to the same entries.
///
/// Every recorded use schedules its own removal once the cooldown elapses,
/// so the store only ever holds live entries.
#[derive(Clone)]
pub struct Cooldowns {
    entries: Arc<Mutex<HashMap<CooldownKey, Instant>>>,
    default_amount: Duration,
}

impl Default for Cooldowns {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl Cooldowns {
    pub fn new(default_amount: Duration) -> Self {
        Self {
            entries: Arc::default(),
            default_amount,
        }
    }

    /// Check `action` for `user` with the default cooldown.
    pub fn check_default(&self, action: &str, user: Id<UserMarker>) -> CooldownStatus {
        self.check(action, user, self.default_amount)
    }

    /// Record a use of `action` by `user` unless it is still cooling down.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn check(&self, action: &str, user: Id<UserMarker>, amount: Duration) -> CooldownStatus {
        let now = Instant::now();
        let key = (action.to_owned(), user);

        let mut entries = self.lock();
        if let Some(expires_at) = entries.get(&key).copied().filter(|at| *at > now) {
            let remaining = expires_at - now;
            debug!(action, user = user.get(), ?remaining, "action on cooldown");
            return CooldownStatus::Cooling {
                remaining,
                expires_at_unix: unix_after(remaining),
            };
        }

        let expires_at = now + amount;
        entries.insert(key.clone(), expires_at);
        drop(entries);

        let store = self.clone();
        tokio::spawn(async move {
            sleep_until(expires_at).await;
            store.forget(&key, expires_at);
        });

        CooldownStatus::Ready
    }

    /// Number of entries currently cooling down.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove `key` unless a newer use replaced it meanwhile.
    fn forget(&self, key: &CooldownKey, expires_at: Instant) {
        let mut entries = self.lock();
        if entries.get(key) == Some(&expires_at) {
            entries.remove(key);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CooldownKey, Instant>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn unix_after(remaining: Duration) -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now + remaining).as_secs_f64().round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: Id<UserMarker> = Id::new(1);
    const BOB: Id<UserMarker> = Id::new(2);

    #[tokio::test(start_paused = true)]
    async fn second_use_within_window_is_cooling() {
        let cooldowns = Cooldowns::default();

        assert!(cooldowns.check_default("ping", ALICE).is_ready());
        tokio::time::advance(Duration::from_secs(1)).await;

        let CooldownStatus::Cooling { remaining, .. } = cooldowns.check_default("ping", ALICE)
        else {
            panic!("expected cooldown");
        };
        assert_eq!(remaining, Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cooldowns_are_scoped_by_user_and_action() {
        let cooldowns = Cooldowns::default();

        assert!(cooldowns.check_default("ping", ALICE).is_ready());
        assert!(cooldowns.check_default("ping", BOB).is_ready());
        assert!(cooldowns.check_default("help", ALICE).is_ready());
        assert_eq!(cooldowns.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn entries_are_removed_after_cooldown() {
        let cooldowns = Cooldowns::new(Duration::from_secs(5));
        assert!(cooldowns.check_default("pages", ALICE).is_ready());

        tokio::time::sleep(Duration::from_secs(6)).await;

        assert!(cooldowns.is_empty());
        assert!(cooldowns.check_default("pages", ALICE).is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn custom_amount_overrides_default() {
        let cooldowns = Cooldowns::default();
        let amount = Duration::from_secs(30);

        assert!(cooldowns.check("usage", ALICE, amount).is_ready());
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert!(!cooldowns.check("usage", ALICE, amount).is_ready());
    }
}
