use std::collections::HashMap;
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use super::{LockError, Locker};

/// Tuning knobs for [`InMemoryLocker`].
///
/// Defaults: keys held for 30 s, contended callers wait up to 2 s and
/// re-check every 15 ms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockSettings {
    /// Namespace prepended to every key as `{prefix}:{key}`. Empty disables it.
    pub key_prefix: String,
    /// How long a key stays held if its owner never unlocks it.
    pub lock_timeout: Duration,
    /// How long `lock` keeps waiting for a contended key.
    pub retry_timeout: Duration,
    /// How often a waiting `lock` re-checks the key.
    pub retry_interval: Duration,
    /// When false, `lock` makes exactly one attempt.
    pub lock_waiting: bool,
}

impl Default for LockSettings {
    fn default() -> Self {
        Self {
            key_prefix: "route_binder.entity_lock".to_string(),
            lock_timeout: Duration::from_secs(30),
            retry_timeout: Duration::from_secs(2),
            retry_interval: Duration::from_millis(15),
            lock_waiting: true,
        }
    }
}

impl LockSettings {
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn with_retry_timeout(mut self, timeout: Duration) -> Self {
        self.retry_timeout = timeout;
        self
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    pub fn with_lock_waiting(mut self, waiting: bool) -> Self {
        self.lock_waiting = waiting;
        self
    }
}

/// Process-local [`Locker`] backed by a `Mutex<HashMap<key, expiry>>` + `Condvar`.
///
/// A key is held until it is unlocked or its `lock_timeout` elapses. Waiters
/// are woken on every unlock and otherwise re-check every `retry_interval`
/// until `retry_timeout` runs out. Ownership is not tracked: once a key has
/// expired and been taken over, the previous holder's `unlock` releases it.
pub struct InMemoryLocker {
    settings: LockSettings,
    /// Key to expiry; `None` never expires.
    held: Mutex<HashMap<String, Option<Instant>>>,
    wake: Condvar,
}

impl InMemoryLocker {
    pub fn new() -> Self {
        Self::with_settings(LockSettings::default())
    }

    pub fn with_settings(settings: LockSettings) -> Self {
        InMemoryLocker {
            settings,
            held: Mutex::new(HashMap::new()),
            wake: Condvar::new(),
        }
    }

    pub fn settings(&self) -> &LockSettings {
        &self.settings
    }

    /// Whether `key` is currently held and not yet expired.
    pub fn is_locked(&self, key: &str) -> Result<bool, LockError> {
        let key = self.storage_key(key);
        let held = self
            .held
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        Ok(held
            .get(&key)
            .is_some_and(|expires_at| live(*expires_at, Instant::now())))
    }

    fn storage_key(&self, key: &str) -> String {
        if self.settings.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.settings.key_prefix, key)
        }
    }

    fn try_claim(
        &self,
        held: &mut HashMap<String, Option<Instant>>,
        key: &str,
        now: Instant,
    ) -> bool {
        match held.get(key) {
            Some(expires_at) if live(*expires_at, now) => false,
            _ => {
                held.insert(key.to_string(), now.checked_add(self.settings.lock_timeout));
                true
            }
        }
    }
}

fn live(expires_at: Option<Instant>, now: Instant) -> bool {
    expires_at.map_or(true, |at| at > now)
}

impl Default for InMemoryLocker {
    fn default() -> Self {
        Self::new()
    }
}

impl Locker for InMemoryLocker {
    fn lock(&self, key: &str) -> Result<bool, LockError> {
        let key = self.storage_key(key);
        // `None`: the timeout is too large to represent, so wait indefinitely
        let deadline = Instant::now().checked_add(self.settings.retry_timeout);
        let interval = self.settings.retry_interval.max(Duration::from_millis(1));

        let mut held = self
            .held
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        loop {
            let now = Instant::now();
            if self.try_claim(&mut held, &key, now) {
                return Ok(true);
            }
            if !self.settings.lock_waiting || deadline.is_some_and(|at| now >= at) {
                return Ok(false);
            }
            let wait = deadline.map_or(interval, |at| interval.min(at - now));
            let (guard, _) = self
                .wake
                .wait_timeout(held, wait)
                .map_err(|e| LockError::Poisoned(e.to_string()))?;
            held = guard;
        }
    }

    fn unlock(&self, key: &str) -> Result<(), LockError> {
        let key = self.storage_key(key);
        let mut held = self
            .held
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        if held.remove(&key).is_some() {
            self.wake.notify_all();
        }
        Ok(())
    }
}
