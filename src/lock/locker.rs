use super::LockError;

/// A keyed mutual-exclusion backend.
///
/// Implementations decide how long `lock` may wait, how often it retries and
/// how long a held key survives. The in-memory backend uses `Mutex` +
/// `Condvar`; distributed backends might use Redis, Postgres advisory locks,
/// etcd leases, etc.
pub trait Locker: Send + Sync {
    /// Try to acquire `key`.
    ///
    /// Returns `Ok(true)` if acquired and `Ok(false)` if the key is still held
    /// by someone else once the backend gives up waiting.
    fn lock(&self, key: &str) -> Result<bool, LockError>;

    /// Release `key`. Releasing a key that is not held is not an error.
    fn unlock(&self, key: &str) -> Result<(), LockError>;
}
