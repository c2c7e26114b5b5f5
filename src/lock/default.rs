//! Process-wide default locker.
//!
//! Routes that enable locking without supplying a locker fall back to this
//! one. It must be installed explicitly with [`init_default_locker`] or
//! [`set_default_locker`] before such routes are bound; nothing is created
//! lazily.

use std::sync::{Arc, RwLock};

use super::{InMemoryLocker, LockSettings, Locker};

static DEFAULT_LOCKER: RwLock<Option<Arc<dyn Locker>>> = RwLock::new(None);

/// Install an [`InMemoryLocker`] with default [`LockSettings`] as the
/// process-wide default.
pub fn init_default_locker() {
    set_default_locker(Arc::new(InMemoryLocker::with_settings(
        LockSettings::default(),
    )));
}

/// Install (or replace) the process-wide default locker.
pub fn set_default_locker(locker: Arc<dyn Locker>) {
    let mut slot = DEFAULT_LOCKER.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(locker);
    tracing::debug!("default entity locker installed");
}

/// Remove the process-wide default locker.
pub fn clear_default_locker() {
    let mut slot = DEFAULT_LOCKER.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
}

/// The current default locker, if one was installed.
pub fn default_locker() -> Option<Arc<dyn Locker>> {
    DEFAULT_LOCKER
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

pub fn has_default_locker() -> bool {
    default_locker().is_some()
}
