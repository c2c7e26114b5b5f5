use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::error::BindError;
use crate::lock::{default_locker, Locker};

use super::guard::EntityGate;

/// Extracts the entity id from the current request.
///
/// - an empty string means "nothing to lock": the handler runs unguarded
/// - aborting the context (after setting a status) stops the request; the
///   handler is not called and no lock is taken
///
/// This is not middleware: it must not call the handler itself.
pub type EntityIdLookup = Arc<dyn Fn(&mut Context) -> String + Send + Sync>;

/// The default lookup: the `id` path parameter.
pub fn id_param_lookup() -> EntityIdLookup {
    Arc::new(|ctx: &mut Context| ctx.param("id").to_string())
}

/// Entity lock configuration for one route group.
///
/// Built once when routes are bound and read-only afterwards. Use the
/// `with_*` builders, or [`LockOptions::with`] to derive a copy with
/// [`LockOption`] overrides applied in order (last write wins).
#[derive(Clone)]
pub struct LockOptions {
    /// Master switch. When false, handlers are registered without the gate.
    pub enable_lock: bool,
    /// Also guard the read (`Take` / raw `GET`) action. Needs `enable_lock`.
    pub lock_take_action: bool,
    /// Lock-key namespace. Empty falls back to the matched route path.
    pub name: String,
    /// Backend. `None` falls back to the process-wide default at bind time.
    pub locker: Option<Arc<dyn Locker>>,
    pub entity_id_lookup: EntityIdLookup,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            enable_lock: false,
            lock_take_action: false,
            name: String::new(),
            locker: None,
            entity_id_lookup: id_param_lookup(),
        }
    }
}

impl fmt::Debug for LockOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockOptions")
            .field("enable_lock", &self.enable_lock)
            .field("lock_take_action", &self.lock_take_action)
            .field("name", &self.name)
            .field("locker", &self.locker.as_ref().map(|_| "<locker>"))
            .finish_non_exhaustive()
    }
}

/// A single override for [`LockOptions::with`].
#[derive(Clone)]
pub enum LockOption {
    EnableLock(bool),
    LockTakeAction(bool),
    Name(String),
    Locker(Arc<dyn Locker>),
    EntityIdLookup(EntityIdLookup),
}

impl LockOption {
    fn apply(self, options: &mut LockOptions) {
        match self {
            LockOption::EnableLock(enable) => options.enable_lock = enable,
            LockOption::LockTakeAction(take) => options.lock_take_action = take,
            LockOption::Name(name) => options.name = name,
            LockOption::Locker(locker) => options.locker = Some(locker),
            LockOption::EntityIdLookup(lookup) => options.entity_id_lookup = lookup,
        }
    }
}

impl LockOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone these options and apply `overrides` in order.
    pub fn with(&self, overrides: impl IntoIterator<Item = LockOption>) -> Self {
        let mut clone = self.clone();
        for option in overrides {
            option.apply(&mut clone);
        }
        clone
    }

    pub fn with_enable_lock(mut self, enable: bool) -> Self {
        LockOption::EnableLock(enable).apply(&mut self);
        self
    }

    pub fn with_lock_take_action(mut self, take: bool) -> Self {
        LockOption::LockTakeAction(take).apply(&mut self);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        LockOption::Name(name.into()).apply(&mut self);
        self
    }

    pub fn with_locker(mut self, locker: Arc<dyn Locker>) -> Self {
        LockOption::Locker(locker).apply(&mut self);
        self
    }

    pub fn with_entity_id_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&mut Context) -> String + Send + Sync + 'static,
    {
        LockOption::EntityIdLookup(Arc::new(lookup)).apply(&mut self);
        self
    }

    /// Whether the read action is guarded under these options.
    pub fn locks_take(&self) -> bool {
        self.enable_lock && self.lock_take_action
    }

    /// Resolve into a gate, or `None` when locking is disabled.
    ///
    /// Fails when locking is enabled but neither an explicit locker nor a
    /// process-wide default is available.
    pub fn gate(&self) -> Result<Option<Arc<EntityGate>>, BindError> {
        if !self.enable_lock {
            return Ok(None);
        }
        let locker = match &self.locker {
            Some(locker) => locker.clone(),
            None => default_locker().ok_or(BindError::MissingDefaultLocker)?,
        };
        Ok(Some(Arc::new(EntityGate::new(
            self.name.clone(),
            locker,
            self.entity_id_lookup.clone(),
        ))))
    }
}
