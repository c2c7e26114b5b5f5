use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::lock::Locker;

use super::error::GateError;
use super::options::EntityIdLookup;

/// The lock key for an entity: `{name}.{entity_id}`.
pub fn lock_key(name: &str, entity_id: &str) -> String {
    format!("{}.{}", name, entity_id)
}

/// Brackets one handler call with an entity lock.
///
/// Resolved from [`LockOptions`](super::LockOptions) when routes are bound and
/// shared read-only by every request on those routes.
pub struct EntityGate {
    name: String,
    locker: Arc<dyn Locker>,
    entity_id_lookup: EntityIdLookup,
}

impl EntityGate {
    pub fn new(name: String, locker: Arc<dyn Locker>, entity_id_lookup: EntityIdLookup) -> Self {
        Self {
            name,
            locker,
            entity_id_lookup,
        }
    }

    /// The configured lock namespace; empty means the matched route path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `handler` while holding the lock for the request's entity.
    ///
    /// 1. Look up the entity id. If the lookup aborted the request, stop.
    /// 2. An empty id runs the handler without locking.
    /// 3. Otherwise lock `{name}.{id}`. A backend error aborts with 500 and
    ///    contention aborts with 409; the handler does not run in either case.
    /// 4. Once acquired, the key is unlocked when the handler returns or
    ///    unwinds.
    pub fn guard(&self, ctx: &mut Context, handler: &dyn Fn(&mut Context)) {
        let id = (self.entity_id_lookup)(ctx);
        if ctx.is_aborted() {
            tracing::debug!(path = ctx.full_path(), "entity id lookup aborted request");
            return;
        }
        if id.is_empty() {
            handler(ctx);
            return;
        }

        let name = if self.name.is_empty() {
            ctx.full_path()
        } else {
            self.name.as_str()
        };
        let key = lock_key(name, &id);

        match self.locker.lock(&key) {
            Err(source) => {
                tracing::warn!(%key, error = %source, "entity lock backend failed");
                ctx.abort_with_error(&GateError::Backend { key, source });
            }
            Ok(false) => {
                tracing::debug!(%key, "entity lock contended");
                ctx.abort_with_error(&GateError::Contended { key });
            }
            Ok(true) => {
                tracing::debug!(%key, "entity lock acquired");
                let _held = HeldLock {
                    locker: self.locker.as_ref(),
                    key,
                };
                handler(ctx);
            }
        }
    }
}

impl fmt::Debug for EntityGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityGate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Unlocks its key on drop.
struct HeldLock<'a> {
    locker: &'a dyn Locker,
    key: String,
}

impl Drop for HeldLock<'_> {
    fn drop(&mut self) {
        match self.locker.unlock(&self.key) {
            Ok(()) => tracing::debug!(key = %self.key, "entity lock released"),
            Err(err) => tracing::warn!(key = %self.key, error = %err, "entity unlock failed"),
        }
    }
}
