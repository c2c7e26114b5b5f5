//! Entity lock gate: serializes requests that target the same entity.
//!
//! A gate wraps one handler call: it asks the configured
//! [`EntityIdLookup`] which entity the request is about, locks
//! `{name}.{entity_id}` on the configured [`Locker`](crate::lock::Locker),
//! runs the handler and unlocks again, even if the handler panics.
//!
//! ```ignore
//! let options = LockOptions::new()
//!     .with_enable_lock(true)
//!     .with_name("orders")
//!     .with_locker(Arc::new(InMemoryLocker::new()));
//!
//! if let Some(gate) = options.gate()? {
//!     gate.guard(&mut ctx, &|ctx| orders.update(ctx));
//! }
//! ```

mod error;
mod guard;
mod options;

pub use error::GateError;
pub use guard::{lock_key, EntityGate};
pub use options::{id_param_lookup, EntityIdLookup, LockOption, LockOptions};
