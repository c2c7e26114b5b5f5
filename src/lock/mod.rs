//! Lock backends for entity-scoped request serialization.
//!
//! The gate only talks to the [`Locker`] trait. [`InMemoryLocker`] is the
//! bundled process-local backend; a distributed one (Redis, Postgres
//! advisory locks, ...) plugs in by implementing the same two methods.

mod default;
mod error;
mod in_memory;
mod locker;

pub use default::{
    clear_default_locker, default_locker, has_default_locker, init_default_locker,
    set_default_locker,
};
pub use error::LockError;
pub use in_memory::{InMemoryLocker, LockSettings};
pub use locker::Locker;
