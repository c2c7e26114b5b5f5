pub mod binder;
pub mod context;
mod error;
pub mod gate;
pub mod lock;

pub use binder::{RouteGroup, RouteInfo, Verb};
pub use context::{Context, HandlerError, StatusError};
pub use error::BindError;
pub use gate::{lock_key, EntityGate, EntityIdLookup, GateError, LockOption, LockOptions};
pub use lock::{
    default_locker, init_default_locker, set_default_locker, InMemoryLocker, LockError,
    LockSettings, Locker,
};
