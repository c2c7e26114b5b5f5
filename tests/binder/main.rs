//! binder integration tests.

mod default_locker;
mod routing;
