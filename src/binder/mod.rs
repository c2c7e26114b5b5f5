//! binder: convention-based REST route binding.
//!
//! Implement the capability traits a resource supports, expose them through
//! [`Resource`] (usually via [`impl_resource!`](crate::impl_resource)), and
//! bind the resource to a [`RouteGroup`]. Writes (and optionally reads) can be
//! serialized per entity with the [entity lock gate](crate::gate).
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use route_binder::binder::{self, RouteGroup, List, Update};
//! use route_binder::{Context, LockOption, InMemoryLocker};
//!
//! struct Orders;
//! impl List for Orders { fn list(&self, ctx: &mut Context) { /* ... */ } }
//! impl Update for Orders { fn update(&self, ctx: &mut Context) { /* ... */ } }
//! route_binder::impl_resource!(Orders: List, Update);
//!
//! let mut group = RouteGroup::new("/orders");
//! binder::crud(&mut group, Arc::new(Orders), &[
//!     LockOption::EnableLock(true),
//!     LockOption::Name("orders".into()),
//!     LockOption::Locker(Arc::new(InMemoryLocker::new())),
//! ])?;
//!
//! binder::serve(group.into_router(), "0.0.0.0:3000").await?;
//! ```

mod bind;
mod capability;
mod http;
mod route_group;

pub use bind::{bind_verb, crud, crudi, mix};
pub use capability::{
    Create, Delete, Init, List, OnDelete, OnGet, OnHead, OnOptions, OnPatch, OnPost, OnPut,
    Resource, Take, Update,
};
pub use http::serve;
pub use route_group::{Endpoint, RouteGroup, RouteInfo, Verb};
