//! Capability traits a resource handler may implement.
//!
//! Each capability is a single-method trait. A handler opts into the ones it
//! supports and exposes them through [`Resource`], which the binder queries
//! once per capability when routes are bound.

use crate::context::Context;
use crate::gate::LockOptions;

/// `GET {group}`: list items.
pub trait List: Send + Sync {
    fn list(&self, ctx: &mut Context);
}

/// `POST {group}`: create an item.
pub trait Create: Send + Sync {
    fn create(&self, ctx: &mut Context);
}

/// `GET {group}/:id`: get one item.
pub trait Take: Send + Sync {
    fn take(&self, ctx: &mut Context);
}

/// `PUT {group}/:id`: change an item.
pub trait Update: Send + Sync {
    fn update(&self, ctx: &mut Context);
}

/// `DELETE {group}/:id`: delete an item.
pub trait Delete: Send + Sync {
    fn delete(&self, ctx: &mut Context);
}

/// `GET {group}/:id/new`: initial form data for a new item.
pub trait Init: Send + Sync {
    fn init(&self, ctx: &mut Context);
}

/// `GET {group}`
pub trait OnGet: Send + Sync {
    fn get(&self, ctx: &mut Context);
}

/// `POST {group}`
pub trait OnPost: Send + Sync {
    fn post(&self, ctx: &mut Context);
}

/// `PUT {group}`
pub trait OnPut: Send + Sync {
    fn put(&self, ctx: &mut Context);
}

/// `DELETE {group}`
pub trait OnDelete: Send + Sync {
    fn delete(&self, ctx: &mut Context);
}

/// `PATCH {group}`
pub trait OnPatch: Send + Sync {
    fn patch(&self, ctx: &mut Context);
}

/// `HEAD {group}`
pub trait OnHead: Send + Sync {
    fn head(&self, ctx: &mut Context);
}

/// `OPTIONS {group}`
pub trait OnOptions: Send + Sync {
    fn options(&self, ctx: &mut Context);
}

/// Capability query for a resource handler.
///
/// Every `as_*` method defaults to `None`. A handler returns `Some(self)` for
/// each capability it implements; [`impl_resource!`](crate::impl_resource)
/// writes those overrides for you.
pub trait Resource: Send + Sync + 'static {
    fn as_list(&self) -> Option<&dyn List> {
        None
    }
    fn as_create(&self) -> Option<&dyn Create> {
        None
    }
    fn as_take(&self) -> Option<&dyn Take> {
        None
    }
    fn as_update(&self) -> Option<&dyn Update> {
        None
    }
    fn as_delete(&self) -> Option<&dyn Delete> {
        None
    }
    fn as_init(&self) -> Option<&dyn Init> {
        None
    }
    fn as_get(&self) -> Option<&dyn OnGet> {
        None
    }
    fn as_post(&self) -> Option<&dyn OnPost> {
        None
    }
    fn as_put(&self) -> Option<&dyn OnPut> {
        None
    }
    fn as_on_delete(&self) -> Option<&dyn OnDelete> {
        None
    }
    fn as_patch(&self) -> Option<&dyn OnPatch> {
        None
    }
    fn as_head(&self) -> Option<&dyn OnHead> {
        None
    }
    fn as_options(&self) -> Option<&dyn OnOptions> {
        None
    }

    /// Lock options this resource wants by default. Overrides passed to the
    /// bind functions are applied on top.
    fn lock_options(&self) -> Option<LockOptions> {
        None
    }
}

/// Implement [`Resource`](crate::binder::Resource) for a type, exposing the
/// listed capabilities.
///
/// ```ignore
/// struct Orders;
/// impl List for Orders { fn list(&self, ctx: &mut Context) { /* ... */ } }
/// impl Update for Orders { fn update(&self, ctx: &mut Context) { /* ... */ } }
///
/// route_binder::impl_resource!(Orders: List, Update);
/// ```
#[macro_export]
macro_rules! impl_resource {
    (@cap List) => {
        fn as_list(&self) -> Option<&dyn $crate::binder::List> { Some(self) }
    };
    (@cap Create) => {
        fn as_create(&self) -> Option<&dyn $crate::binder::Create> { Some(self) }
    };
    (@cap Take) => {
        fn as_take(&self) -> Option<&dyn $crate::binder::Take> { Some(self) }
    };
    (@cap Update) => {
        fn as_update(&self) -> Option<&dyn $crate::binder::Update> { Some(self) }
    };
    (@cap Delete) => {
        fn as_delete(&self) -> Option<&dyn $crate::binder::Delete> { Some(self) }
    };
    (@cap Init) => {
        fn as_init(&self) -> Option<&dyn $crate::binder::Init> { Some(self) }
    };
    (@cap OnGet) => {
        fn as_get(&self) -> Option<&dyn $crate::binder::OnGet> { Some(self) }
    };
    (@cap OnPost) => {
        fn as_post(&self) -> Option<&dyn $crate::binder::OnPost> { Some(self) }
    };
    (@cap OnPut) => {
        fn as_put(&self) -> Option<&dyn $crate::binder::OnPut> { Some(self) }
    };
    (@cap OnDelete) => {
        fn as_on_delete(&self) -> Option<&dyn $crate::binder::OnDelete> { Some(self) }
    };
    (@cap OnPatch) => {
        fn as_patch(&self) -> Option<&dyn $crate::binder::OnPatch> { Some(self) }
    };
    (@cap OnHead) => {
        fn as_head(&self) -> Option<&dyn $crate::binder::OnHead> { Some(self) }
    };
    (@cap OnOptions) => {
        fn as_options(&self) -> Option<&dyn $crate::binder::OnOptions> { Some(self) }
    };
    ($ty:ty : $($cap:ident),* $(,)?) => {
        impl $crate::binder::Resource for $ty {
            $( $crate::impl_resource!(@cap $cap); )*
        }
    };
}
