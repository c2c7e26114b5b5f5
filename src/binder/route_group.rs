use std::fmt;
use std::sync::Arc;

use axum::http::Method;
use axum::routing::MethodFilter;
use axum::Router;

use crate::context::Context;
use crate::gate::EntityGate;

use super::http::method_router;

/// A registered request handler.
pub type Endpoint = Arc<dyn Fn(&mut Context) + Send + Sync>;

/// HTTP verbs a route can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
            Verb::Patch => Method::PATCH,
            Verb::Head => Method::HEAD,
            Verb::Options => Method::OPTIONS,
        }
    }

    pub(crate) fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Put => MethodFilter::PUT,
            Verb::Delete => MethodFilter::DELETE,
            Verb::Patch => MethodFilter::PATCH,
            Verb::Head => MethodFilter::HEAD,
            Verb::Options => MethodFilter::OPTIONS,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// What a route group has registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub verb: Verb,
    /// Full route pattern, e.g. `/orders/:id`.
    pub path: String,
    /// Whether requests pass through the entity lock gate.
    pub locked: bool,
}

struct Route {
    info: RouteInfo,
    endpoint: Endpoint,
}

/// Routes sharing a base path, registered as a unit.
///
/// The binder functions fill a group; [`RouteGroup::into_router`] or
/// [`RouteGroup::mount`] hand the routes to axum. Registering the same verb
/// and path twice is not detected here; axum panics on it when the router is
/// built.
pub struct RouteGroup {
    prefix: String,
    routes: Vec<Route>,
}

impl RouteGroup {
    /// Create an empty group under `prefix` (`"orders"`, `"/orders/"` and
    /// `"/orders"` are the same group).
    pub fn new(prefix: impl AsRef<str>) -> Self {
        let trimmed = prefix.as_ref().trim_matches('/');
        let prefix = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", trimmed)
        };
        Self {
            prefix,
            routes: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Everything registered so far, in registration order.
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.routes.iter().map(|r| r.info.clone()).collect()
    }

    pub fn route(&self, verb: Verb, path: &str) -> Option<&RouteInfo> {
        self.routes
            .iter()
            .map(|r| &r.info)
            .find(|info| info.verb == verb && info.path == path)
    }

    /// Register a plain handler at `relative` (`""` for the group root).
    pub fn handle<F>(&mut self, verb: Verb, relative: &str, handler: F)
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.register(verb, relative, Arc::new(handler), None);
    }

    pub(crate) fn register(
        &mut self,
        verb: Verb,
        relative: &str,
        handler: Endpoint,
        gate: Option<Arc<EntityGate>>,
    ) {
        let path = join(&self.prefix, relative);
        let locked = gate.is_some();
        let endpoint: Endpoint = match gate {
            Some(gate) => Arc::new(move |ctx: &mut Context| gate.guard(ctx, &*handler)),
            None => handler,
        };
        tracing::debug!(%verb, %path, locked, "route bound");
        self.routes.push(Route {
            info: RouteInfo { verb, path, locked },
            endpoint,
        });
    }

    /// Run the endpoint registered for `verb` + `path` on `ctx` without going
    /// through HTTP. Returns `false` if no such route exists.
    pub fn call(&self, verb: Verb, path: &str, ctx: &mut Context) -> bool {
        match self
            .routes
            .iter()
            .find(|r| r.info.verb == verb && r.info.path == path)
        {
            Some(route) => {
                (route.endpoint)(ctx);
                true
            }
            None => false,
        }
    }

    pub fn into_router(self) -> Router {
        self.mount(Router::new())
    }

    /// Add this group's routes to an existing router.
    pub fn mount(self, router: Router) -> Router {
        self.routes.into_iter().fold(router, |router, route| {
            let RouteInfo { verb, path, .. } = route.info;
            router.route(&path, method_router(verb, path.clone(), route.endpoint))
        })
    }
}

impl fmt::Debug for RouteGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteGroup")
            .field("prefix", &self.prefix)
            .field("routes", &self.routes())
            .finish()
    }
}

fn join(prefix: &str, relative: &str) -> String {
    let relative = relative.trim_start_matches('/');
    if relative.is_empty() {
        return prefix.to_string();
    }
    format!("{}/{}", prefix.trim_end_matches('/'), relative)
}
