//! Bind a resource's capabilities to conventional routes.
//!
//! | capability | route              | gated when                          |
//! |------------|--------------------|-------------------------------------|
//! | List       | `GET    {group}`   | never                               |
//! | Create     | `POST   {group}`   | never                               |
//! | Take       | `GET    {group}/:id` | `enable_lock && lock_take_action` |
//! | Update     | `PUT    {group}/:id` | `enable_lock`                     |
//! | Delete     | `DELETE {group}/:id` | `enable_lock`                     |
//! | Init       | `GET    {group}/:id/new` | never                         |
//! | OnGet      | `GET    {group}`   | `enable_lock && lock_take_action`   |
//! | OnPost / OnPut / OnDelete / OnPatch | same verb, `{group}` | `enable_lock` |
//! | OnHead / OnOptions | same verb, `{group}` | never                    |

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use crate::context::Context;
use crate::error::BindError;
use crate::gate::{EntityGate, LockOption, LockOptions};

use super::capability::Resource;
use super::route_group::{Endpoint, RouteGroup, Verb};

/// Gates resolved for one bind call.
struct Gates {
    write: Option<Arc<EntityGate>>,
    read: Option<Arc<EntityGate>>,
}

impl Gates {
    fn resolve<H: Resource>(handler: &H, overrides: &[LockOption]) -> Result<Self, BindError> {
        let options = handler
            .lock_options()
            .unwrap_or_default()
            .with(overrides.iter().cloned());
        Self::from_options(&options)
    }

    fn from_options(options: &LockOptions) -> Result<Self, BindError> {
        let write = options.gate()?;
        let read = if options.locks_take() {
            write.clone()
        } else {
            None
        };
        Ok(Self { write, read })
    }
}

/// Register `call` for a capability the resource reported at bind time.
///
/// The capability is queried again per request; if the resource stops
/// exposing it, the request fails with 500 instead of answering empty.
#[allow(clippy::too_many_arguments)]
fn register<H, F>(
    group: &mut RouteGroup,
    handler: &Arc<H>,
    present: bool,
    capability: &'static str,
    verb: Verb,
    relative: &str,
    gate: Option<Arc<EntityGate>>,
    call: F,
) where
    H: Resource,
    F: Fn(&H, &mut Context) -> Option<()> + Send + Sync + 'static,
{
    if !present {
        return;
    }
    let handler = handler.clone();
    let endpoint: Endpoint = Arc::new(move |ctx: &mut Context| {
        if call(&*handler, ctx).is_none() {
            tracing::error!(capability, "resource no longer exposes capability");
            ctx.abort_with_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("capability {capability} unavailable") }),
            );
        }
    });
    group.register(verb, relative, endpoint, gate);
}

/// Bind raw verb handlers (`OnGet`, `OnPost`, ...) to the group root.
///
/// With a custom entity-id lookup, make sure it finds the id for root-level
/// routes: the default reads `:id`, which root routes do not have, so they
/// run unlocked.
pub fn bind_verb<H: Resource>(
    group: &mut RouteGroup,
    handler: Arc<H>,
    overrides: &[LockOption],
) -> Result<(), BindError> {
    let gates = Gates::resolve(&*handler, overrides)?;
    bind_verbs_with(group, &handler, &gates);
    Ok(())
}

/// Bind List, Create, Take, Update and Delete.
pub fn crud<H: Resource>(
    group: &mut RouteGroup,
    handler: Arc<H>,
    overrides: &[LockOption],
) -> Result<(), BindError> {
    let gates = Gates::resolve(&*handler, overrides)?;
    bind_crud_with(group, &handler, &gates);
    Ok(())
}

/// [`crud`] plus Init at `{group}/:id/new` (e.g. `GET /orders/0/new`).
pub fn crudi<H: Resource>(
    group: &mut RouteGroup,
    handler: Arc<H>,
    overrides: &[LockOption],
) -> Result<(), BindError> {
    let gates = Gates::resolve(&*handler, overrides)?;
    register(
        group,
        &handler,
        handler.as_init().is_some(),
        "init",
        Verb::Get,
        "/:id/new",
        None,
        |h, ctx| h.as_init().map(|c| c.init(ctx)),
    );
    bind_crud_with(group, &handler, &gates);
    Ok(())
}

/// [`bind_verb`] and [`crud`] on the same group. Make sure the two styles do
/// not claim the same verb: `OnGet` + `List` and `OnPost` + `Create` both
/// land on the group root.
pub fn mix<H: Resource>(
    group: &mut RouteGroup,
    handler: Arc<H>,
    overrides: &[LockOption],
) -> Result<(), BindError> {
    let gates = Gates::resolve(&*handler, overrides)?;
    bind_verbs_with(group, &handler, &gates);
    bind_crud_with(group, &handler, &gates);
    Ok(())
}

fn bind_crud_with<H: Resource>(group: &mut RouteGroup, handler: &Arc<H>, gates: &Gates) {
    let h = &**handler;
    register(
        group,
        handler,
        h.as_create().is_some(),
        "create",
        Verb::Post,
        "",
        None,
        |h, ctx| h.as_create().map(|c| c.create(ctx)),
    );
    register(
        group,
        handler,
        h.as_list().is_some(),
        "list",
        Verb::Get,
        "",
        None,
        |h, ctx| h.as_list().map(|c| c.list(ctx)),
    );
    register(
        group,
        handler,
        h.as_take().is_some(),
        "take",
        Verb::Get,
        "/:id",
        gates.read.clone(),
        |h, ctx| h.as_take().map(|c| c.take(ctx)),
    );
    register(
        group,
        handler,
        h.as_update().is_some(),
        "update",
        Verb::Put,
        "/:id",
        gates.write.clone(),
        |h, ctx| h.as_update().map(|c| c.update(ctx)),
    );
    register(
        group,
        handler,
        h.as_delete().is_some(),
        "delete",
        Verb::Delete,
        "/:id",
        gates.write.clone(),
        |h, ctx| h.as_delete().map(|c| c.delete(ctx)),
    );
}

fn bind_verbs_with<H: Resource>(group: &mut RouteGroup, handler: &Arc<H>, gates: &Gates) {
    let h = &**handler;
    register(
        group,
        handler,
        h.as_get().is_some(),
        "get",
        Verb::Get,
        "",
        gates.read.clone(),
        |h, ctx| h.as_get().map(|c| c.get(ctx)),
    );
    register(
        group,
        handler,
        h.as_post().is_some(),
        "post",
        Verb::Post,
        "",
        gates.write.clone(),
        |h, ctx| h.as_post().map(|c| c.post(ctx)),
    );
    register(
        group,
        handler,
        h.as_put().is_some(),
        "put",
        Verb::Put,
        "",
        gates.write.clone(),
        |h, ctx| h.as_put().map(|c| c.put(ctx)),
    );
    register(
        group,
        handler,
        h.as_on_delete().is_some(),
        "delete",
        Verb::Delete,
        "",
        gates.write.clone(),
        |h, ctx| h.as_on_delete().map(|c| c.delete(ctx)),
    );
    register(
        group,
        handler,
        h.as_patch().is_some(),
        "patch",
        Verb::Patch,
        "",
        gates.write.clone(),
        |h, ctx| h.as_patch().map(|c| c.patch(ctx)),
    );
    register(
        group,
        handler,
        h.as_head().is_some(),
        "head",
        Verb::Head,
        "",
        None,
        |h, ctx| h.as_head().map(|c| c.head(ctx)),
    );
    register(
        group,
        handler,
        h.as_options().is_some(),
        "options",
        Verb::Options,
        "",
        None,
        |h, ctx| h.as_options().map(|c| c.options(ctx)),
    );
}
