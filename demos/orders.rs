//! Orders service with per-order write serialization.
//!
//! ```text
//! cargo run --example orders
//! curl -X POST localhost:3000/orders -d '{"item":"lamp","quantity":2}'
//! curl -X PUT  localhost:3000/orders/1 -d '{"item":"lamp","quantity":3}'
//! ```
//!
//! Updates sleep for a second so two overlapping PUTs on the same order show
//! the 409 the gate produces.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::http::StatusCode;
use route_binder::binder::{self, Create, Delete, Init, List, RouteGroup, Take, Update};
use route_binder::{Context, HandlerError, InMemoryLocker, LockOption, LockSettings};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Order {
    item: String,
    quantity: u32,
}

#[derive(Default)]
struct Orders {
    next_id: Mutex<u64>,
    store: Mutex<HashMap<String, Order>>,
}

impl Orders {
    fn store(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Order>>, HandlerError> {
        self.store
            .lock()
            .map_err(|e| HandlerError::Other(e.to_string().into()))
    }
}

impl List for Orders {
    fn list(&self, ctx: &mut Context) {
        let result = self.store().map(|store| json!(*store));
        ctx.respond(result);
    }
}

impl Init for Orders {
    fn init(&self, ctx: &mut Context) {
        ctx.json(StatusCode::OK, json!({ "item": "", "quantity": 1 }));
    }
}

impl Create for Orders {
    fn create(&self, ctx: &mut Context) {
        let result = ctx.input::<Order>().and_then(|order| {
            let id = {
                let mut next = self
                    .next_id
                    .lock()
                    .map_err(|e| HandlerError::Other(e.to_string().into()))?;
                *next += 1;
                next.to_string()
            };
            self.store()?.insert(id.clone(), order.clone());
            Ok(json!({ "id": id, "order": order }))
        });
        match result {
            Ok(body) => ctx.json(StatusCode::CREATED, body),
            Err(err) => ctx.abort_with_error(&err),
        }
    }
}

impl Take for Orders {
    fn take(&self, ctx: &mut Context) {
        let id = ctx.param("id").to_string();
        let result = self.store().and_then(|store| {
            store
                .get(&id)
                .map(|order| json!(order))
                .ok_or(HandlerError::NotFound(id.clone()))
        });
        ctx.respond(result);
    }
}

impl Update for Orders {
    fn update(&self, ctx: &mut Context) {
        let id = ctx.param("id").to_string();
        let result = ctx.input::<Order>().and_then(|order| {
            thread::sleep(Duration::from_secs(1));
            let mut store = self.store()?;
            let slot = store
                .get_mut(&id)
                .ok_or(HandlerError::NotFound(id.clone()))?;
            *slot = order.clone();
            Ok(json!(order))
        });
        ctx.respond(result);
    }
}

impl Delete for Orders {
    fn delete(&self, ctx: &mut Context) {
        let id = ctx.param("id").to_string();
        match self.store().map(|mut store| store.remove(&id)) {
            Ok(Some(_)) => ctx.status(StatusCode::NO_CONTENT),
            Ok(None) => ctx.abort_with_error(&HandlerError::NotFound(id)),
            Err(err) => ctx.abort_with_error(&err),
        }
    }
}

route_binder::impl_resource!(Orders: List, Init, Create, Take, Update, Delete);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let locker = InMemoryLocker::with_settings(
        LockSettings::default()
            .with_key_prefix("orders_demo")
            .with_lock_waiting(false),
    );

    let mut orders = RouteGroup::new("/orders");
    binder::crudi(
        &mut orders,
        Arc::new(Orders::default()),
        &[
            LockOption::EnableLock(true),
            LockOption::Name("order".into()),
            LockOption::Locker(Arc::new(locker)),
        ],
    )?;

    binder::serve(orders.into_router(), "0.0.0.0:3000").await?;
    Ok(())
}
