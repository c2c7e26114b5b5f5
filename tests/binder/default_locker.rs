//! Routes that enable locking without their own locker.

use std::sync::Arc;

use axum::http::StatusCode;
use route_binder::binder::{self, RouteGroup};
use route_binder::lock::clear_default_locker;
use route_binder::{init_default_locker, BindError, InMemoryLocker, LockOption, LockSettings, Verb};
use serial_test::serial;

use crate::support::{next_entered, start_server, Orders};

#[test]
#[serial(default_locker)]
fn binding_fails_without_default() {
    clear_default_locker();
    let (orders, _entered) = Orders::new(true);
    let mut group = RouteGroup::new("/orders");
    let result = binder::crud(&mut group, orders, &[LockOption::EnableLock(true)]);
    assert_eq!(result, Err(BindError::MissingDefaultLocker));
}

#[test]
#[serial(default_locker)]
fn disabled_lock_never_needs_default() {
    clear_default_locker();
    let (orders, _entered) = Orders::new(true);
    let mut group = RouteGroup::new("/orders");
    binder::crud(&mut group, orders, &[LockOption::LockTakeAction(true)]).unwrap();
    assert!(group.routes().iter().all(|route| !route.locked));
}

#[tokio::test(flavor = "multi_thread")]
#[serial(default_locker)]
async fn default_locker_serializes_updates() {
    route_binder::set_default_locker(Arc::new(InMemoryLocker::with_settings(
        LockSettings::default().with_lock_waiting(false),
    )));
    let (orders, mut entered) = Orders::new(false);
    let mut group = RouteGroup::new("/orders");
    binder::crud(
        &mut group,
        orders.clone(),
        &[LockOption::EnableLock(true), LockOption::Name("orders".into())],
    )
    .unwrap();
    let base = start_server(group.into_router()).await;
    let client = reqwest::Client::new();

    let first = tokio::spawn({
        let client = client.clone();
        let url = format!("{base}/orders/7");
        async move { client.put(url).send().await.unwrap() }
    });
    next_entered(&mut entered).await;

    let second = client.put(format!("{base}/orders/7")).send().await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    orders.latch.open();
    assert_eq!(first.await.unwrap().status(), StatusCode::OK);
    clear_default_locker();
}

#[test]
#[serial(default_locker)]
fn init_installs_in_memory_default() {
    clear_default_locker();
    init_default_locker();
    assert!(route_binder::default_locker().is_some());

    let (orders, _entered) = Orders::new(true);
    let mut group = RouteGroup::new("/orders");
    binder::crud(&mut group, orders, &[LockOption::EnableLock(true)]).unwrap();
    assert!(group.route(Verb::Put, "/orders/:id").unwrap().locked);
    clear_default_locker();
}
