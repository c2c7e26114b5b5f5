//! Route layout, request decoding and router composition.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use route_binder::binder::{self, Create, Init, List, RouteGroup, Take};
use route_binder::{Context, HandlerError, Verb};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::support::{start_server, Ping};

struct Catalog;

#[derive(Deserialize)]
struct NewItem {
    title: String,
    quantity: u32,
}

impl Init for Catalog {
    fn init(&self, ctx: &mut Context) {
        let id = ctx.param("id").to_string();
        ctx.json(StatusCode::OK, json!({ "template_for": id }));
    }
}

impl Create for Catalog {
    fn create(&self, ctx: &mut Context) {
        let result = ctx.input::<NewItem>().and_then(|item| {
            if item.quantity == 0 {
                return Err(HandlerError::Rejected("quantity must be positive".into()));
            }
            Ok(json!({ "title": item.title, "quantity": item.quantity }))
        });
        ctx.respond(result);
    }
}

impl Take for Catalog {
    fn take(&self, ctx: &mut Context) {
        let id = ctx.param("id").to_string();
        if id == "missing" {
            ctx.abort_with_error(&HandlerError::NotFound(id));
            return;
        }
        ctx.json(StatusCode::OK, json!({ "id": id }));
    }
}

impl List for Catalog {
    fn list(&self, ctx: &mut Context) {
        let page = ctx.uri().query().unwrap_or_default().to_string();
        ctx.json(StatusCode::OK, json!({ "query": page }));
    }
}

route_binder::impl_resource!(Catalog: Init, Create, Take, List);

async fn catalog_server() -> String {
    let mut group = RouteGroup::new("catalog");
    binder::crudi(&mut group, Arc::new(Catalog), &[]).unwrap();
    start_server(group.into_router()).await
}

#[tokio::test]
async fn init_route_is_bound_under_id() {
    let base = catalog_server().await;
    let resp = reqwest::get(format!("{base}/catalog/5/new")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "template_for": "5" })
    );
}

#[tokio::test]
async fn create_decodes_json_body() {
    let base = catalog_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/catalog"))
        .json(&json!({ "title": "lamp", "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "title": "lamp", "quantity": 2 })
    );

    let resp = client
        .post(format!("{base}/catalog"))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{base}/catalog"))
        .json(&json!({ "title": "lamp", "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "rejected: quantity must be positive");
}

#[tokio::test]
async fn handler_errors_map_to_status() {
    let base = catalog_server().await;
    let resp = reqwest::get(format!("{base}/catalog/missing")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_sees_query_string() {
    let base = catalog_server().await;
    let resp = reqwest::get(format!("{base}/catalog?page=2")).await.unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "query": "page=2" }));
}

#[tokio::test]
async fn groups_mount_onto_an_existing_router() {
    let mut catalog = RouteGroup::new("/catalog");
    binder::crud(&mut catalog, Arc::new(Catalog), &[]).unwrap();
    let mut ping = RouteGroup::new("/ping");
    binder::bind_verb(&mut ping, Arc::new(Ping), &[]).unwrap();
    let mut health = RouteGroup::new("/");
    health.handle(Verb::Get, "health", |ctx: &mut Context| {
        ctx.json(StatusCode::OK, json!({ "ok": true }));
    });

    let router = ping.mount(catalog.mount(health.mount(Router::new())));
    let base = start_server(router).await;

    let resp = reqwest::get(format!("{base}/catalog/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = reqwest::get(format!("{base}/ping")).await.unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "verb": "GET" }));
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "ok": true }));
}

#[test]
#[should_panic]
fn colliding_get_routes_panic_when_mounted() {
    let mut group = RouteGroup::new("/mixed");
    binder::bind_verb(&mut group, Arc::new(Ping), &[]).unwrap();
    binder::crud(&mut group, Arc::new(Catalog), &[]).unwrap();
    let _ = group.into_router();
}
