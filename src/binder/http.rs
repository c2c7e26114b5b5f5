//! axum glue: turns registered endpoints into `MethodRouter`s.
//!
//! Each request builds a fresh [`Context`] from the matched route and runs
//! the endpoint on the blocking pool, since a [`Locker`](crate::lock::Locker)
//! may block while it waits for a contended key.
//!
//! ## Example
//!
//! ```ignore
//! let mut orders = RouteGroup::new("/orders");
//! binder::crud(&mut orders, Arc::new(Orders::default()), &[LockOption::EnableLock(true)])?;
//!
//! binder::serve(orders.into_router(), "0.0.0.0:3000").await?;
//! ```

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{on, MethodRouter};
use axum::Router;

use crate::context::Context;

use super::route_group::{Endpoint, Verb};

pub(crate) fn method_router(verb: Verb, full_path: String, endpoint: Endpoint) -> MethodRouter {
    on(
        verb.filter(),
        move |method: Method,
              uri: Uri,
              params: Result<Path<HashMap<String, String>>, PathRejection>,
              headers: HeaderMap,
              body: Bytes| {
            async move {
                let params = match params {
                    Ok(Path(params)) => params,
                    Err(PathRejection::MissingPathParams(_)) => HashMap::new(),
                    // an undecodable id must not reach the gate as "no id"
                    Err(rejection) => {
                        tracing::debug!(path = %full_path, %rejection, "path params rejected");
                        return rejection.into_response();
                    }
                };
                let ctx = Context::new(method, full_path)
                    .with_uri(uri)
                    .with_params(params)
                    .with_headers(headers)
                    .with_body(body);
                run_endpoint(endpoint, ctx).await
            }
        },
    )
}

async fn run_endpoint(endpoint: Endpoint, mut ctx: Context) -> Response {
    let path = ctx.full_path().to_string();
    let joined = tokio::task::spawn_blocking(move || {
        endpoint(&mut ctx);
        ctx
    })
    .await;

    match joined {
        Ok(ctx) => ctx.into_response(),
        Err(err) => {
            tracing::error!(%path, error = %err, "endpoint did not complete");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Serve `router` over HTTP at `addr` (e.g. `"0.0.0.0:3000"`).
pub async fn serve(router: Router, addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "serving routes");
    axum::serve(listener, router).await
}
