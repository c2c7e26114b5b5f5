//! Per-request context passed to resource handlers.
//!
//! Carries what the router matched (method, canonical route path, path
//! params), the raw request (uri, headers, body) and the response being
//! built. A handler, or an entity-id lookup running before it, writes the
//! response through the context; there is no return value.
//!
//! Aborting marks the request as finished: the gate checks
//! [`Context::is_aborted`] after the entity-id lookup and skips the handler.

mod error;

use std::collections::HashMap;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub use error::{HandlerError, StatusError};

/// The context passed to every resource handler.
///
/// ## Example
///
/// ```ignore
/// impl Update for Orders {
///     fn update(&self, ctx: &mut Context) {
///         let id = ctx.param("id").to_string();
///         let result = ctx.input::<OrderPatch>().map(|patch| self.apply(&id, patch));
///         ctx.respond(result);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Context {
    method: Method,
    /// Route pattern the request matched, e.g. `/orders/:id`.
    full_path: String,
    uri: Uri,
    params: HashMap<String, String>,
    headers: HeaderMap,
    body: Bytes,
    status: StatusCode,
    response: Option<Value>,
    aborted: bool,
}

impl Context {
    /// Create a context for a request matched against `full_path`.
    pub fn new(method: Method, full_path: impl Into<String>) -> Self {
        let full_path = full_path.into();
        let uri = full_path.parse().unwrap_or_default();
        Self {
            method,
            full_path,
            uri,
            params: HashMap::new(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            status: StatusCode::OK,
            response: None,
            aborted: false,
        }
    }

    pub fn with_uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    // ------------------------------------------------------------------
    // Request
    // ------------------------------------------------------------------

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The canonical route path the request matched (`/orders/:id`), not the
    /// concrete request path.
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// A path parameter, or `""` when the route has no such parameter.
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).map(|v| v.as_str()).unwrap_or("")
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// A request header as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn raw_body(&self) -> &Bytes {
        &self.body
    }

    /// Deserialize the JSON request body into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    // ------------------------------------------------------------------
    // Response
    // ------------------------------------------------------------------

    pub fn status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn json(&mut self, status: StatusCode, body: Value) {
        self.status = status;
        self.response = Some(body);
    }

    /// Write `Ok` as a 200 JSON body, or abort with the error's status.
    pub fn respond<E: StatusError>(&mut self, result: Result<Value, E>) {
        match result {
            Ok(body) => self.json(StatusCode::OK, body),
            Err(err) => self.abort_with_error(&err),
        }
    }

    pub fn response_status(&self) -> StatusCode {
        self.status
    }

    pub fn response_body(&self) -> Option<&Value> {
        self.response.as_ref()
    }

    // ------------------------------------------------------------------
    // Abort
    // ------------------------------------------------------------------

    /// Mark the request as finished without changing the response.
    pub fn abort(&mut self) {
        self.aborted = true;
    }

    pub fn abort_with_status(&mut self, status: StatusCode) {
        self.status = status;
        self.aborted = true;
    }

    pub fn abort_with_json(&mut self, status: StatusCode, body: Value) {
        self.json(status, body);
        self.aborted = true;
    }

    pub fn abort_with_error<E: StatusError + ?Sized>(&mut self, err: &E) {
        self.abort_with_json(err.status_code(), json!({ "error": err.to_string() }));
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

impl IntoResponse for Context {
    fn into_response(self) -> Response {
        match self.response {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}
