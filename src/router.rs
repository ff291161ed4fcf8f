//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. The router also owns the
//! per-request pipeline: parse the JSON body, match the route, run the
//! handler, log the outcome.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use matchit::Router as MatchitRouter;

use crate::api_error::ApiError;
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{json, trace};
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// The application router.
///
/// Holds the route table and the state every handler receives. Build it once
/// at startup and pass it to [`Server::serve`](crate::Server::serve). Each
/// registration returns `self` so calls chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn with_state(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax and are read back with
    /// `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Patch, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Delete, path, handler)
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Finds the handler for `method` and `path`.
    ///
    /// One trailing slash is ignored (`/items/` matches `/items`), and `HEAD`
    /// falls back to the `GET` route when none is registered for it.
    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, Vec<(String, String)>)> {
        self.find(method, path).or_else(|| match method {
            Method::Head => self.find(Method::Get, path),
            _ => None,
        })
    }

    fn find(&self, method: Method, path: &str) -> Option<(BoxedHandler<S>, Vec<(String, String)>)> {
        let tree = self.routes.get(&method)?;
        let matched = match tree.at(path) {
            Ok(matched) => matched,
            Err(_) if path.len() > 1 && path.ends_with('/') => {
                tree.at(&path[..path.len() - 1]).ok()?
            }
            Err(_) => return None,
        };
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Runs one fully-buffered request through the service.
    ///
    /// The body is parsed before routing, so malformed JSON is rejected
    /// even on paths that do not exist.
    pub async fn respond(&self, req: http::Request<Bytes>) -> Response {
        let started = Instant::now();
        let (parts, body) = req.into_parts();
        let path = parts.uri.path().to_owned();

        let mut response = self.route(&parts, path.clone(), body).await;
        if parts.method == http::Method::HEAD {
            response.body.clear();
        }

        trace::record(parts.method.as_str(), &path, response.status_code(), started.elapsed());
        response
    }

    async fn route(&self, parts: &http::request::Parts, path: String, body: Bytes) -> Response {
        let Ok(method) = Method::try_from(&parts.method) else {
            return ApiError::RouteNotFound.into_response();
        };

        let headers = parts.headers.iter()
            .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
            .collect();
        let mut req = Request::new(method, path, headers, body, HashMap::new());

        if let Err(e) = json::parse_body(&mut req) {
            return e.into_response();
        }

        let Some((handler, params)) = self.lookup(method, req.path()) else {
            return ApiError::RouteNotFound.into_response();
        };
        if let Err(e) = req.set_params(params) {
            return e.into_response();
        }

        // A panicking handler is contained in its own task and answered with a 500.
        match tokio::spawn(handler.call(req, self.state.clone())).await {
            Ok(response) => response,
            Err(e) => ApiError::Internal(format!("handler failed: {e}")).into_response(),
        }
    }
}
