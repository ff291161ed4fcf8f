//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::api_error::ApiError;
use crate::method::Method;

/// An incoming HTTP request with its body fully collected.
///
/// By the time a handler sees it, the body has already been through the JSON
/// body parser: [`Request::payload`] holds the parsed document when the
/// request carried one.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    pub(crate) payload: Option<Value>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        headers: Vec<(String, String)>,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self { method, path, headers, body, params, payload: None }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter, percent-decoded.
    ///
    /// For a route `/items/{name}`, `req.param("name")` on
    /// `/items/new%20popsicle` returns `Some("new popsicle")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The parsed JSON body, or `None` when the request had no body.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Stores matched path parameters. A value that does not decode to
    /// UTF-8 fails the request instead of matching a mangled name.
    pub(crate) fn set_params(&mut self, raw: Vec<(String, String)>) -> Result<(), ApiError> {
        self.params = raw.into_iter()
            .map(|(k, v)| match percent_decode_str(&v).decode_utf8() {
                Ok(decoded) => Ok((k, decoded.into_owned())),
                Err(_) => Err(ApiError::BadParam(v.clone())),
            })
            .collect::<Result<_, _>>()?;
        Ok(())
    }
}
