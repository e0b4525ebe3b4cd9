//! The in-flight representation of one HTTP operation.

use reqwest::Method;
use serde_json::Value;
use uuid::Uuid;

/// One logical HTTP operation, including its retry attempt number.
///
/// Descriptors are immutable values. A retry never mutates the original;
/// [`RequestDescriptor::next_attempt`] produces a successor copy with the
/// attempt counter advanced and everything else identical, so at most one
/// descriptor per operation is ever live. The counter starts at zero and
/// dies with the operation that produced it - it is never persisted.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Value>,
    correlation_id: Uuid,
    attempt: u32,
}

impl RequestDescriptor {
    /// Build a descriptor for `method` against `path`.
    ///
    /// `path` may be relative to the client's base URL (`/api/sources`) or a
    /// fully qualified URL; resolution happens at dispatch.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
            correlation_id: Uuid::new_v4(),
            attempt: 0,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add an extra request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body, re-sent identically on every attempt.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The successor descriptor for the next retry attempt.
    ///
    /// Same method, path, headers, body, and correlation id; only the
    /// attempt counter advances.
    pub fn next_attempt(&self) -> Self {
        Self {
            attempt: self.attempt + 1,
            ..self.clone()
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Stable id correlating every attempt of this operation in the logs.
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Zero for the original dispatch, n for the nth retry.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}
