//! Scripted [`Requester`] for tests.
//!
//! Replies are queued up front and handed out in order; every request is
//! recorded so tests can assert on call order, paths and bodies. A request
//! whose method or path does not match the next queued reply fails, which
//! makes unexpected calls visible as errors instead of silent successes.
//!
//! The module is public so that callers embedding [`PingdomGateway`] can
//! test their own reconciliation flows without a live account, the same
//! way this crate's integration tests do. It has no dependencies beyond
//! the crate's own and is never used by the HTTP path.
//!
//! [`PingdomGateway`]: crate::gateway::PingdomGateway

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use serde_json::Value;

use crate::transport::{Method, Requester};

/// A request as seen by [`ScriptedRequester`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub resource: String,
    pub body: Option<Value>,
}

struct Reply {
    method: Method,
    resource: String,
    response: Result<Value, String>,
}

/// Deterministic test double that replays queued responses.
#[derive(Default)]
pub struct ScriptedRequester {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRequester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response for the next `method resource` request.
    pub fn expect(self, method: Method, resource: &str, response: Value) -> Self {
        self.push(method, resource, Ok(response))
    }

    /// Queue a transport failure for the next `method resource` request.
    pub fn fail(self, method: Method, resource: &str, message: &str) -> Self {
        self.push(method, resource, Err(message.to_string()))
    }

    fn push(self, method: Method, resource: &str, response: Result<Value, String>) -> Self {
        lock(&self.replies).push_back(Reply {
            method,
            resource: resource.to_string(),
            response,
        });
        self
    }

    /// Every request issued so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Number of requests issued with `method`.
    pub fn count(&self, method: Method) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Number of queued replies not consumed yet.
    pub fn remaining(&self) -> usize {
        lock(&self.replies).len()
    }
}

impl Requester for ScriptedRequester {
    fn request(&self, method: Method, resource: &str, body: Option<&Value>) -> Result<Value> {
        lock(&self.calls).push(RecordedCall {
            method,
            resource: resource.to_string(),
            body: body.cloned(),
        });

        let Some(reply) = lock(&self.replies).pop_front() else {
            bail!("unexpected request {} {}: no reply queued", method, resource);
        };
        if reply.method != method || reply.resource != resource {
            bail!(
                "unexpected request {} {}: expected {} {}",
                method,
                resource,
                reply.method,
                reply.resource
            );
        }
        reply.response.map_err(|message| anyhow!(message))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
