//! The gateway: one handle over the service's contacts and checks.
//!
//! [`PingdomGateway`] owns the [`Requester`] and the only piece of mutable
//! state in the crate, the last-error slot written by
//! [`add_or_modify_alert`](PingdomGateway::add_or_modify_alert). Nothing
//! fetched from the service is cached; every operation re-reads what it
//! needs.
//!
//! Operations are grouped by resource:
//!
//! | Module | Operations |
//! |--------|-----------|
//! | [`contacts`](crate::contacts) | list, lookup by id, create-or-update, remove |
//! | [`checks`](crate::checks) | list, get, find by URL, compose URL |
//! | [`alert`](crate::alert) | reconcile a check's alert contacts and interval |

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::AlertsConfig;
use crate::error::{GatewayError, Result};
use crate::transport::{Method, Requester};

pub struct PingdomGateway<R> {
    requester: R,
    pub(crate) alerts: AlertsConfig,
    pub(crate) last_error: Option<String>,
}

impl<R: Requester> PingdomGateway<R> {
    pub fn new(requester: R) -> Self {
        Self::with_settings(requester, AlertsConfig::default())
    }

    pub fn with_settings(requester: R, alerts: AlertsConfig) -> Self {
        Self {
            requester,
            alerts,
            last_error: None,
        }
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }

    /// Message of the error that ended the most recent
    /// [`add_or_modify_alert`](PingdomGateway::add_or_modify_alert) call,
    /// or `None` if it succeeded.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Issue one request and decode the response into `T`.
    pub(crate) fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        resource: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        tracing::debug!(%method, resource, "issuing request");
        let response = self.requester.request(method, resource, body)?;
        serde_json::from_value(response).map_err(|source| {
            tracing::warn!(%method, resource, error = %source, "unexpected response shape");
            GatewayError::UnexpectedResponse {
                resource: resource.to_string(),
                source,
            }
        })
    }
}
