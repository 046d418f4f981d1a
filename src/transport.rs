//! Request transport for the Pingdom REST API.
//!
//! The gateway only ever talks to the service through the [`Requester`]
//! trait: a method, a resource path relative to the API root
//! (`notification_contacts`, `checks/123`, ...) and an optional flat body.
//! [`HttpRequester`] is the production implementation; tests use
//! [`ScriptedRequester`](crate::scripted::ScriptedRequester).
//!
//! # Environment Variables
//!
//! - `PINGDOM_USERNAME` — required
//! - `PINGDOM_PASSWORD` — required
//! - `PINGDOM_APP_KEY` — required, sent as the `App-Key` header

use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::config::ApiConfig;

/// HTTP verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issues one request against the service and returns its JSON body.
///
/// Implementations own authentication, encoding and status handling. Any
/// non-success response must come back as `Err`, preferably carrying the
/// service's own error message.
pub trait Requester: Send + Sync {
    fn request(&self, method: Method, resource: &str, body: Option<&Value>) -> Result<Value>;
}

impl<R: Requester + ?Sized> Requester for &R {
    fn request(&self, method: Method, resource: &str, body: Option<&Value>) -> Result<Value> {
        (**self).request(method, resource, body)
    }
}

impl<R: Requester + ?Sized> Requester for Box<R> {
    fn request(&self, method: Method, resource: &str, body: Option<&Value>) -> Result<Value> {
        (**self).request(method, resource, body)
    }
}

/// Credentials for the Pingdom API.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub app_key: String,
}

impl Credentials {
    /// Read credentials from `PINGDOM_USERNAME`, `PINGDOM_PASSWORD` and
    /// `PINGDOM_APP_KEY`.
    pub fn from_env() -> Result<Self> {
        let read = |key: &str| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.is_empty())
                .with_context(|| format!("{} not set", key))
        };
        Ok(Self {
            username: read("PINGDOM_USERNAME")?,
            password: read("PINGDOM_PASSWORD")?,
            app_key: read("PINGDOM_APP_KEY")?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("app_key", &"***")
            .finish()
    }
}

/// Blocking HTTP implementation of [`Requester`].
///
/// Bodies are sent form-encoded, which is what the service accepts for
/// `POST` and `PUT`. Failed requests are not retried.
pub struct HttpRequester {
    client: reqwest::blocking::Client,
    base_url: String,
    credentials: Credentials,
}

impl HttpRequester {
    pub fn new(config: &ApiConfig, credentials: Credentials) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url_for(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource.trim_start_matches('/'))
    }
}

impl Requester for HttpRequester {
    fn request(&self, method: Method, resource: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.url_for(resource);
        tracing::debug!(%method, %url, "pingdom request");

        let builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        let mut builder = builder
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header("App-Key", &self.credentials.app_key);
        if let Some(body) = body {
            builder = builder.form(&form_fields(body)?);
        }

        let response = builder
            .send()
            .with_context(|| format!("{} {} failed", method, resource))?;
        let status = response.status();
        let text = response
            .text()
            .with_context(|| format!("{} {} body unreadable", method, resource))?;

        if !status.is_success() {
            bail!(
                "Pingdom API error {}: {}",
                status,
                error_message(&text).unwrap_or(text)
            );
        }

        serde_json::from_str(&text)
            .with_context(|| format!("{} {} returned a non-JSON body", method, resource))
    }
}

/// Flatten a JSON object into form fields.
///
/// Nested values are rejected; the service only accepts scalar parameters.
fn form_fields(body: &Value) -> Result<Vec<(String, String)>> {
    let Some(object) = body.as_object() else {
        bail!("request body must be a JSON object");
    };
    object
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => {
                    bail!("request body field '{}' is not a scalar", key)
                }
            };
            Ok((key.clone(), text))
        })
        .collect()
}

/// Extract `error.errormessage` from an error body, if it has one.
fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("error")?
        .get("errormessage")?
        .as_str()
        .map(str::to_string)
}
