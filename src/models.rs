//! Core data models used throughout pingdom-sync.
//!
//! Remote entities ([`Contact`], [`CheckSummary`], [`CheckDetail`]) are
//! read-once snapshots of what the service held when they were fetched.
//! The `*Envelope` types mirror the service's JSON responses and are only
//! used at the transport boundary.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::url::compose_url;

/// A check URL decomposed into the service's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckUrlComponents {
    /// Hostname without scheme or port.
    pub host: String,
    /// Path, always starting with `/`, query string included.
    pub path: String,
    /// `true` for `https`.
    pub encrypted: bool,
}

impl CheckUrlComponents {
    pub fn to_url(&self) -> String {
        compose_url(&self.host, &self.path, self.encrypted)
    }
}

/// A notification contact as held by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A contact the caller wants to exist remotely.
///
/// `email` identifies the contact. A missing `name` falls back to the
/// email when the contact has to be created.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesiredContact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
}

impl DesiredContact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }

    pub fn email_only(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    /// The name the contact should carry remotely.
    pub fn effective_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }

    /// `false` when the name is missing or blank.
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

/// One entry of the `GET checks` listing.
///
/// The listing only carries the probe kind as a string; the path of an
/// http check is only available from [`CheckDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub hostname: String,
    #[serde(default)]
    pub resolution: u32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub status: String,
}

/// A single check as returned by `GET checks/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDetail {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub hostname: String,
    #[serde(default)]
    pub resolution: u32,
    #[serde(rename = "type")]
    pub probe: CheckType,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub contactids: Vec<u64>,
}

impl CheckDetail {
    /// The `scheme://host+path` this check probes, or `None` for non-http checks.
    pub fn url(&self) -> Option<String> {
        match &self.probe {
            CheckType::Http(http) => Some(compose_url(&self.hostname, &http.url, http.encryption)),
            CheckType::Tcp(_) | CheckType::Other { .. } => None,
        }
    }
}

/// Probe configuration of an http check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpProbe {
    #[serde(default)]
    pub encryption: bool,
    #[serde(default = "default_probe_path")]
    pub url: String,
}

fn default_probe_path() -> String {
    "/".to_string()
}

/// Probe configuration of a tcp check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpProbe {
    pub port: u16,
}

/// The active probe of a check.
///
/// The service encodes it as a single-key object, e.g.
/// `{"http": {"encryption": true, "url": "/"}}`. Kinds this crate does not
/// model are kept as [`CheckType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub enum CheckType {
    Http(HttpProbe),
    Tcp(TcpProbe),
    Other { kind: String, settings: Value },
}

impl CheckType {
    pub fn kind(&self) -> &str {
        match self {
            CheckType::Http(_) => "http",
            CheckType::Tcp(_) => "tcp",
            CheckType::Other { kind, .. } => kind,
        }
    }
}

impl TryFrom<Map<String, Value>> for CheckType {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let Some((kind, settings)) = map.into_iter().next() else {
            return Err(serde::de::Error::custom("check type object is empty"));
        };
        match kind.as_str() {
            "http" => Ok(CheckType::Http(serde_json::from_value(settings)?)),
            "tcp" => Ok(CheckType::Tcp(serde_json::from_value(settings)?)),
            _ => Ok(CheckType::Other { kind, settings }),
        }
    }
}

impl From<CheckType> for Map<String, Value> {
    fn from(check_type: CheckType) -> Self {
        let (kind, settings) = match check_type {
            CheckType::Http(http) => ("http".to_string(), serde_json::json!(http)),
            CheckType::Tcp(tcp) => ("tcp".to_string(), serde_json::json!(tcp)),
            CheckType::Other { kind, settings } => (kind, settings),
        };
        let mut map = Map::new();
        map.insert(kind, settings);
        map
    }
}

/// Outcome of a successful alert reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertReceipt {
    pub check_id: u64,
    pub contact_ids: Vec<u64>,
    /// Confirmation message returned by the check update.
    pub message: String,
}

// ─── Wire envelopes ─────────────────────────────────────────────────

/// `GET notification_contacts`
#[derive(Debug, Deserialize)]
pub struct ContactsEnvelope {
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// `POST notification_contacts`
#[derive(Debug, Deserialize)]
pub struct CreatedContactEnvelope {
    pub contact: CreatedContact,
}

#[derive(Debug, Deserialize)]
pub struct CreatedContact {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

/// `PUT` and `DELETE` on any resource.
#[derive(Debug, Deserialize)]
pub struct MessageEnvelope {
    pub message: String,
}

/// `GET checks`
#[derive(Debug, Deserialize)]
pub struct ChecksEnvelope {
    #[serde(default)]
    pub checks: Vec<CheckSummary>,
}

/// `GET checks/:id`
#[derive(Debug, Deserialize)]
pub struct CheckEnvelope {
    pub check: CheckDetail,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail(probe: Value) -> CheckDetail {
        serde_json::from_value(json!({
            "id": 578657,
            "name": "/dev/check/suite",
            "hostname": "test.com",
            "resolution": 1,
            "type": probe,
            "encryption": true,
            "status": "up",
        }))
        .unwrap()
    }

    #[test]
    fn test_http_check_url() {
        let mut check = detail(json!({"http": {"encryption": true, "url": "/dev/check/suite"}}));
        assert_eq!(check.url().as_deref(), Some("https://test.com/dev/check/suite"));

        if let CheckType::Http(http) = &mut check.probe {
            http.encryption = false;
        }
        assert_eq!(check.url().as_deref(), Some("http://test.com/dev/check/suite"));
    }

    #[test]
    fn test_tcp_check_has_no_url() {
        let check = detail(json!({"tcp": {"port": 80}}));
        assert_eq!(check.probe, CheckType::Tcp(TcpProbe { port: 80 }));
        assert_eq!(check.url(), None);
    }

    #[test]
    fn test_unknown_probe_kind_preserved() {
        let check = detail(json!({"dns": {"nameserver": "8.8.8.8"}}));
        assert_eq!(check.probe.kind(), "dns");
        assert_eq!(check.url(), None);
    }

    #[test]
    fn test_empty_probe_rejected() {
        let result: Result<CheckDetail, _> = serde_json::from_value(json!({
            "id": 1, "hostname": "test.com", "type": {}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_check_type_serializes_as_single_key_object() {
        let value = serde_json::to_value(CheckType::Tcp(TcpProbe { port: 443 })).unwrap();
        assert_eq!(value, json!({"tcp": {"port": 443}}));
    }

    #[test]
    fn test_effective_name_falls_back_to_email() {
        assert_eq!(DesiredContact::email_only("a@b.c").effective_name(), "a@b.c");
        assert_eq!(DesiredContact::new("", "a@b.c").effective_name(), "a@b.c");
        assert_eq!(DesiredContact::new("Ann", "a@b.c").effective_name(), "Ann");
        assert_eq!(DesiredContact::new("  ", "a@b.c").effective_name(), "a@b.c");
        assert!(!DesiredContact::new("  ", "a@b.c").has_name());
    }
}
