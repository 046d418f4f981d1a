//! Check resolution.
//!
//! A check is identified by host and path. The scheme is ignored when
//! matching, so switching a URL between `http` and `https` still refers to
//! the same check.

use crate::error::Result;
use crate::gateway::PingdomGateway;
use crate::models::{CheckDetail, CheckEnvelope, CheckSummary, CheckType, ChecksEnvelope};
use crate::transport::{Method, Requester};
use crate::url::parse_check_url;

const RESOURCE: &str = "checks";

pub(crate) fn check_resource(id: u64) -> String {
    format!("{}/{}", RESOURCE, id)
}

impl<R: Requester> PingdomGateway<R> {
    /// Fetch the summary listing of every check.
    pub fn checks(&self) -> Result<Vec<CheckSummary>> {
        let envelope: ChecksEnvelope = self.call(Method::Get, RESOURCE, None)?;
        Ok(envelope.checks)
    }

    /// Fetch one check with its probe settings.
    pub fn check(&self, id: u64) -> Result<CheckDetail> {
        let envelope: CheckEnvelope = self.call(Method::Get, &check_resource(id), None)?;
        Ok(envelope.check)
    }

    /// The URL a check probes; `None` for anything but http checks.
    pub fn check_url(&self, check: &CheckDetail) -> Option<String> {
        check.url()
    }

    /// Find the check monitoring `url`.
    ///
    /// The listing is narrowed to http checks on the same hostname; only
    /// those candidates are fetched individually to compare their path. Returns
    /// `None` when no check matches or `url` is not http(s).
    pub fn find_check_by_url(&self, url: &str) -> Result<Option<CheckDetail>> {
        let Some(target) = parse_check_url(url) else {
            tracing::debug!(url, "not an http(s) URL, no check can match");
            return Ok(None);
        };

        let candidates = self
            .checks()?
            .into_iter()
            .filter(|summary| {
                summary.hostname == target.host
                    && (summary.kind.is_empty() || summary.kind == "http")
            });

        for summary in candidates {
            let check = self.check(summary.id)?;
            match &check.probe {
                CheckType::Http(http) if http.url == target.path => {
                    tracing::debug!(id = check.id, url, "matched check");
                    return Ok(Some(check));
                }
                _ => continue,
            }
        }

        Ok(None)
    }
}
