//! Alert reconciliation: point an existing check at a set of contacts.
//!
//! One call runs, in order:
//!
//! 1. validation of every input, without touching the service;
//! 2. create-or-update of each contact, in the order given, once per
//!    email (the first entry for an email wins);
//! 3. lookup of the check monitoring the URL;
//! 4. a single `PUT checks/:id` with the contact ids, interval and
//!    email flag.
//!
//! The first failure ends the call. Contacts created before a later step
//! fails are left in place.

use std::collections::HashSet;

use serde_json::json;

use crate::checks::check_resource;
use crate::config::{is_supported_resolution, SUPPORTED_RESOLUTIONS};
use crate::error::{GatewayError, Result};
use crate::gateway::PingdomGateway;
use crate::models::{AlertReceipt, DesiredContact, MessageEnvelope};
use crate::transport::{Method, Requester};
use crate::url::parse_check_url;

pub const MISSING_NAME: &str = "one contact did not have a 'name' defined";
pub const MISSING_EMAIL: &str = "one contact did not have an 'email' defined";

impl<R: Requester> PingdomGateway<R> {
    /// Reconcile the alert settings of the check monitoring `url`.
    ///
    /// The check must already exist; this never creates one. On failure
    /// the error message is also kept in [`last_error`](Self::last_error)
    /// until the next call.
    pub fn add_or_modify_alert(
        &mut self,
        url: &str,
        contacts: &[DesiredContact],
        resolution: u32,
        send_email: bool,
    ) -> Result<AlertReceipt> {
        self.last_error = None;

        let outcome = self.reconcile_alert(url, contacts, resolution, send_email);
        if let Err(err) = &outcome {
            tracing::warn!(url, error = %err, "alert reconciliation failed");
            self.last_error = Some(err.to_string());
        }
        outcome
    }

    fn reconcile_alert(
        &self,
        url: &str,
        contacts: &[DesiredContact],
        resolution: u32,
        send_email: bool,
    ) -> Result<AlertReceipt> {
        validate_alert(url, contacts, resolution)?;

        let contacts = dedup_by_email(contacts);
        let mut contact_ids = Vec::with_capacity(contacts.len());
        for desired in contacts {
            contact_ids.push(self.add_or_modify_contact(desired)?.id);
        }

        let check = self
            .find_check_by_url(url)?
            .ok_or_else(|| GatewayError::CheckNotFound(url.to_string()))?;

        let body = json!({
            "contactids": join_ids(&contact_ids),
            "resolution": resolution,
            "sendtoemail": send_email,
            "sendnotificationwhendown": self.alerts.notify_after_failures,
        });
        let reply: MessageEnvelope =
            self.call(Method::Put, &check_resource(check.id), Some(&body))?;

        tracing::info!(
            check_id = check.id,
            url,
            contacts = contact_ids.len(),
            resolution,
            "updated check alerts"
        );
        Ok(AlertReceipt {
            check_id: check.id,
            contact_ids,
            message: reply.message,
        })
    }
}

/// Reject input that cannot be reconciled, before any remote call.
///
/// Unlike [`add_or_modify_contact`](PingdomGateway::add_or_modify_contact),
/// which falls back to the email, every contact here must be named.
fn validate_alert(url: &str, contacts: &[DesiredContact], resolution: u32) -> Result<()> {
    for contact in contacts {
        if !contact.has_name() {
            return Err(GatewayError::InvalidContact(MISSING_NAME.to_string()));
        }
        if contact.email.trim().is_empty() {
            return Err(GatewayError::InvalidContact(MISSING_EMAIL.to_string()));
        }
    }
    if !is_supported_resolution(resolution) {
        return Err(GatewayError::InvalidSetting(format!(
            "resolution must be one of {:?} minutes, got {}",
            SUPPORTED_RESOLUTIONS, resolution
        )));
    }
    if parse_check_url(url).is_none() {
        return Err(GatewayError::UnsupportedUrl(url.to_string()));
    }
    Ok(())
}

/// Keep the first entry for each email; later duplicates are dropped.
fn dedup_by_email(contacts: &[DesiredContact]) -> Vec<&DesiredContact> {
    let mut seen = HashSet::new();
    contacts
        .iter()
        .filter(|c| seen.insert(c.email.as_str()))
        .collect()
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
