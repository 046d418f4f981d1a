//! Notification contact resolution.
//!
//! Contacts are identified by email, compared with exact string equality.
//! The only field ever updated on an existing contact is its name.

use serde_json::json;

use crate::error::{GatewayError, Result};
use crate::gateway::PingdomGateway;
use crate::models::{
    Contact, ContactsEnvelope, CreatedContactEnvelope, DesiredContact, MessageEnvelope,
};
use crate::transport::{Method, Requester};

const RESOURCE: &str = "notification_contacts";

fn contact_resource(id: u64) -> String {
    format!("{}/{}", RESOURCE, id)
}

impl<R: Requester> PingdomGateway<R> {
    /// Fetch every notification contact. An empty list is a valid answer.
    pub fn notification_contacts(&self) -> Result<Vec<Contact>> {
        let envelope: ContactsEnvelope = self.call(Method::Get, RESOURCE, None)?;
        Ok(envelope.contacts)
    }

    /// Find a contact by id.
    pub fn notification_contact(&self, id: u64) -> Result<Option<Contact>> {
        Ok(self
            .notification_contacts()?
            .into_iter()
            .find(|c| c.id == id))
    }

    /// Find a contact by email.
    pub fn notification_contact_by_email(&self, email: &str) -> Result<Option<Contact>> {
        Ok(self
            .notification_contacts()?
            .into_iter()
            .find(|c| c.email == email))
    }

    /// Make sure a contact with `desired.email` exists and carries the
    /// desired name.
    ///
    /// Issues at most one mutating call: a `POST` when no contact has the
    /// email, a `PUT` when one does but its name differs, nothing otherwise.
    /// Without a name, the email is used as the name.
    pub fn add_or_modify_contact(&self, desired: &DesiredContact) -> Result<Contact> {
        if desired.email.trim().is_empty() {
            return Err(GatewayError::InvalidContact(
                "contact has no 'email' defined".to_string(),
            ));
        }

        let name = desired.effective_name();
        let body = json!({ "name": name, "email": desired.email });

        match self.notification_contact_by_email(&desired.email)? {
            Some(existing) if existing.name == name => {
                tracing::debug!(id = existing.id, email = %existing.email, "contact up to date");
                Ok(existing)
            }
            Some(existing) => {
                let resource = contact_resource(existing.id);
                let reply: MessageEnvelope = self.call(Method::Put, &resource, Some(&body))?;
                tracing::info!(
                    id = existing.id,
                    email = %existing.email,
                    from = %existing.name,
                    to = %name,
                    message = %reply.message,
                    "renamed notification contact"
                );
                Ok(Contact {
                    id: existing.id,
                    name: name.to_string(),
                    email: existing.email,
                })
            }
            None => {
                let created: CreatedContactEnvelope =
                    self.call(Method::Post, RESOURCE, Some(&body))?;
                tracing::info!(
                    id = created.contact.id,
                    email = %desired.email,
                    "created notification contact"
                );
                Ok(Contact {
                    id: created.contact.id,
                    name: created.contact.name.unwrap_or_else(|| name.to_string()),
                    email: desired.email.clone(),
                })
            }
        }
    }

    /// Delete the contact with `email`.
    ///
    /// Returns the service's confirmation message, or `None` when no
    /// contact has that email.
    pub fn remove_notification_contact(&self, email: &str) -> Result<Option<String>> {
        let Some(contact) = self.notification_contact_by_email(email)? else {
            tracing::debug!(email, "no contact to remove");
            return Ok(None);
        };

        let resource = contact_resource(contact.id);
        let reply: MessageEnvelope = self.call(Method::Delete, &resource, None)?;
        tracing::info!(id = contact.id, email, "removed notification contact");
        Ok(Some(reply.message))
    }
}
