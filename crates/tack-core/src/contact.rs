//! Contact — the party a ticket is held with.
//!
//! Every ticket references exactly one contact. The `address` is the
//! channel-level identifier (for WhatsApp, the phone number or group JID).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
  pub contact_id: Uuid,
  pub tenant_id:  Uuid,
  pub name:       String,
  pub address:    String,
  pub is_group:   bool,
}

impl Contact {
  pub fn summary(&self) -> ContactSummary {
    ContactSummary {
      contact_id: self.contact_id,
      name:       self.name.clone(),
      address:    self.address.clone(),
      is_group:   self.is_group,
    }
  }
}

/// The contact fields carried on a hydrated ticket page item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSummary {
  pub contact_id: Uuid,
  pub name:       String,
  pub address:    String,
  pub is_group:   bool,
}

/// Input to [`crate::store::TicketStore::add_contact`].
#[derive(Debug, Clone)]
pub struct NewContact {
  pub tenant_id: Uuid,
  pub name:      String,
  pub address:   String,
  pub is_group:  bool,
}
