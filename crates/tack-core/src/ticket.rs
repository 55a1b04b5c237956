//! Ticket types and the hydrated [`TicketView`] read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  contact::ContactSummary,
  directory::{AgentSummary, ConnectionSummary, QueueSummary},
  tag::TagSummary,
};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Ticket status. `open`, `pending`, and `closed` are the well-known values;
/// tenants may define their own, which round-trip as [`TicketStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TicketStatus {
  Open,
  Pending,
  Closed,
  Other(String),
}

impl TicketStatus {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Open => "open",
      Self::Pending => "pending",
      Self::Closed => "closed",
      Self::Other(s) => s,
    }
  }
}

impl From<String> for TicketStatus {
  fn from(s: String) -> Self {
    match s.as_str() {
      "open" => Self::Open,
      "pending" => Self::Pending,
      "closed" => Self::Closed,
      _ => Self::Other(s),
    }
  }
}

impl From<TicketStatus> for String {
  fn from(s: TicketStatus) -> Self { s.as_str().to_owned() }
}

// ─── Channel ─────────────────────────────────────────────────────────────────

/// The channel a ticket arrived on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Channel {
  Whatsapp,
  Other(String),
}

impl Channel {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Whatsapp => "whatsapp",
      Self::Other(s) => s,
    }
  }
}

impl From<String> for Channel {
  fn from(s: String) -> Self {
    match s.as_str() {
      "whatsapp" => Self::Whatsapp,
      _ => Self::Other(s),
    }
  }
}

impl From<Channel> for String {
  fn from(c: Channel) -> Self { c.as_str().to_owned() }
}

// ─── Ticket ──────────────────────────────────────────────────────────────────

/// A support ticket. Belongs to exactly one tenant; every joined entity in a
/// query must match that tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
  pub ticket_id:     Uuid,
  pub tenant_id:     Uuid,
  pub status:        TicketStatus,
  pub channel:       Channel,
  pub contact_id:    Uuid,
  pub queue_id:      Option<Uuid>,
  pub agent_id:      Option<Uuid>,
  pub connection_id: Option<Uuid>,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

/// Input to [`crate::store::TicketStore::add_ticket`].
/// Id and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTicket {
  pub tenant_id:     Uuid,
  pub status:        TicketStatus,
  pub channel:       Channel,
  pub contact_id:    Uuid,
  pub queue_id:      Option<Uuid>,
  pub agent_id:      Option<Uuid>,
  pub connection_id: Option<Uuid>,
}

impl NewTicket {
  /// Convenience constructor: an open WhatsApp ticket with no queue, agent,
  /// or connection.
  pub fn open(tenant_id: Uuid, contact_id: Uuid) -> Self {
    Self {
      tenant_id,
      status: TicketStatus::Open,
      channel: Channel::Whatsapp,
      contact_id,
      queue_id: None,
      agent_id: None,
      connection_id: None,
    }
  }
}

// ─── Hydrated view ───────────────────────────────────────────────────────────

/// The fully-joined page item returned by the aggregation engine.
///
/// `tags` is always the ticket's complete current tag set, independent of
/// whichever tag(s) caused the ticket to match a filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketView {
  pub ticket:     Ticket,
  pub contact:    ContactSummary,
  pub queue:      Option<QueueSummary>,
  pub agent:      Option<AgentSummary>,
  pub connection: Option<ConnectionSummary>,
  pub tags:       Vec<TagSummary>,
}
