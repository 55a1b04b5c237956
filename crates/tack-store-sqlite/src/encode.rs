//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings. Timestamps are stored as
//! fixed-width RFC 3339 with microsecond precision: the aggregation ordering
//! and the keyset-cursor comparisons run as `ORDER BY` / `<` on these TEXT
//! columns, which is only chronologically correct if every value has the same
//! width.

use chrono::{DateTime, SecondsFormat, Utc};
use tack_core::{
  contact::ContactSummary,
  directory::{AgentSummary, ConnectionSummary, QueueSummary},
  ticket::{Channel, Ticket, TicketStatus, TicketView},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, false)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Status / channel ────────────────────────────────────────────────────────

pub fn encode_status(s: &TicketStatus) -> String { s.as_str().to_owned() }

pub fn decode_status(s: String) -> TicketStatus { TicketStatus::from(s) }

pub fn encode_channel(c: &Channel) -> String { c.as_str().to_owned() }

pub fn decode_channel(s: String) -> Channel { Channel::from(s) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read from a `tickets` row joined with its display entities.
pub struct RawTicketView {
  // tickets columns
  pub ticket_id:     String,
  pub tenant_id:     String,
  pub status:        String,
  pub channel:       String,
  pub contact_id:    String,
  pub queue_id:      Option<String>,
  pub agent_id:      Option<String>,
  pub connection_id: Option<String>,
  pub created_at:    String,
  pub updated_at:    String,
  // contacts join
  pub contact_name:    String,
  pub contact_address: String,
  pub contact_group:   bool,
  // optional display joins
  pub queue_name:      Option<String>,
  pub agent_name:      Option<String>,
  pub connection_name: Option<String>,
}

impl RawTicketView {
  /// Assemble a [`TicketView`]; the caller supplies the ticket's tag list
  /// (fetched separately so the display joins never fan out).
  pub fn into_view(
    self,
    tags: Vec<tack_core::tag::TagSummary>,
  ) -> Result<TicketView> {
    let contact_id = decode_uuid(&self.contact_id)?;
    let queue_id = self.queue_id.as_deref().map(decode_uuid).transpose()?;
    let agent_id = self.agent_id.as_deref().map(decode_uuid).transpose()?;
    let connection_id =
      self.connection_id.as_deref().map(decode_uuid).transpose()?;

    let ticket = Ticket {
      ticket_id: decode_uuid(&self.ticket_id)?,
      tenant_id: decode_uuid(&self.tenant_id)?,
      status: decode_status(self.status),
      channel: decode_channel(self.channel),
      contact_id,
      queue_id,
      agent_id,
      connection_id,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    };

    let contact = ContactSummary {
      contact_id,
      name:     self.contact_name,
      address:  self.contact_address,
      is_group: self.contact_group,
    };

    // A dangling optional reference (entity deleted since the ticket was
    // written) degrades to no summary rather than an error.
    let queue = match (queue_id, self.queue_name) {
      (Some(queue_id), Some(name)) => Some(QueueSummary { queue_id, name }),
      _ => None,
    };
    let agent = match (agent_id, self.agent_name) {
      (Some(agent_id), Some(name)) => Some(AgentSummary { agent_id, name }),
      _ => None,
    };
    let connection = match (connection_id, self.connection_name) {
      (Some(connection_id), Some(name)) => {
        Some(ConnectionSummary { connection_id, name })
      }
      _ => None,
    };

    Ok(TicketView { ticket, contact, queue, agent, connection, tags })
  }
}

/// Raw strings read from a `tags` row.
pub struct RawTag {
  pub tag_id:        String,
  pub tenant_id:     String,
  pub name:          String,
  pub color:         String,
  pub board_visible: bool,
}

impl RawTag {
  pub fn into_tag(self) -> Result<tack_core::tag::Tag> {
    Ok(tack_core::tag::Tag {
      tag_id:        decode_uuid(&self.tag_id)?,
      tenant_id:     decode_uuid(&self.tenant_id)?,
      name:          self.name,
      color:         self.color,
      board_visible: self.board_visible,
    })
  }
}
