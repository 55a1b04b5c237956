//! Reference entities joined onto tickets for display: queues, agents, and
//! channel connections. Each is optional on a ticket.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Queue ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Queue {
  pub queue_id:  Uuid,
  pub tenant_id: Uuid,
  pub name:      String,
  pub color:     String,
}

impl Queue {
  pub fn summary(&self) -> QueueSummary {
    QueueSummary { queue_id: self.queue_id, name: self.name.clone() }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSummary {
  pub queue_id: Uuid,
  pub name:     String,
}

#[derive(Debug, Clone)]
pub struct NewQueue {
  pub tenant_id: Uuid,
  pub name:      String,
  pub color:     String,
}

// ─── Agent ───────────────────────────────────────────────────────────────────

/// A support user tickets can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
  pub agent_id:  Uuid,
  pub tenant_id: Uuid,
  pub name:      String,
}

impl Agent {
  pub fn summary(&self) -> AgentSummary {
    AgentSummary { agent_id: self.agent_id, name: self.name.clone() }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSummary {
  pub agent_id: Uuid,
  pub name:     String,
}

#[derive(Debug, Clone)]
pub struct NewAgent {
  pub tenant_id: Uuid,
  pub name:      String,
}

// ─── Connection ──────────────────────────────────────────────────────────────

/// A channel session (e.g. one WhatsApp account). Nullable on tickets — some
/// channels have no session concept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
  pub connection_id: Uuid,
  pub tenant_id:     Uuid,
  pub name:          String,
}

impl Connection {
  pub fn summary(&self) -> ConnectionSummary {
    ConnectionSummary {
      connection_id: self.connection_id,
      name:          self.name.clone(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSummary {
  pub connection_id: Uuid,
  pub name:          String,
}

#[derive(Debug, Clone)]
pub struct NewConnection {
  pub tenant_id: Uuid,
  pub name:      String,
}
