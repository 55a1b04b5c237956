//! Tag — a tenant-scoped label applied to tickets.
//!
//! Tag names are display text, not keys: they are not unique per tenant, and
//! nothing in the aggregation path looks a tag up by name. The id is the only
//! stable join key; name lookup exists solely as an explicit convenience
//! ([`crate::store::TicketStore::tag_ids_by_name`]).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
  pub tag_id:        Uuid,
  pub tenant_id:     Uuid,
  pub name:          String,
  pub color:         String,
  /// Whether this tag appears as a column on the board.
  pub board_visible: bool,
}

impl Tag {
  pub fn summary(&self) -> TagSummary {
    TagSummary {
      tag_id: self.tag_id,
      name:   self.name.clone(),
      color:  self.color.clone(),
    }
  }
}

/// The tag fields carried on a hydrated ticket page item and board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSummary {
  pub tag_id: Uuid,
  pub name:   String,
  pub color:  String,
}

/// Input to [`crate::store::TicketStore::add_tag`].
#[derive(Debug, Clone)]
pub struct NewTag {
  pub tenant_id:     Uuid,
  pub name:          String,
  pub color:         String,
  pub board_visible: bool,
}
