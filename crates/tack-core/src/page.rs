//! Pagination types.
//!
//! The engine paginates with a keyset cursor on `(updated_at, ticket_id)`
//! rather than a raw offset: when new tickets arrive between page fetches, an
//! offset would skip or repeat rows, while a keyset cursor keeps each page
//! anchored to the ordering key of the previous page's last row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, ticket::TicketView};

/// Hard upper bound on page size; requests above it are rejected, never
/// clamped silently.
pub const MAX_PAGE_SIZE: u32 = 100;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// The ordering key of the last row of a page. The next page contains rows
/// strictly after it in `(updated_at DESC, ticket_id DESC)` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
  pub updated_at: DateTime<Utc>,
  pub ticket_id:  Uuid,
}

// ─── PageRequest ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
  /// Maximum rows to return; `1..=MAX_PAGE_SIZE`.
  pub limit:  u32,
  /// `None` for the first page.
  pub cursor: Option<Cursor>,
}

impl PageRequest {
  pub fn first(limit: u32) -> Self { Self { limit, cursor: None } }

  pub fn after(limit: u32, cursor: Cursor) -> Self {
    Self { limit, cursor: Some(cursor) }
  }

  /// Reject out-of-range page sizes before any query executes.
  pub fn validate(&self) -> Result<()> {
    if self.limit == 0 {
      return Err(Error::InvalidPagination("page size must be positive".into()));
    }
    if self.limit > MAX_PAGE_SIZE {
      return Err(Error::InvalidPagination(format!(
        "page size {} exceeds maximum {MAX_PAGE_SIZE}",
        self.limit
      )));
    }
    Ok(())
  }
}

// ─── TicketPage ──────────────────────────────────────────────────────────────

/// One page of hydrated tickets plus the authoritative total.
///
/// `total` is the count of distinct matching tickets for the whole filter —
/// it is computed independently of joins and of the cursor, so it is the same
/// on every page of the same result set.
#[derive(Debug, Clone, Serialize)]
pub struct TicketPage {
  pub tickets:     Vec<TicketView>,
  pub total:       u64,
  /// Present when this page was full; a following fetch may still return an
  /// empty page if the set ended exactly on a page boundary.
  pub next_cursor: Option<Cursor>,
}

impl TicketPage {
  pub fn empty() -> Self {
    Self { tickets: Vec::new(), total: 0, next_cursor: None }
  }
}
