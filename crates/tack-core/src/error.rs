//! Error types for `tack-core`.
//!
//! `InvalidTenant`, `InvalidPagination`, and `InvalidRange` are rejected
//! before any storage query executes. `Unavailable` wraps every storage
//! failure; the core never retries — retry policy belongs to the caller.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// The tenant id does not name a known tenant.
  #[error("unknown tenant: {0}")]
  InvalidTenant(Uuid),

  /// A tag id that does not exist for the tenant, in a context where the
  /// caller asked for exactly that tag. Multi-tag resolution degrades to a
  /// partial result instead (see [`crate::resolve::TagResolution`]).
  #[error("tag {tag_id} not found for tenant {tenant_id}")]
  InvalidTagReference { tenant_id: Uuid, tag_id: Uuid },

  #[error("invalid pagination: {0}")]
  InvalidPagination(String),

  #[error("invalid date range: start {start} is after end {end}")]
  InvalidRange {
    start: DateTime<Utc>,
    end:   DateTime<Utc>,
  },

  /// The storage backend failed or timed out. Surfaced unchanged; partial
  /// results are never returned in its place.
  #[error("aggregation unavailable: {0}")]
  Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a storage-backend error as [`Error::Unavailable`].
  pub fn unavailable<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Unavailable(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
