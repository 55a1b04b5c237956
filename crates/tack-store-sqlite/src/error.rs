//! Error type for `tack-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to link or unlink a tag that does not exist for the tenant.
  #[error("tag not found: {0}")]
  TagNotFound(Uuid),

  #[error("ticket not found: {0}")]
  TicketNotFound(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
