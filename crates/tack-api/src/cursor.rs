//! Opaque cursor tokens for the paginated endpoints.
//!
//! A token is the URL-safe base64 of `"<updated_at>|<ticket_id>"`, with the
//! timestamp in fixed-width RFC 3339. Clients must treat tokens as opaque;
//! the format is not part of the API contract.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, SecondsFormat, Utc};
use tack_core::page::Cursor;
use uuid::Uuid;

use crate::error::ApiError;

pub fn encode_cursor(cursor: &Cursor) -> String {
  let raw = format!(
    "{}|{}",
    cursor.updated_at.to_rfc3339_opts(SecondsFormat::Micros, false),
    cursor.ticket_id,
  );
  URL_SAFE_NO_PAD.encode(raw)
}

pub fn decode_cursor(token: &str) -> Result<Cursor, ApiError> {
  let invalid = || ApiError::BadRequest("invalid cursor".to_string());

  let raw = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
  let raw = String::from_utf8(raw).map_err(|_| invalid())?;
  let (ts, id) = raw.split_once('|').ok_or_else(invalid)?;

  let updated_at: DateTime<Utc> = DateTime::parse_from_rfc3339(ts)
    .map_err(|_| invalid())?
    .with_timezone(&Utc);
  let ticket_id = Uuid::parse_str(id).map_err(|_| invalid())?;

  Ok(Cursor { updated_at, ticket_id })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trips() {
    let cursor = Cursor { updated_at: Utc::now(), ticket_id: Uuid::new_v4() };
    let decoded = decode_cursor(&encode_cursor(&cursor)).unwrap();
    assert_eq!(decoded.ticket_id, cursor.ticket_id);
    assert_eq!(decoded.updated_at, cursor.updated_at);
  }

  #[test]
  fn rejects_garbage() {
    for token in ["", "!!!", "bm90IGEgY3Vyc29y", "YWJjfGRlZg"] {
      assert!(decode_cursor(token).is_err(), "token {token:?} should fail");
    }
  }
}
