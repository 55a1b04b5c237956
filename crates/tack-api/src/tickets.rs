//! Handlers for `/tenants/{tenant_id}/tickets`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/tenants/{tenant_id}/tickets` | `?tags=<uuid,...>&limit=<n>&cursor=<token>` |
//!
//! An absent `tags` parameter means "every ticket"; a present-but-empty one
//! means "tickets matching no tags", i.e. none. The two are not the same
//! query and never produce the same total.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tack_core::{
  aggregate::fetch_ticket_page,
  page::{PageRequest, TicketPage},
  resolve::resolve_for_tags,
  store::{TicketFilter, TicketStore},
  ticket::TicketView,
};
use uuid::Uuid;

use crate::{
  AppState,
  cursor::{decode_cursor, encode_cursor},
  error::ApiError,
};

// ─── DTOs ────────────────────────────────────────────────────────────────────

/// One page of hydrated tickets, with the cursor serialised as an opaque
/// token. Shared with the board endpoint.
#[derive(Debug, Serialize)]
pub struct PageDto {
  pub tickets:     Vec<TicketView>,
  pub total:       u64,
  pub next_cursor: Option<String>,
}

impl PageDto {
  pub fn from_page(page: TicketPage) -> Self {
    Self {
      tickets:     page.tickets,
      total:       page.total,
      next_cursor: page.next_cursor.as_ref().map(encode_cursor),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
  #[serde(flatten)]
  pub page:         PageDto,
  /// Requested tag ids that do not exist for the tenant. Non-fatal.
  pub unknown_tags: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Comma-separated tag uuids.
  pub tags:   Option<String>,
  pub limit:  Option<u32>,
  pub cursor: Option<String>,
}

fn parse_tag_csv(csv: &str) -> Result<Vec<Uuid>, ApiError> {
  csv
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| {
      Uuid::parse_str(s)
        .map_err(|_| ApiError::BadRequest(format!("invalid tag id: {s}")))
    })
    .collect()
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /tenants/{tenant_id}/tickets`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Path(tenant_id): Path<Uuid>,
  Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError>
where
  S: TicketStore,
{
  let limit = params.limit.unwrap_or(state.defaults.page_size);
  let page_req = match params.cursor.as_deref() {
    Some(token) => PageRequest::after(limit, decode_cursor(token)?),
    None => PageRequest::first(limit),
  };

  let (filter, unknown_tags) = match params.tags.as_deref() {
    None => (TicketFilter::All, Vec::new()),
    Some(csv) => {
      let tag_ids = parse_tag_csv(csv)?;
      let resolution =
        resolve_for_tags(state.store.as_ref(), tenant_id, &tag_ids).await?;
      (TicketFilter::Ids(resolution.ticket_ids), resolution.unknown_tags)
    }
  };

  let page =
    fetch_ticket_page(state.store.as_ref(), tenant_id, &filter, page_req)
      .await?;

  Ok(Json(ListResponse { page: PageDto::from_page(page), unknown_tags }))
}
