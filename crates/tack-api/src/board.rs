//! Handler for `/tenants/{tenant_id}/board`.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tack_core::{
  board, page::PageRequest, store::TicketStore, tag::TagSummary,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError, tickets::PageDto};

#[derive(Debug, Serialize)]
pub struct ColumnDto {
  pub tag:  TagSummary,
  pub page: PageDto,
}

#[derive(Debug, Serialize)]
pub struct BoardDto {
  pub columns:  Vec<ColumnDto>,
  pub untagged: PageDto,
}

#[derive(Debug, Deserialize)]
pub struct BoardParams {
  /// Per-column page size.
  pub limit: Option<u32>,
}

/// `GET /tenants/{tenant_id}/board`
///
/// Each column is paged independently; clients page deeper into a single
/// column through the tickets endpoint with that tag as filter.
pub async fn get<S>(
  State(state): State<AppState<S>>,
  Path(tenant_id): Path<Uuid>,
  Query(params): Query<BoardParams>,
) -> Result<Json<BoardDto>, ApiError>
where
  S: TicketStore,
{
  let limit = params.limit.unwrap_or(state.defaults.page_size);
  let board =
    board::partition(state.store.as_ref(), tenant_id, PageRequest::first(limit))
      .await?;

  Ok(Json(BoardDto {
    columns: board
      .columns
      .into_iter()
      .map(|c| ColumnDto { tag: c.tag, page: PageDto::from_page(c.page) })
      .collect(),
    untagged: PageDto::from_page(board.untagged),
  }))
}
