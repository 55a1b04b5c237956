//! Handlers for `/tenants/{tenant_id}/tags`.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;
use tack_core::{store::TicketStore, tag::Tag};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Exact-match name lookup. Names are not unique, so this can return
  /// several tags.
  pub name: Option<String>,
}

/// `GET /tenants/{tenant_id}/tags[?name=<name>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Path(tenant_id): Path<Uuid>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Tag>>, ApiError>
where
  S: TicketStore,
{
  let store = state.store.as_ref();
  let exists = store
    .tenant_exists(tenant_id)
    .await
    .map_err(|e| ApiError::Internal(Box::new(e)))?;
  if !exists {
    return Err(ApiError::NotFound(format!("tenant {tenant_id} not found")));
  }

  let tags = match params.name.as_deref() {
    Some(name) => {
      let ids = store
        .tag_ids_by_name(tenant_id, name)
        .await
        .map_err(|e| ApiError::Internal(Box::new(e)))?;
      store
        .tags_by_ids(tenant_id, &ids)
        .await
        .map_err(|e| ApiError::Internal(Box::new(e)))?
    }
    None => store
      .list_tags(tenant_id)
      .await
      .map_err(|e| ApiError::Internal(Box::new(e)))?,
  };

  Ok(Json(tags))
}
