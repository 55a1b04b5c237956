//! Handler for `/tenants/{tenant_id}/tags/report`.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tack_core::{
  report::{self, DateRange, TagCount},
  store::TicketStore,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ReportParams {
  /// RFC 3339. Defaults to `to` minus the configured window.
  pub from: Option<DateTime<Utc>>,
  /// RFC 3339. Defaults to now.
  pub to:   Option<DateTime<Utc>>,
}

/// `GET /tenants/{tenant_id}/tags/report[?from=..&to=..]`
///
/// The window defaults are applied here, at the boundary; the core report
/// only ever sees a fully-specified range.
pub async fn get<S>(
  State(state): State<AppState<S>>,
  Path(tenant_id): Path<Uuid>,
  Query(params): Query<ReportParams>,
) -> Result<Json<Vec<TagCount>>, ApiError>
where
  S: TicketStore,
{
  let end = params.to.unwrap_or_else(Utc::now);
  let start = params
    .from
    .unwrap_or(end - Duration::days(state.defaults.report_window_days));

  let rows =
    report::report_by_tag(state.store.as_ref(), tenant_id, DateRange::new(start, end))
      .await?;
  Ok(Json(rows))
}
