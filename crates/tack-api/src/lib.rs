//! JSON REST API for Tack.
//!
//! Exposes an axum [`Router`] backed by any [`tack_core::store::TicketStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tack_api::router(state))
//! ```

pub mod board;
pub mod cursor;
pub mod error;
pub mod report;
pub mod tags;
pub mod tickets;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use serde::Deserialize;
use tack_core::store::TicketStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

const DEFAULT_PAGE_SIZE: u32 = 20;
const DEFAULT_REPORT_WINDOW_DAYS: i64 = 30;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,

  #[serde(default = "default_page_size")]
  pub page_size: u32,
  #[serde(default = "default_report_window_days")]
  pub report_window_days: i64,
}

fn default_page_size() -> u32 { DEFAULT_PAGE_SIZE }
fn default_report_window_days() -> i64 { DEFAULT_REPORT_WINDOW_DAYS }

/// Request-shaping defaults applied at the API boundary when the client
/// omits the corresponding parameter. The core pipeline never sees these;
/// it only receives fully-specified requests.
#[derive(Debug, Clone)]
pub struct Defaults {
  pub page_size:          u32,
  pub report_window_days: i64,
}

impl Default for Defaults {
  fn default() -> Self {
    Self {
      page_size:          DEFAULT_PAGE_SIZE,
      report_window_days: DEFAULT_REPORT_WINDOW_DAYS,
    }
  }
}

impl From<&ServerConfig> for Defaults {
  fn from(cfg: &ServerConfig) -> Self {
    Self {
      page_size:          cfg.page_size,
      report_window_days: cfg.report_window_days,
    }
  }
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: TicketStore> {
  pub store:    Arc<S>,
  pub defaults: Arc<Defaults>,
}

// Manual impl: `S` itself need not be `Clone`.
impl<S: TicketStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), defaults: Arc::clone(&self.defaults) }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: TicketStore + 'static,
{
  Router::new()
    .route("/tenants/{tenant_id}/tickets",     get(tickets::list::<S>))
    .route("/tenants/{tenant_id}/board",       get(board::get::<S>))
    .route("/tenants/{tenant_id}/tags",        get(tags::list::<S>))
    .route("/tenants/{tenant_id}/tags/report", get(report::get::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use serde_json::Value;
  use tack_core::{
    contact::{Contact, NewContact},
    store::TicketStore as _,
    tag::{NewTag, Tag},
    tenant::Tenant,
    ticket::{NewTicket, Ticket},
  };
  use tack_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState {
      store:    Arc::new(store),
      defaults: Arc::new(Defaults::default()),
    }
  }

  async fn tenant(state: &AppState<SqliteStore>) -> Tenant {
    state.store.add_tenant("acme".into()).await.unwrap()
  }

  async fn contact(state: &AppState<SqliteStore>, tenant_id: Uuid) -> Contact {
    state
      .store
      .add_contact(NewContact {
        tenant_id,
        name: "Maria".into(),
        address: "+5511999990000".into(),
        is_group: false,
      })
      .await
      .unwrap()
  }

  async fn ticket(
    state: &AppState<SqliteStore>,
    tenant_id: Uuid,
    contact_id: Uuid,
  ) -> Ticket {
    state
      .store
      .add_ticket(NewTicket::open(tenant_id, contact_id))
      .await
      .unwrap()
  }

  async fn tag(
    state: &AppState<SqliteStore>,
    tenant_id: Uuid,
    name: &str,
    board_visible: bool,
  ) -> Tag {
    state
      .store
      .add_tag(NewTag {
        tenant_id,
        name: name.into(),
        color: "#3f51b5".into(),
        board_visible,
      })
      .await
      .unwrap()
  }

  async fn get_json(
    state: AppState<SqliteStore>,
    uri: &str,
  ) -> (StatusCode, Value) {
    let req = Request::builder()
      .method("GET")
      .uri(uri)
      .body(Body::empty())
      .unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
  }

  // ── Tickets ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn tickets_lists_all_for_tenant() {
    let state = make_state().await;
    let t = tenant(&state).await;
    let c = contact(&state, t.tenant_id).await;
    for _ in 0..3 {
      ticket(&state, t.tenant_id, c.contact_id).await;
    }

    let (status, body) =
      get_json(state, &format!("/tenants/{}/tickets", t.tenant_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["tickets"].as_array().unwrap().len(), 3);
    assert_eq!(body["unknown_tags"].as_array().unwrap().len(), 0);
    assert!(body["next_cursor"].is_null());
  }

  #[tokio::test]
  async fn tickets_filter_by_tag_reports_unknown() {
    let state = make_state().await;
    let t = tenant(&state).await;
    let c = contact(&state, t.tenant_id).await;
    let g = tag(&state, t.tenant_id, "vip", false).await;

    let k = ticket(&state, t.tenant_id, c.contact_id).await;
    ticket(&state, t.tenant_id, c.contact_id).await;
    state
      .store
      .link_tag(t.tenant_id, k.ticket_id, g.tag_id, None)
      .await
      .unwrap();

    let ghost = Uuid::new_v4();
    let (status, body) = get_json(
      state,
      &format!("/tenants/{}/tickets?tags={},{}", t.tenant_id, g.tag_id, ghost),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(
      body["tickets"][0]["ticket"]["ticket_id"],
      k.ticket_id.to_string()
    );
    assert_eq!(body["unknown_tags"][0], ghost.to_string());
  }

  #[tokio::test]
  async fn empty_tags_parameter_matches_nothing() {
    let state = make_state().await;
    let t = tenant(&state).await;
    let c = contact(&state, t.tenant_id).await;
    ticket(&state, t.tenant_id, c.contact_id).await;

    let (status, body) =
      get_json(state, &format!("/tenants/{}/tickets?tags=", t.tenant_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["tickets"].as_array().unwrap().len(), 0);
  }

  #[tokio::test]
  async fn cursor_tokens_walk_every_page() {
    let state = make_state().await;
    let t = tenant(&state).await;
    let c = contact(&state, t.tenant_id).await;
    for _ in 0..5 {
      ticket(&state, t.tenant_id, c.contact_id).await;
    }

    let mut seen = std::collections::BTreeSet::new();
    let mut uri = format!("/tenants/{}/tickets?limit=2", t.tenant_id);
    loop {
      let (status, body) = get_json(state.clone(), &uri).await;
      assert_eq!(status, StatusCode::OK);
      assert_eq!(body["total"], 5);
      for view in body["tickets"].as_array().unwrap() {
        seen.insert(view["ticket"]["ticket_id"].as_str().unwrap().to_string());
      }
      match body["next_cursor"].as_str() {
        Some(token) => {
          uri = format!(
            "/tenants/{}/tickets?limit=2&cursor={token}",
            t.tenant_id
          );
        }
        None => break,
      }
    }
    assert_eq!(seen.len(), 5);
  }

  #[tokio::test]
  async fn bad_cursor_and_bad_limit_are_rejected() {
    let state = make_state().await;
    let t = tenant(&state).await;

    let (status, _) = get_json(
      state.clone(),
      &format!("/tenants/{}/tickets?cursor=!!!", t.tenant_id),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(
      state.clone(),
      &format!("/tenants/{}/tickets?limit=0", t.tenant_id),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(
      state,
      &format!("/tenants/{}/tickets?limit=9999", t.tenant_id),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn unknown_tenant_is_404_everywhere() {
    let ghost = Uuid::new_v4();
    for path in ["tickets", "board", "tags", "tags/report"] {
      let state = make_state().await;
      tenant(&state).await;
      let (status, _) =
        get_json(state, &format!("/tenants/{ghost}/{path}")).await;
      assert_eq!(status, StatusCode::NOT_FOUND, "path {path}");
    }
  }

  // ── Board ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn board_returns_columns_and_untagged() {
    let state = make_state().await;
    let t = tenant(&state).await;
    let c = contact(&state, t.tenant_id).await;
    let col = tag(&state, t.tenant_id, "doing", true).await;
    tag(&state, t.tenant_id, "hidden", false).await;

    let tagged = ticket(&state, t.tenant_id, c.contact_id).await;
    let loose = ticket(&state, t.tenant_id, c.contact_id).await;
    state
      .store
      .link_tag(t.tenant_id, tagged.ticket_id, col.tag_id, None)
      .await
      .unwrap();

    let (status, body) =
      get_json(state, &format!("/tenants/{}/board", t.tenant_id)).await;
    assert_eq!(status, StatusCode::OK);

    let columns = body["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0]["tag"]["name"], "doing");
    assert_eq!(columns[0]["page"]["total"], 1);
    assert_eq!(
      columns[0]["page"]["tickets"][0]["ticket"]["ticket_id"],
      tagged.ticket_id.to_string()
    );

    assert_eq!(body["untagged"]["total"], 1);
    assert_eq!(
      body["untagged"]["tickets"][0]["ticket"]["ticket_id"],
      loose.ticket_id.to_string()
    );
  }

  // ── Tags / report ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn tags_endpoint_lists_and_filters_by_name() {
    let state = make_state().await;
    let t = tenant(&state).await;
    tag(&state, t.tenant_id, "alpha", false).await;
    tag(&state, t.tenant_id, "beta", false).await;
    tag(&state, t.tenant_id, "beta", true).await;

    let (status, body) =
      get_json(state.clone(), &format!("/tenants/{}/tags", t.tenant_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) =
      get_json(state, &format!("/tenants/{}/tags?name=beta", t.tenant_id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn report_defaults_to_recent_window() {
    let state = make_state().await;
    let t = tenant(&state).await;
    let c = contact(&state, t.tenant_id).await;
    let g = tag(&state, t.tenant_id, "busy", false).await;
    tag(&state, t.tenant_id, "idle", false).await;

    for _ in 0..2 {
      let k = ticket(&state, t.tenant_id, c.contact_id).await;
      state
        .store
        .link_tag(t.tenant_id, k.ticket_id, g.tag_id, None)
        .await
        .unwrap();
    }

    let (status, body) =
      get_json(state, &format!("/tenants/{}/tags/report", t.tenant_id)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows[0]["label"], "busy");
    assert_eq!(rows[0]["count"], 2);
    assert_eq!(rows[1]["label"], "idle");
    assert_eq!(rows[1]["count"], 0);
  }

  #[tokio::test]
  async fn report_rejects_inverted_window() {
    let state = make_state().await;
    let t = tenant(&state).await;

    let (status, _) = get_json(
      state,
      &format!(
        "/tenants/{}/tags/report?from=2026-02-01T00:00:00Z&to=2026-01-01T00:00:00Z",
        t.tenant_id
      ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
