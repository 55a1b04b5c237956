//! Tenant — the isolation boundary.
//!
//! Every entity and every query is scoped to exactly one tenant. Tenant ids
//! are supplied explicitly by the caller on all core operations and are never
//! inferred.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
  pub tenant_id:  Uuid,
  pub name:       String,
  pub created_at: DateTime<Utc>,
}
