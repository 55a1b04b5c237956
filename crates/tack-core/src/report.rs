//! The tag report — per-tag association counts within a date window.
//!
//! This is a historical tally of *link rows* by their `linked_at` timestamp,
//! not a snapshot of live ticket membership: a count here may include
//! tickets that were since deleted or re-tagged. The board and this report
//! are therefore not expected to agree, by design.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, aggregate::ensure_tenant, store::TicketStore};

// ─── DateRange ───────────────────────────────────────────────────────────────

/// An inclusive timestamp window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
  pub start: DateTime<Utc>,
  pub end:   DateTime<Utc>,
}

impl DateRange {
  pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
    Self { start, end }
  }

  /// The window ending now and reaching `days` back.
  pub fn last_days(days: i64) -> Self {
    let end = Utc::now();
    Self { start: end - Duration::days(days), end }
  }

  pub fn validate(&self) -> Result<()> {
    if self.start > self.end {
      return Err(Error::InvalidRange { start: self.start, end: self.end });
    }
    Ok(())
  }
}

// ─── TagCount ────────────────────────────────────────────────────────────────

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
  pub tag_id: Uuid,
  pub label:  String,
  pub color:  String,
  pub count:  u64,
}

/// Count tag associations created within `range`, grouped by tag.
///
/// Every tenant tag appears in the result, including those with count 0.
/// Ordered by count descending, then label ascending.
pub async fn report_by_tag<S: TicketStore>(
  store: &S,
  tenant_id: Uuid,
  range: DateRange,
) -> Result<Vec<TagCount>> {
  range.validate()?;
  ensure_tenant(store, tenant_id).await?;

  let mut counts = store
    .tag_link_counts(tenant_id, range)
    .await
    .map_err(Error::unavailable)?;

  // The ordering contract is enforced here rather than trusted to the
  // backend's ORDER BY.
  counts.sort_by(|a, b| {
    b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label))
  });
  Ok(counts)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn inverted_range_rejected() {
    let now = Utc::now();
    let range = DateRange::new(now, now - Duration::hours(1));
    assert!(matches!(
      range.validate().unwrap_err(),
      Error::InvalidRange { .. }
    ));
  }

  #[test]
  fn instant_range_accepted() {
    let now = Utc::now();
    DateRange::new(now, now).validate().unwrap();
  }
}
