//! The ticket aggregation engine.
//!
//! [`fetch_ticket_page`] is the single authoritative implementation of
//! "fetch a deduplicated, joined, ordered, counted page of tickets". Every
//! caller — list view, board column, counters — goes through it; any future
//! "why don't these counts match" question is answered by auditing this one
//! function.
//!
//! The algorithm is two-phase:
//!
//! 1. Resolve the distinct, ordered page of ticket ids (and the independent
//!    total) against the tickets table alone. Tag membership arrives here
//!    already collapsed to an id set, so multi-tag tickets cannot multiply.
//! 2. Hydrate full joined rows for exactly those ids, then re-impose the
//!    phase-one ordering — hydration joins make no ordering promise.
//!
//! A write landing between the phases may leave a hydrated ticket showing
//! newer fields than the ordering key it was paged under, or drop it from
//! the page entirely if it was deleted. Both are accepted read-skew, not
//! errors; within one invocation the page order always matches phase one.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
  Error, Result,
  page::{PageRequest, TicketPage},
  store::{TicketFilter, TicketStore},
};

/// Fetch one page of tickets for `tenant_id` restricted by `filter`.
///
/// `TicketFilter::Ids` with an empty set returns `([], total = 0)` without
/// touching storage; `TicketFilter::All` means every tenant ticket. `total`
/// is always the distinct-ticket count for the whole filter, independent of
/// the page and of join fan-out.
pub async fn fetch_ticket_page<S: TicketStore>(
  store: &S,
  tenant_id: Uuid,
  filter: &TicketFilter,
  page: PageRequest,
) -> Result<TicketPage> {
  page.validate()?;
  ensure_tenant(store, tenant_id).await?;

  if let TicketFilter::Ids(ids) = filter
    && ids.is_empty()
  {
    return Ok(TicketPage::empty());
  }

  let id_filter = match filter {
    TicketFilter::All => None,
    TicketFilter::Ids(ids) => Some(ids),
  };

  // Phase one: ordered distinct ids + independent total.
  let id_page = store
    .page_ticket_ids(tenant_id, id_filter, page.limit, page.cursor)
    .await
    .map_err(Error::unavailable)?;

  if id_page.keys.is_empty() {
    return Ok(TicketPage {
      tickets:     Vec::new(),
      total:       id_page.total,
      next_cursor: None,
    });
  }

  let page_ids: Vec<Uuid> =
    id_page.keys.iter().map(|k| k.ticket_id).collect();

  // Phase two: hydrate, then restore the phase-one order.
  let mut views = store
    .hydrate_tickets(tenant_id, &page_ids)
    .await
    .map_err(Error::unavailable)?;

  let position: HashMap<Uuid, usize> = page_ids
    .iter()
    .enumerate()
    .map(|(i, id)| (*id, i))
    .collect();
  views.retain(|v| position.contains_key(&v.ticket.ticket_id));
  views.sort_by_key(|v| position[&v.ticket.ticket_id]);

  // A full page may have more behind it; the cursor is the last phase-one
  // key, not anything read during hydration.
  let next_cursor = if id_page.keys.len() as u32 == page.limit {
    id_page.keys.last().copied()
  } else {
    None
  };

  Ok(TicketPage { tickets: views, total: id_page.total, next_cursor })
}

/// Reject unknown tenants before running any aggregation query.
pub(crate) async fn ensure_tenant<S: TicketStore>(
  store: &S,
  tenant_id: Uuid,
) -> Result<()> {
  match store.tenant_exists(tenant_id).await {
    Ok(true) => Ok(()),
    Ok(false) => Err(Error::InvalidTenant(tenant_id)),
    Err(e) => Err(Error::unavailable(e)),
  }
}
