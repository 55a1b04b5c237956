//! Board partitioning — one column per board-visible tag plus "untagged".
//!
//! Invariant: a ticket carrying N ≥ 1 board-visible tags appears in exactly
//! those N columns and never in untagged; a ticket with zero board-visible
//! tags (whatever non-board tags it carries) appears in untagged exactly
//! once.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::{
  Error, Result,
  aggregate::{ensure_tenant, fetch_ticket_page},
  page::{PageRequest, TicketPage},
  store::{TicketFilter, TicketStore},
  tag::TagSummary,
};

/// One board column: a board-visible tag and a page of its member tickets.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BoardColumn {
  pub tag:  TagSummary,
  pub page: TicketPage,
}

/// The partitioned board.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Board {
  pub columns:  Vec<BoardColumn>,
  /// Tickets with no board-visible tag at all.
  pub untagged: TicketPage,
}

/// Partition the tenant's tickets into board columns.
///
/// The board-visible tag list is snapshotted once at the top; every column
/// and the untagged remainder are computed against that same snapshot, so a
/// tag flipping its board flag mid-call cannot produce a ticket that is in
/// no column and not in untagged either.
pub async fn partition<S: TicketStore>(
  store: &S,
  tenant_id: Uuid,
  page: PageRequest,
) -> Result<Board> {
  page.validate()?;
  ensure_tenant(store, tenant_id).await?;

  let tags = store.board_tags(tenant_id).await.map_err(Error::unavailable)?;

  let mut columns = Vec::with_capacity(tags.len());
  let mut tagged: BTreeSet<Uuid> = BTreeSet::new();

  for tag in &tags {
    let ids: BTreeSet<Uuid> = store
      .ticket_ids_for_tags(tenant_id, std::slice::from_ref(&tag.tag_id))
      .await
      .map_err(Error::unavailable)?
      .into_iter()
      .collect();
    tagged.extend(ids.iter().copied());

    let column_page =
      fetch_ticket_page(store, tenant_id, &TicketFilter::Ids(ids), page)
        .await?;
    columns.push(BoardColumn { tag: tag.summary(), page: column_page });
  }

  // Untagged = all tenant tickets minus the union across *all* board tags,
  // not minus any single column.
  let all: BTreeSet<Uuid> = store
    .all_ticket_ids(tenant_id)
    .await
    .map_err(Error::unavailable)?
    .into_iter()
    .collect();
  let untagged_ids: BTreeSet<Uuid> =
    all.difference(&tagged).copied().collect();

  let untagged =
    fetch_ticket_page(store, tenant_id, &TicketFilter::Ids(untagged_ids), page)
      .await?;

  Ok(Board { columns, untagged })
}
