//! Tag membership resolution.
//!
//! Two distinct operations, never conflated: [`resolve_for_tags`] resolves an
//! explicit tag-id set (empty input means the empty set), while
//! [`resolve_for_board`] resolves "every board-visible tag". The historical
//! count bugs in this pipeline all trace back to call sites treating an empty
//! explicit set as "give me the board".

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::{
  Error, Result,
  aggregate::ensure_tenant,
  store::TicketStore,
};

/// Outcome of a multi-tag resolution.
///
/// Unknown tag ids (including ids that belong to another tenant) do not fail
/// the resolution; they are reported here so the caller can surface a
/// warning while still acting on the valid subset.
#[derive(Debug, Clone, Default)]
pub struct TagResolution {
  /// Distinct ticket ids linked to at least one of the valid tags.
  pub ticket_ids:   BTreeSet<Uuid>,
  /// Input tag ids that did not resolve for the tenant.
  pub unknown_tags: Vec<Uuid>,
}

/// Resolve the distinct ticket-id set for an explicit list of tag ids.
///
/// Empty input is a complete answer — the empty set — and issues no
/// membership query. Duplicate input ids are collapsed before lookup.
pub async fn resolve_for_tags<S: TicketStore>(
  store: &S,
  tenant_id: Uuid,
  tag_ids: &[Uuid],
) -> Result<TagResolution> {
  ensure_tenant(store, tenant_id).await?;

  if tag_ids.is_empty() {
    return Ok(TagResolution::default());
  }

  let wanted: Vec<Uuid> = tag_ids
    .iter()
    .copied()
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect();

  let known = store
    .tags_by_ids(tenant_id, &wanted)
    .await
    .map_err(Error::unavailable)?;
  let known_ids: BTreeSet<Uuid> = known.iter().map(|t| t.tag_id).collect();

  let unknown_tags: Vec<Uuid> = wanted
    .iter()
    .filter(|id| !known_ids.contains(id))
    .copied()
    .collect();

  if known_ids.is_empty() {
    return Ok(TagResolution { ticket_ids: BTreeSet::new(), unknown_tags });
  }

  let valid: Vec<Uuid> = known_ids.into_iter().collect();
  let ticket_ids: BTreeSet<Uuid> = store
    .ticket_ids_for_tags(tenant_id, &valid)
    .await
    .map_err(Error::unavailable)?
    .into_iter()
    .collect();

  Ok(TagResolution { ticket_ids, unknown_tags })
}

/// Single-tag resolution. Unlike the multi-tag form, an unknown tag here is a
/// hard [`Error::InvalidTagReference`] — the caller asked for exactly this
/// tag, so there is no valid subset to degrade to.
pub async fn resolve_for_tag<S: TicketStore>(
  store: &S,
  tenant_id: Uuid,
  tag_id: Uuid,
) -> Result<BTreeSet<Uuid>> {
  let resolution = resolve_for_tags(store, tenant_id, &[tag_id]).await?;
  if !resolution.unknown_tags.is_empty() {
    return Err(Error::InvalidTagReference { tenant_id, tag_id });
  }
  Ok(resolution.ticket_ids)
}

/// Resolve the union of ticket ids across every board-visible tag.
pub async fn resolve_for_board<S: TicketStore>(
  store: &S,
  tenant_id: Uuid,
) -> Result<BTreeSet<Uuid>> {
  ensure_tenant(store, tenant_id).await?;

  let tags = store.board_tags(tenant_id).await.map_err(Error::unavailable)?;
  if tags.is_empty() {
    return Ok(BTreeSet::new());
  }

  let tag_ids: Vec<Uuid> = tags.iter().map(|t| t.tag_id).collect();
  let ids = store
    .ticket_ids_for_tags(tenant_id, &tag_ids)
    .await
    .map_err(Error::unavailable)?;
  Ok(ids.into_iter().collect())
}
