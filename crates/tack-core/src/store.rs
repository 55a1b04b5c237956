//! The `TicketStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `tack-store-sqlite`).
//! The aggregation pipeline and the API layer depend on this abstraction, not
//! on any concrete backend.
//!
//! Read methods are the primitives the pipeline composes; they are
//! deliberately small so the two-phase aggregation protocol (id resolution,
//! then hydration) is visible at the trait boundary instead of buried in one
//! backend's SQL. Write methods exist for provisioning and for the write-path
//! services that own mutation — nothing in [`crate::resolve`],
//! [`crate::aggregate`], [`crate::board`], or [`crate::report`] calls them.

use std::{collections::BTreeSet, future::Future};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  contact::{Contact, NewContact},
  directory::{Agent, Connection, NewAgent, NewConnection, NewQueue, Queue},
  page::Cursor,
  report::{DateRange, TagCount},
  tag::{NewTag, Tag},
  tenant::Tenant,
  ticket::{NewTicket, Ticket, TicketStatus, TicketView},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Restriction on the ticket set fed to the aggregation engine.
///
/// `All` ("no filter") and `Ids` with an empty set ("no tickets") are
/// deliberately distinct variants: conflating them is how every historical
/// count discrepancy in this pipeline started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketFilter {
  /// Every ticket belonging to the tenant.
  All,
  /// Exactly these ticket ids, intersected with the tenant's tickets. The
  /// empty set matches nothing and short-circuits without querying.
  Ids(BTreeSet<Uuid>),
}

impl TicketFilter {
  pub fn ids(ids: impl IntoIterator<Item = Uuid>) -> Self {
    Self::Ids(ids.into_iter().collect())
  }
}

/// Phase-one output of the two-phase aggregation protocol: the ordered page
/// of ticket ordering keys, plus the filter's total distinct-ticket count
/// (computed independently of the page and of any join fan-out).
#[derive(Debug, Clone)]
pub struct IdPage {
  /// Page keys in `(updated_at DESC, ticket_id DESC)` order.
  pub keys:  Vec<Cursor>,
  pub total: u64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the relational entity store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait TicketStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Tenants ───────────────────────────────────────────────────────────

  fn tenant_exists(
    &self,
    tenant_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Tags ──────────────────────────────────────────────────────────────

  /// Fetch the subset of `tag_ids` that exist for `tenant_id`. Ids that are
  /// unknown, or that belong to another tenant, are simply absent from the
  /// result — the resolver turns that absence into a reported warning.
  fn tags_by_ids<'a>(
    &'a self,
    tenant_id: Uuid,
    tag_ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<Tag>, Self::Error>> + Send + 'a;

  /// Every tag for the tenant, ordered by name then id.
  fn list_tags(
    &self,
    tenant_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Tag>, Self::Error>> + Send + '_;

  /// All board-visible tags for the tenant, ordered by name then id so the
  /// board's column order is stable.
  fn board_tags(
    &self,
    tenant_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Tag>, Self::Error>> + Send + '_;

  /// Name→id convenience lookup. Names are not unique, so every match is
  /// returned; this is a display-layer helper and must never be used as the
  /// filter key inside the aggregation path.
  fn tag_ids_by_name<'a>(
    &'a self,
    tenant_id: Uuid,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<Uuid>, Self::Error>> + Send + 'a;

  // ── Tag membership ────────────────────────────────────────────────────

  /// Distinct ticket ids linked to any of `tag_ids`, tenant-scoped through
  /// the Tag entity (the join table itself has no tenant column). May
  /// include ids of tickets that no longer exist — orphaned links are the
  /// aggregation engine's problem, not this query's.
  fn ticket_ids_for_tags<'a>(
    &'a self,
    tenant_id: Uuid,
    tag_ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<Uuid>, Self::Error>> + Send + 'a;

  /// Every ticket id belonging to the tenant.
  fn all_ticket_ids(
    &self,
    tenant_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Uuid>, Self::Error>> + Send + '_;

  // ── Two-phase aggregation primitives ──────────────────────────────────

  /// Phase one: the distinct, ordered page of ticket ordering keys after
  /// `cursor`, plus the independent total for the whole filter. Operates on
  /// the tickets table only — never on ticket×tag join rows.
  fn page_ticket_ids<'a>(
    &'a self,
    tenant_id: Uuid,
    id_filter: Option<&'a BTreeSet<Uuid>>,
    limit: u32,
    cursor: Option<Cursor>,
  ) -> impl Future<Output = Result<IdPage, Self::Error>> + Send + 'a;

  /// Phase two: fully-joined rows for exactly `ticket_ids`, in no particular
  /// order (the engine re-imposes the phase-one order). Each view carries
  /// the ticket's complete current tag list.
  fn hydrate_tickets<'a>(
    &'a self,
    tenant_id: Uuid,
    ticket_ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<TicketView>, Self::Error>> + Send + 'a;

  // ── Report ────────────────────────────────────────────────────────────

  /// Per-tag counts of link rows whose `linked_at` falls inside `range`
  /// (inclusive both ends). Tags with no matching links appear with count 0.
  fn tag_link_counts(
    &self,
    tenant_id: Uuid,
    range: DateRange,
  ) -> impl Future<Output = Result<Vec<TagCount>, Self::Error>> + Send + '_;

  // ── Writes (provisioning / write-path collaborators) ──────────────────

  fn add_tenant(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Tenant, Self::Error>> + Send + '_;

  fn add_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  fn add_queue(
    &self,
    input: NewQueue,
  ) -> impl Future<Output = Result<Queue, Self::Error>> + Send + '_;

  fn add_agent(
    &self,
    input: NewAgent,
  ) -> impl Future<Output = Result<Agent, Self::Error>> + Send + '_;

  fn add_connection(
    &self,
    input: NewConnection,
  ) -> impl Future<Output = Result<Connection, Self::Error>> + Send + '_;

  fn add_ticket(
    &self,
    input: NewTicket,
  ) -> impl Future<Output = Result<Ticket, Self::Error>> + Send + '_;

  /// Update a ticket's status and bump `updated_at`, moving the ticket to
  /// the front of the aggregation ordering.
  fn set_ticket_status(
    &self,
    tenant_id: Uuid,
    ticket_id: Uuid,
    status: TicketStatus,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete a ticket row. Tag links are NOT cascaded — the production data
  /// this models contains orphaned links, and every reader is required to
  /// tolerate them.
  fn delete_ticket(
    &self,
    tenant_id: Uuid,
    ticket_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn add_tag(
    &self,
    input: NewTag,
  ) -> impl Future<Output = Result<Tag, Self::Error>> + Send + '_;

  /// Link a tag to a ticket. Idempotent: relinking an existing pair keeps
  /// the original `linked_at`. `linked_at` defaults to now; an explicit
  /// value exists for backfills.
  fn link_tag(
    &self,
    tenant_id: Uuid,
    ticket_id: Uuid,
    tag_id: Uuid,
    linked_at: Option<DateTime<Utc>>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn unlink_tag(
    &self,
    tenant_id: Uuid,
    ticket_id: Uuid,
    tag_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
