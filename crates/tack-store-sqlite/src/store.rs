//! [`SqliteStore`] — the SQLite implementation of [`TicketStore`].

use std::{
  collections::{BTreeSet, HashMap},
  path::Path,
};

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use tack_core::{
  contact::{Contact, NewContact},
  directory::{Agent, Connection, NewAgent, NewConnection, NewQueue, Queue},
  page::Cursor,
  report::{DateRange, TagCount},
  store::{IdPage, TicketStore},
  tag::{NewTag, Tag, TagSummary},
  tenant::Tenant,
  ticket::{NewTicket, Ticket, TicketStatus, TicketView},
};

use crate::{
  Error, Result,
  encode::{
    RawTag, RawTicketView, decode_dt, decode_uuid, encode_channel, encode_dt,
    encode_status, encode_uuid,
  },
  schema::SCHEMA,
};

const TAG_COLUMNS: &str = "tag_id, tenant_id, name, color, board_visible";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Tack ticket store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Check that a tag exists and belongs to the tenant.
  async fn tag_belongs(&self, tenant_id: Uuid, tag_id: Uuid) -> Result<bool> {
    let tenant_str = encode_uuid(tenant_id);
    let tag_str = encode_uuid(tag_id);

    let found: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM tags WHERE tag_id = ?1 AND tenant_id = ?2",
              rusqlite::params![tag_str, tenant_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(found)
  }

  async fn select_tags(
    &self,
    sql: String,
    params: Vec<String>,
  ) -> Result<Vec<Tag>> {
    let raws: Vec<RawTag> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let refs: Vec<&dyn rusqlite::ToSql> =
          params.iter().map(|p| p as &dyn rusqlite::ToSql).collect();
        let rows = stmt
          .query_map(refs.as_slice(), |row| {
            Ok(RawTag {
              tag_id:        row.get(0)?,
              tenant_id:     row.get(1)?,
              name:          row.get(2)?,
              color:         row.get(3)?,
              board_visible: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTag::into_tag).collect()
  }
}

// ─── TicketStore impl ────────────────────────────────────────────────────────

impl TicketStore for SqliteStore {
  type Error = Error;

  // ── Tenants ───────────────────────────────────────────────────────────────

  async fn tenant_exists(&self, tenant_id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(tenant_id);

    let found: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM tenants WHERE tenant_id = ?1",
              rusqlite::params![id_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(found)
  }

  // ── Tags ──────────────────────────────────────────────────────────────────

  async fn tags_by_ids(
    &self,
    tenant_id: Uuid,
    tag_ids: &[Uuid],
  ) -> Result<Vec<Tag>> {
    if tag_ids.is_empty() {
      return Ok(Vec::new());
    }

    let sql = format!(
      "SELECT {TAG_COLUMNS} FROM tags
       WHERE tenant_id = ? AND tag_id IN ({})",
      placeholders(tag_ids.len()),
    );
    let mut params = vec![encode_uuid(tenant_id)];
    params.extend(tag_ids.iter().copied().map(encode_uuid));

    self.select_tags(sql, params).await
  }

  async fn list_tags(&self, tenant_id: Uuid) -> Result<Vec<Tag>> {
    let sql = format!(
      "SELECT {TAG_COLUMNS} FROM tags
       WHERE tenant_id = ? ORDER BY name ASC, tag_id ASC",
    );
    self.select_tags(sql, vec![encode_uuid(tenant_id)]).await
  }

  async fn board_tags(&self, tenant_id: Uuid) -> Result<Vec<Tag>> {
    let sql = format!(
      "SELECT {TAG_COLUMNS} FROM tags
       WHERE tenant_id = ? AND board_visible = 1
       ORDER BY name ASC, tag_id ASC",
    );
    self.select_tags(sql, vec![encode_uuid(tenant_id)]).await
  }

  async fn tag_ids_by_name(
    &self,
    tenant_id: Uuid,
    name: &str,
  ) -> Result<Vec<Uuid>> {
    let tenant_str = encode_uuid(tenant_id);
    let name = name.to_owned();

    let raw: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT tag_id FROM tags
           WHERE tenant_id = ?1 AND name = ?2
           ORDER BY tag_id ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![tenant_str, name], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raw.iter().map(|s| decode_uuid(s)).collect()
  }

  // ── Tag membership ────────────────────────────────────────────────────────

  async fn ticket_ids_for_tags(
    &self,
    tenant_id: Uuid,
    tag_ids: &[Uuid],
  ) -> Result<Vec<Uuid>> {
    if tag_ids.is_empty() {
      return Ok(Vec::new());
    }

    // Tenant scope flows through the tags table; the join table itself has
    // no tenant column. No join to tickets here — orphaned links are
    // intentionally visible to the caller.
    let sql = format!(
      "SELECT DISTINCT tt.ticket_id
       FROM ticket_tags tt
       JOIN tags g ON g.tag_id = tt.tag_id
       WHERE g.tenant_id = ? AND tt.tag_id IN ({})",
      placeholders(tag_ids.len()),
    );
    let mut params = vec![encode_uuid(tenant_id)];
    params.extend(tag_ids.iter().copied().map(encode_uuid));

    let raw: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let refs: Vec<&dyn rusqlite::ToSql> =
          params.iter().map(|p| p as &dyn rusqlite::ToSql).collect();
        let rows = stmt
          .query_map(refs.as_slice(), |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raw.iter().map(|s| decode_uuid(s)).collect()
  }

  async fn all_ticket_ids(&self, tenant_id: Uuid) -> Result<Vec<Uuid>> {
    let tenant_str = encode_uuid(tenant_id);

    let raw: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT ticket_id FROM tickets WHERE tenant_id = ?1")?;
        let rows = stmt
          .query_map(rusqlite::params![tenant_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raw.iter().map(|s| decode_uuid(s)).collect()
  }

  // ── Two-phase aggregation primitives ──────────────────────────────────────

  async fn page_ticket_ids(
    &self,
    tenant_id: Uuid,
    id_filter: Option<&BTreeSet<Uuid>>,
    limit: u32,
    cursor: Option<Cursor>,
  ) -> Result<IdPage> {
    let tenant_str = encode_uuid(tenant_id);
    let filter_strs: Option<Vec<String>> =
      id_filter.map(|ids| ids.iter().copied().map(encode_uuid).collect());
    let cursor_strs = cursor
      .map(|c| (encode_dt(c.updated_at), encode_uuid(c.ticket_id)));
    let limit = i64::from(limit);

    let (raw_keys, total): (Vec<(String, String)>, i64) = self
      .conn
      .call(move |conn| {
        let mut where_sql = String::from("t.tenant_id = ?");
        if let Some(ids) = &filter_strs {
          where_sql.push_str(" AND t.ticket_id IN (");
          where_sql.push_str(&placeholders(ids.len()));
          where_sql.push(')');
        }

        let mut base_params: Vec<&dyn rusqlite::ToSql> = vec![&tenant_str];
        if let Some(ids) = &filter_strs {
          for id in ids {
            base_params.push(id);
          }
        }

        // The total is computed against the whole filter, never against the
        // page window, and against the tickets table alone — join fan-out
        // cannot reach it.
        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM tickets t WHERE {where_sql}"),
          base_params.as_slice(),
          |row| row.get(0),
        )?;

        let mut page_sql = format!(
          "SELECT t.ticket_id, t.updated_at FROM tickets t WHERE {where_sql}"
        );
        let mut page_params = base_params.clone();
        if let Some((ts, id)) = &cursor_strs {
          page_sql.push_str(
            " AND (t.updated_at < ? \
               OR (t.updated_at = ? AND t.ticket_id < ?))",
          );
          page_params.push(ts);
          page_params.push(ts);
          page_params.push(id);
        }
        page_sql
          .push_str(" ORDER BY t.updated_at DESC, t.ticket_id DESC LIMIT ?");
        page_params.push(&limit);

        let mut stmt = conn.prepare(&page_sql)?;
        let keys = stmt
          .query_map(page_params.as_slice(), |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((keys, total))
      })
      .await?;

    let keys = raw_keys
      .into_iter()
      .map(|(id, ts)| {
        Ok(Cursor { ticket_id: decode_uuid(&id)?, updated_at: decode_dt(&ts)? })
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(IdPage { keys, total: total as u64 })
  }

  async fn hydrate_tickets(
    &self,
    tenant_id: Uuid,
    ticket_ids: &[Uuid],
  ) -> Result<Vec<TicketView>> {
    if ticket_ids.is_empty() {
      return Ok(Vec::new());
    }

    let tenant_str = encode_uuid(tenant_id);
    let id_strs: Vec<String> =
      ticket_ids.iter().copied().map(encode_uuid).collect();
    let in_list = placeholders(id_strs.len());

    let view_sql = format!(
      "SELECT
         t.ticket_id, t.tenant_id, t.status, t.channel,
         t.contact_id, t.queue_id, t.agent_id, t.connection_id,
         t.created_at, t.updated_at,
         c.name, c.address, c.is_group,
         q.name, a.name, n.name
       FROM tickets t
       JOIN contacts c          ON c.contact_id    = t.contact_id
       LEFT JOIN queues q       ON q.queue_id      = t.queue_id
       LEFT JOIN agents a       ON a.agent_id      = t.agent_id
       LEFT JOIN connections n  ON n.connection_id = t.connection_id
       WHERE t.tenant_id = ? AND t.ticket_id IN ({in_list})"
    );

    // The full tag list is fetched separately: these are 1:0..1 display
    // joins above, so the row set stays one row per ticket.
    let tag_sql = format!(
      "SELECT tt.ticket_id, g.tag_id, g.name, g.color
       FROM ticket_tags tt
       JOIN tags g ON g.tag_id = tt.tag_id
       WHERE g.tenant_id = ? AND tt.ticket_id IN ({in_list})
       ORDER BY g.name ASC, g.tag_id ASC"
    );

    type RawTagRow = (String, String, String, String);
    let (raw_views, raw_tags): (Vec<RawTicketView>, Vec<RawTagRow>) = self
      .conn
      .call(move |conn| {
        let mut params: Vec<&dyn rusqlite::ToSql> = vec![&tenant_str];
        for id in &id_strs {
          params.push(id);
        }

        let mut stmt = conn.prepare(&view_sql)?;
        let views = stmt
          .query_map(params.as_slice(), |row| {
            Ok(RawTicketView {
              ticket_id:       row.get(0)?,
              tenant_id:       row.get(1)?,
              status:          row.get(2)?,
              channel:         row.get(3)?,
              contact_id:      row.get(4)?,
              queue_id:        row.get(5)?,
              agent_id:        row.get(6)?,
              connection_id:   row.get(7)?,
              created_at:      row.get(8)?,
              updated_at:      row.get(9)?,
              contact_name:    row.get(10)?,
              contact_address: row.get(11)?,
              contact_group:   row.get(12)?,
              queue_name:      row.get(13)?,
              agent_name:      row.get(14)?,
              connection_name: row.get(15)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(&tag_sql)?;
        let tags = stmt
          .query_map(params.as_slice(), |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((views, tags))
      })
      .await?;

    let mut tag_map: HashMap<Uuid, Vec<TagSummary>> = HashMap::new();
    for (ticket_id, tag_id, name, color) in raw_tags {
      tag_map.entry(decode_uuid(&ticket_id)?).or_default().push(TagSummary {
        tag_id: decode_uuid(&tag_id)?,
        name,
        color,
      });
    }

    raw_views
      .into_iter()
      .map(|raw| {
        let ticket_id = decode_uuid(&raw.ticket_id)?;
        let tags = tag_map.remove(&ticket_id).unwrap_or_default();
        raw.into_view(tags)
      })
      .collect()
  }

  // ── Report ────────────────────────────────────────────────────────────────

  async fn tag_link_counts(
    &self,
    tenant_id: Uuid,
    range: DateRange,
  ) -> Result<Vec<TagCount>> {
    let tenant_str = encode_uuid(tenant_id);
    let start_str = encode_dt(range.start);
    let end_str = encode_dt(range.end);

    let raw: Vec<(String, String, String, i64)> = self
      .conn
      .call(move |conn| {
        // Counts link rows by linked_at — a historical tally. Deliberately
        // no join to tickets: associations whose ticket was later deleted
        // still count.
        let mut stmt = conn.prepare(
          "SELECT g.tag_id, g.name, g.color, COUNT(tt.ticket_id)
           FROM tags g
           LEFT JOIN ticket_tags tt
             ON tt.tag_id = g.tag_id
            AND tt.linked_at >= ?2
            AND tt.linked_at <= ?3
           WHERE g.tenant_id = ?1
           GROUP BY g.tag_id, g.name, g.color
           ORDER BY COUNT(tt.ticket_id) DESC, g.name ASC",
        )?;
        let rows = stmt
          .query_map(
            rusqlite::params![tenant_str, start_str, end_str],
            |row| {
              Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raw
      .into_iter()
      .map(|(tag_id, label, color, count)| {
        Ok(TagCount {
          tag_id: decode_uuid(&tag_id)?,
          label,
          color,
          count: count as u64,
        })
      })
      .collect()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn add_tenant(&self, name: String) -> Result<Tenant> {
    let tenant = Tenant {
      tenant_id:  Uuid::new_v4(),
      name,
      created_at: Utc::now(),
    };

    let id_str = encode_uuid(tenant.tenant_id);
    let name_str = tenant.name.clone();
    let at_str = encode_dt(tenant.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tenants (tenant_id, name, created_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(tenant)
  }

  async fn add_contact(&self, input: NewContact) -> Result<Contact> {
    let contact = Contact {
      contact_id: Uuid::new_v4(),
      tenant_id:  input.tenant_id,
      name:       input.name,
      address:    input.address,
      is_group:   input.is_group,
    };

    let id_str = encode_uuid(contact.contact_id);
    let tenant_str = encode_uuid(contact.tenant_id);
    let name_str = contact.name.clone();
    let address_str = contact.address.clone();
    let is_group = contact.is_group;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (contact_id, tenant_id, name, address, is_group)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, tenant_str, name_str, address_str, is_group],
        )?;
        Ok(())
      })
      .await?;

    Ok(contact)
  }

  async fn add_queue(&self, input: NewQueue) -> Result<Queue> {
    let queue = Queue {
      queue_id:  Uuid::new_v4(),
      tenant_id: input.tenant_id,
      name:      input.name,
      color:     input.color,
    };

    let id_str = encode_uuid(queue.queue_id);
    let tenant_str = encode_uuid(queue.tenant_id);
    let name_str = queue.name.clone();
    let color_str = queue.color.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO queues (queue_id, tenant_id, name, color)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, tenant_str, name_str, color_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(queue)
  }

  async fn add_agent(&self, input: NewAgent) -> Result<Agent> {
    let agent = Agent {
      agent_id:  Uuid::new_v4(),
      tenant_id: input.tenant_id,
      name:      input.name,
    };

    let id_str = encode_uuid(agent.agent_id);
    let tenant_str = encode_uuid(agent.tenant_id);
    let name_str = agent.name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO agents (agent_id, tenant_id, name) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, tenant_str, name_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(agent)
  }

  async fn add_connection(&self, input: NewConnection) -> Result<Connection> {
    let connection = Connection {
      connection_id: Uuid::new_v4(),
      tenant_id:     input.tenant_id,
      name:          input.name,
    };

    let id_str = encode_uuid(connection.connection_id);
    let tenant_str = encode_uuid(connection.tenant_id);
    let name_str = connection.name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO connections (connection_id, tenant_id, name)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, tenant_str, name_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(connection)
  }

  async fn add_ticket(&self, input: NewTicket) -> Result<Ticket> {
    let now = Utc::now();
    let ticket = Ticket {
      ticket_id:     Uuid::new_v4(),
      tenant_id:     input.tenant_id,
      status:        input.status,
      channel:       input.channel,
      contact_id:    input.contact_id,
      queue_id:      input.queue_id,
      agent_id:      input.agent_id,
      connection_id: input.connection_id,
      created_at:    now,
      updated_at:    now,
    };

    let id_str = encode_uuid(ticket.ticket_id);
    let tenant_str = encode_uuid(ticket.tenant_id);
    let status_str = encode_status(&ticket.status);
    let channel_str = encode_channel(&ticket.channel);
    let contact_str = encode_uuid(ticket.contact_id);
    let queue_str = ticket.queue_id.map(encode_uuid);
    let agent_str = ticket.agent_id.map(encode_uuid);
    let connection_str = ticket.connection_id.map(encode_uuid);
    let created_str = encode_dt(ticket.created_at);
    let updated_str = encode_dt(ticket.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tickets (
             ticket_id, tenant_id, status, channel, contact_id,
             queue_id, agent_id, connection_id, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            tenant_str,
            status_str,
            channel_str,
            contact_str,
            queue_str,
            agent_str,
            connection_str,
            created_str,
            updated_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(ticket)
  }

  async fn set_ticket_status(
    &self,
    tenant_id: Uuid,
    ticket_id: Uuid,
    status: TicketStatus,
  ) -> Result<()> {
    let tenant_str = encode_uuid(tenant_id);
    let id_str = encode_uuid(ticket_id);
    let status_str = encode_status(&status);
    let at_str = encode_dt(Utc::now());

    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE tickets SET status = ?1, updated_at = ?2
           WHERE tenant_id = ?3 AND ticket_id = ?4",
          rusqlite::params![status_str, at_str, tenant_str, id_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::TicketNotFound(ticket_id));
    }
    Ok(())
  }

  async fn delete_ticket(&self, tenant_id: Uuid, ticket_id: Uuid) -> Result<()> {
    let tenant_str = encode_uuid(tenant_id);
    let id_str = encode_uuid(ticket_id);

    // Tag links are not cascaded; the resulting orphans mirror what the
    // production data actually contains.
    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM tickets WHERE tenant_id = ?1 AND ticket_id = ?2",
          rusqlite::params![tenant_str, id_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::TicketNotFound(ticket_id));
    }
    Ok(())
  }

  async fn add_tag(&self, input: NewTag) -> Result<Tag> {
    let tag = Tag {
      tag_id:        Uuid::new_v4(),
      tenant_id:     input.tenant_id,
      name:          input.name,
      color:         input.color,
      board_visible: input.board_visible,
    };

    let id_str = encode_uuid(tag.tag_id);
    let tenant_str = encode_uuid(tag.tenant_id);
    let name_str = tag.name.clone();
    let color_str = tag.color.clone();
    let board = tag.board_visible;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tags (tag_id, tenant_id, name, color, board_visible)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, tenant_str, name_str, color_str, board],
        )?;
        Ok(())
      })
      .await?;

    Ok(tag)
  }

  async fn link_tag(
    &self,
    tenant_id: Uuid,
    ticket_id: Uuid,
    tag_id: Uuid,
    linked_at: Option<DateTime<Utc>>,
  ) -> Result<()> {
    if !self.tag_belongs(tenant_id, tag_id).await? {
      return Err(Error::TagNotFound(tag_id));
    }

    let ticket_str = encode_uuid(ticket_id);
    let tag_str = encode_uuid(tag_id);
    let at_str = encode_dt(linked_at.unwrap_or_else(Utc::now));

    // OR IGNORE keeps the original linked_at if the pair already exists.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO ticket_tags (ticket_id, tag_id, linked_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![ticket_str, tag_str, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn unlink_tag(
    &self,
    tenant_id: Uuid,
    ticket_id: Uuid,
    tag_id: Uuid,
  ) -> Result<()> {
    if !self.tag_belongs(tenant_id, tag_id).await? {
      return Err(Error::TagNotFound(tag_id));
    }

    let ticket_str = encode_uuid(ticket_id);
    let tag_str = encode_uuid(tag_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM ticket_tags WHERE ticket_id = ?1 AND tag_id = ?2",
          rusqlite::params![ticket_str, tag_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// `?, ?, …` for a dynamic IN list.
fn placeholders(n: usize) -> String {
  let mut s = String::with_capacity(n * 3);
  for i in 0..n {
    if i > 0 {
      s.push_str(", ");
    }
    s.push('?');
  }
  s
}
