//! SQL schema for the Tack SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS tenants (
    tenant_id   TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS contacts (
    contact_id  TEXT PRIMARY KEY,
    tenant_id   TEXT NOT NULL REFERENCES tenants(tenant_id),
    name        TEXT NOT NULL,
    address     TEXT NOT NULL,   -- channel-level identifier (number / group JID)
    is_group    INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS queues (
    queue_id    TEXT PRIMARY KEY,
    tenant_id   TEXT NOT NULL REFERENCES tenants(tenant_id),
    name        TEXT NOT NULL,
    color       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS agents (
    agent_id    TEXT PRIMARY KEY,
    tenant_id   TEXT NOT NULL REFERENCES tenants(tenant_id),
    name        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS connections (
    connection_id TEXT PRIMARY KEY,
    tenant_id     TEXT NOT NULL REFERENCES tenants(tenant_id),
    name          TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tickets (
    ticket_id     TEXT PRIMARY KEY,
    tenant_id     TEXT NOT NULL REFERENCES tenants(tenant_id),
    status        TEXT NOT NULL,   -- 'open' | 'pending' | 'closed' | tenant-defined
    channel       TEXT NOT NULL,   -- 'whatsapp' | other
    contact_id    TEXT NOT NULL REFERENCES contacts(contact_id),
    queue_id      TEXT REFERENCES queues(queue_id),
    agent_id      TEXT REFERENCES agents(agent_id),
    connection_id TEXT REFERENCES connections(connection_id),
    created_at    TEXT NOT NULL,   -- fixed-width RFC 3339 UTC
    updated_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tags (
    tag_id        TEXT PRIMARY KEY,
    tenant_id     TEXT NOT NULL REFERENCES tenants(tenant_id),
    name          TEXT NOT NULL,   -- display text; NOT unique per tenant
    color         TEXT NOT NULL,
    board_visible INTEGER NOT NULL DEFAULT 0
);

-- The join table carries no tenant column (scope flows through tags) and
-- deliberately no FK on ticket_id: production data contains links to deleted
-- tickets, and readers are required to tolerate those orphans.
CREATE TABLE IF NOT EXISTS ticket_tags (
    ticket_id   TEXT NOT NULL,
    tag_id      TEXT NOT NULL REFERENCES tags(tag_id),
    linked_at   TEXT NOT NULL,
    PRIMARY KEY (ticket_id, tag_id)
);

CREATE INDEX IF NOT EXISTS tickets_tenant_updated_idx
    ON tickets(tenant_id, updated_at DESC, ticket_id DESC);
CREATE INDEX IF NOT EXISTS ticket_tags_tag_idx    ON ticket_tags(tag_id);
CREATE INDEX IF NOT EXISTS ticket_tags_linked_idx ON ticket_tags(linked_at);
CREATE INDEX IF NOT EXISTS tags_tenant_idx        ON tags(tenant_id);
CREATE INDEX IF NOT EXISTS contacts_tenant_idx    ON contacts(tenant_id);

PRAGMA user_version = 1;
";
