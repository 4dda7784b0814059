//! SQL schema for the Daybook SQLite store.
//!
//! Executed once at store open. Idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS` — re-running against an initialised store is
//! a no-op. Table names are the external contract other processes rely on.

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS Users (
    id            TEXT PRIMARY KEY,
    username      TEXT NOT NULL COLLATE NOCASE,
    password_hash TEXT NOT NULL,
    email         TEXT NOT NULL COLLATE NOCASE,
    first_name    TEXT,
    last_name     TEXT,
    phone         TEXT,
    date_of_birth TEXT,            -- ISO date, no time component
    bio           TEXT,
    avatar_url    TEXT,
    role          TEXT NOT NULL DEFAULT 'standard',  -- 'standard' | 'privileged'
    is_active     INTEGER NOT NULL DEFAULT 1,
    is_system     INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL,   -- ISO 8601, UTC
    updated_at    TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS users_username_idx ON Users(username);
CREATE UNIQUE INDEX IF NOT EXISTS users_email_idx    ON Users(email);

-- Per-owner name uniqueness is deliberately NOT constrained here; callers
-- that need the guarantee go through the label_by_name lookup first.
CREATE TABLE IF NOT EXISTS Labels (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL REFERENCES Users(id) ON DELETE CASCADE,
    name        TEXT NOT NULL COLLATE NOCASE,
    description TEXT,
    color       TEXT NOT NULL DEFAULT '#9ca3af',
    is_system   INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS labels_user_idx ON Labels(user_id);

CREATE TABLE IF NOT EXISTS Memos (
    id         TEXT PRIMARY KEY,
    user_id    TEXT NOT NULL REFERENCES Users(id) ON DELETE CASCADE,
    title      TEXT NOT NULL DEFAULT '',
    content    TEXT NOT NULL,
    is_system  INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS memos_user_idx    ON Memos(user_id);
CREATE INDEX IF NOT EXISTS memos_updated_idx ON Memos(updated_at);

-- Memo <-> Label many-to-many. Cascades from either side: neither a deleted
-- memo nor a deleted label may leave an association behind.
CREATE TABLE IF NOT EXISTS MemoLabels (
    memo_id  TEXT NOT NULL REFERENCES Memos(id)  ON DELETE CASCADE,
    label_id TEXT NOT NULL REFERENCES Labels(id) ON DELETE CASCADE,
    PRIMARY KEY (memo_id, label_id)
);

CREATE TABLE IF NOT EXISTS Contacts (
    id            TEXT PRIMARY KEY,
    owner_user_id TEXT NOT NULL REFERENCES Users(id) ON DELETE CASCADE,
    name          TEXT NOT NULL,
    tags          TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    is_system     INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_owner_idx ON Contacts(owner_user_id);

CREATE TABLE IF NOT EXISTS ContactEmailAddresses (
    id         TEXT PRIMARY KEY,
    contact_id TEXT NOT NULL REFERENCES Contacts(id) ON DELETE CASCADE,
    email      TEXT NOT NULL,
    kind       TEXT NOT NULL DEFAULT 'personal',  -- 'personal' | 'work' | 'other'
    is_primary INTEGER NOT NULL DEFAULT 0,
    tags       TEXT NOT NULL DEFAULT '[]',
    is_system  INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contact_emails_contact_idx
    ON ContactEmailAddresses(contact_id);

CREATE TABLE IF NOT EXISTS ContactPhoneNumbers (
    id         TEXT PRIMARY KEY,
    contact_id TEXT NOT NULL REFERENCES Contacts(id) ON DELETE CASCADE,
    number     TEXT NOT NULL,
    kind       TEXT NOT NULL DEFAULT 'mobile',  -- 'mobile' | 'home' | 'work' | 'other'
    is_primary INTEGER NOT NULL DEFAULT 0,
    tags       TEXT NOT NULL DEFAULT '[]',
    is_system  INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contact_phones_contact_idx
    ON ContactPhoneNumbers(contact_id);

CREATE TABLE IF NOT EXISTS ContactAddresses (
    id          TEXT PRIMARY KEY,
    contact_id  TEXT NOT NULL REFERENCES Contacts(id) ON DELETE CASCADE,
    street      TEXT NOT NULL,
    city        TEXT NOT NULL,
    state       TEXT NOT NULL,
    postal_code TEXT NOT NULL,
    country     TEXT NOT NULL,
    kind        TEXT NOT NULL DEFAULT 'home',  -- 'home' | 'work' | 'other'
    is_primary  INTEGER NOT NULL DEFAULT 0,
    tags        TEXT NOT NULL DEFAULT '[]',
    is_system   INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contact_addresses_contact_idx
    ON ContactAddresses(contact_id);

PRAGMA user_version = 1;
";
