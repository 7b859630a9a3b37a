//! SQL schema for the Meydan SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.
//!
//! Resources are stored one row per document. Embedded lists (participants,
//! comments, reactions, tags, earned badges) live in JSON array columns and
//! are only ever rewritten by a single statement or a single transaction.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id          TEXT PRIMARY KEY,
    name             TEXT NOT NULL,
    email            TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash    TEXT NOT NULL,   -- argon2 PHC string
    user_type        TEXT NOT NULL,   -- 'individual' | 'community' | 'company' | 'organization'
    profile_image_id TEXT,
    badges           TEXT NOT NULL DEFAULT '[]',
    point            INTEGER NOT NULL DEFAULT 0,
    profile_details  TEXT NOT NULL DEFAULT '{}',
    created_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS events (
    event_id     TEXT PRIMARY KEY,
    title        TEXT NOT NULL,
    description  TEXT NOT NULL,
    organizer_id TEXT NOT NULL,   -- owner; never updated
    date         TEXT NOT NULL,
    location     TEXT NOT NULL,
    badge_id     TEXT,
    qr_code      TEXT,
    url          TEXT,
    image_id     TEXT,
    participants TEXT NOT NULL DEFAULT '[]',
    approved     INTEGER NOT NULL DEFAULT 0,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS announcements (
    announcement_id TEXT PRIMARY KEY,
    title           TEXT NOT NULL,
    content         TEXT NOT NULL,
    image_id        TEXT NOT NULL,
    organization_id TEXT NOT NULL,   -- owner; never updated
    approved        INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS badges (
    badge_id    TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    icon_id     TEXT,
    point       INTEGER NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS forum_posts (
    post_id    TEXT PRIMARY KEY,
    title      TEXT NOT NULL,
    content    TEXT NOT NULL,
    author_id  TEXT NOT NULL,   -- owner; never updated
    comments   TEXT NOT NULL DEFAULT '[]',
    likes      TEXT NOT NULL DEFAULT '[]',
    dislikes   TEXT NOT NULL DEFAULT '[]',
    tags       TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS uploads (
    file_id    TEXT PRIMARY KEY,
    owner_id   TEXT NOT NULL,
    file_path  TEXT NOT NULL,
    file_type  TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS complaints (
    complaint_id TEXT PRIMARY KEY,
    content_id   TEXT NOT NULL,
    content_type TEXT NOT NULL,   -- 'event' | 'announcement' | 'forum_post'
    reported_by  TEXT NOT NULL,
    note         TEXT NOT NULL,
    status       TEXT NOT NULL DEFAULT 'pending',
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS translations (
    translation_id TEXT PRIMARY KEY,
    lang           TEXT NOT NULL,
    key            TEXT NOT NULL,
    value          TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS events_organizer_idx       ON events(organizer_id);
CREATE INDEX IF NOT EXISTS announcements_org_idx      ON announcements(organization_id);
CREATE INDEX IF NOT EXISTS forum_posts_created_idx    ON forum_posts(created_at);
CREATE INDEX IF NOT EXISTS uploads_owner_idx          ON uploads(owner_id);
CREATE INDEX IF NOT EXISTS translations_lang_idx      ON translations(lang);

PRAGMA user_version = 1;
";
