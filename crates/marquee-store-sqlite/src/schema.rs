//! SQL schema for the Marquee SQLite store.
//!
//! Mirrors the subset of the platform database the activity views read.
//! Executed once at connection startup.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS countries (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cities (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    country_id  INTEGER REFERENCES countries(id)
);

CREATE TABLE IF NOT EXISTS events (
    id                    INTEGER PRIMARY KEY,
    eid                   TEXT NOT NULL UNIQUE,   -- e.g. 'AB3041'
    name                  TEXT,
    venue                 TEXT,
    event_start_datetime  TEXT,                   -- RFC 3339
    city_id               INTEGER REFERENCES cities(id)
);

-- Relationship tables reference events by code, not by foreign key:
-- rows may point at events that were never imported.
CREATE TABLE IF NOT EXISTS artist_applications (
    id                   INTEGER PRIMARY KEY,
    artist_number        TEXT NOT NULL,
    event_eid            TEXT,
    applied_at           TEXT,
    entry_date           TEXT,
    message_to_producer  TEXT
);

CREATE TABLE IF NOT EXISTS artist_invitations (
    id                     INTEGER PRIMARY KEY,
    artist_number          TEXT NOT NULL,
    event_eid              TEXT,
    entry_date             TEXT,
    created_at             TEXT,
    message_from_producer  TEXT
);

CREATE TABLE IF NOT EXISTS artist_confirmations (
    id                     INTEGER PRIMARY KEY,
    artist_number          TEXT NOT NULL,
    event_eid              TEXT,
    created_at             TEXT,
    entry_date             TEXT,
    message_to_organizers  TEXT
);

CREATE INDEX IF NOT EXISTS applications_artist_idx  ON artist_applications(artist_number);
CREATE INDEX IF NOT EXISTS invitations_artist_idx   ON artist_invitations(artist_number);
CREATE INDEX IF NOT EXISTS confirmations_artist_idx ON artist_confirmations(artist_number);

PRAGMA user_version = 1;
";
