//! SQLite schema shared by the API (read-write) and the console (read-only).
//!
//! Kept as plain SQL so the console can apply it without linking the API.

/// Idempotent DDL for all tables and indices.
pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS organizations (
        id         TEXT PRIMARY KEY,
        name       TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS users (
        id            TEXT PRIMARY KEY,
        org_id        TEXT NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
        email         TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        role          TEXT NOT NULL DEFAULT 'admin',
        is_active     INTEGER NOT NULL DEFAULT 1,
        created_at    TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS environments (
        id         TEXT PRIMARY KEY,
        org_id     TEXT NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
        name       TEXT NOT NULL,
        region     TEXT,
        created_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS cameras (
        id         TEXT PRIMARY KEY,
        env_id     TEXT NOT NULL REFERENCES environments(id) ON DELETE CASCADE,
        name       TEXT NOT NULL,
        rtsp_url   TEXT NOT NULL,
        enabled    INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS anomaly_events (
        id          TEXT PRIMARY KEY,
        org_id      TEXT NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
        camera_id   TEXT NOT NULL REFERENCES cameras(id) ON DELETE CASCADE,
        created_at  TEXT NOT NULL,
        blob_url    TEXT,
        llm1_flag   INTEGER NOT NULL DEFAULT 0,
        llm1_reason TEXT NOT NULL DEFAULT '',
        llm1_score  TEXT NOT NULL DEFAULT '',
        llm2_flag   INTEGER NOT NULL DEFAULT 0,
        llm2_reason TEXT NOT NULL DEFAULT '',
        llm2_score  TEXT NOT NULL DEFAULT '',
        final_flag  INTEGER NOT NULL DEFAULT 0,
        final_reason TEXT NOT NULL DEFAULT ''
    );
    CREATE TABLE IF NOT EXISTS human_labels (
        id            TEXT PRIMARY KEY,
        event_id      TEXT NOT NULL REFERENCES anomaly_events(id) ON DELETE CASCADE,
        labeled_by    TEXT NOT NULL,
        is_anomaly    INTEGER NOT NULL,
        justification TEXT NOT NULL DEFAULT '',
        labeled_at    TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS users_org_id        ON users (org_id);
    CREATE INDEX IF NOT EXISTS users_email         ON users (email);
    CREATE INDEX IF NOT EXISTS environments_org_id ON environments (org_id);
    CREATE INDEX IF NOT EXISTS cameras_env_id      ON cameras (env_id);
    CREATE INDEX IF NOT EXISTS events_org_created  ON anomaly_events (org_id, created_at);
    CREATE INDEX IF NOT EXISTS labels_event_id     ON human_labels (event_id);
";

/// Tables created by [`SCHEMA`], in dependency order.
pub const TABLES: &[&str] = &[
    "organizations",
    "users",
    "environments",
    "cameras",
    "anomaly_events",
    "human_labels",
];
