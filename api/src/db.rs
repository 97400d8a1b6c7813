//! SQLite storage for organizations, users, environments, cameras and
//! anomaly events.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use thirdeye_common::protocol::{
    AnomalyEvent, BootstrapResponse, Camera, CameraCreate, EnvCreate, Environment, HumanLabel,
    LabelRequest, Organization, Role, User,
};
use thirdeye_common::schema::SCHEMA;

use crate::error::ApiError;

/// Most recent events returned per listing.
pub const EVENT_PAGE: usize = 200;

/// Create the database file and all tables if they don't exist.
pub fn initialize(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Cannot open database: {}", db_path.display()))?;

    // WAL persists in the file, so later read-only connections (the
    // console) inherit it without writing.
    conn.execute_batch("PRAGMA journal_mode=WAL;")
        .context("Failed to enable WAL")?;
    conn.execute_batch(SCHEMA).context("Failed to create tables")?;

    info!("Database schema verified");
    Ok(())
}

/// Open a read-write connection with foreign keys enforced.
pub fn open(db_path: &Path) -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA busy_timeout=3000; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Hex-encoded SHA-256 of the password.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

// ─── Organizations ───────────────────────────────────────────────────────────

pub fn create_org(conn: &Connection, name: &str) -> Result<Organization, ApiError> {
    if org_by_name(conn, name)?.is_some() {
        return Err(ApiError::Conflict(format!("organization '{name}' already exists")));
    }

    let org = Organization {
        id: new_id(),
        name: name.to_string(),
        created_at: now(),
    };
    conn.execute(
        "INSERT INTO organizations (id, name, created_at) VALUES (?1, ?2, ?3)",
        params![org.id, org.name, org.created_at],
    )?;
    Ok(org)
}

pub fn list_orgs(conn: &Connection) -> Result<Vec<Organization>, ApiError> {
    let mut stmt =
        conn.prepare("SELECT id, name, created_at FROM organizations ORDER BY created_at, name")?;
    let rows = stmt.query_map([], |row| {
        Ok(Organization {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<Result<_, _>>()?)
}

pub fn get_org(conn: &Connection, id: &str) -> Result<Option<Organization>, ApiError> {
    let org = conn
        .query_row(
            "SELECT id, name, created_at FROM organizations WHERE id = ?1",
            params![id],
            |row| {
                Ok(Organization {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(org)
}

fn org_by_name(conn: &Connection, name: &str) -> Result<Option<String>, ApiError> {
    let id = conn
        .query_row(
            "SELECT id FROM organizations WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

// ─── Environments ────────────────────────────────────────────────────────────

pub fn create_env(conn: &Connection, req: &EnvCreate) -> Result<Environment, ApiError> {
    if get_org(conn, &req.org_id)?.is_none() {
        return Err(ApiError::NotFound("org"));
    }

    let env = Environment {
        id: new_id(),
        org_id: req.org_id.clone(),
        name: req.name.clone(),
        region: req
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from),
    };
    conn.execute(
        "INSERT INTO environments (id, org_id, name, region, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![env.id, env.org_id, env.name, env.region, now()],
    )?;
    Ok(env)
}

pub fn list_envs(conn: &Connection, org_id: &str) -> Result<Vec<Environment>, ApiError> {
    let mut stmt = conn.prepare(
        "SELECT id, org_id, name, region FROM environments WHERE org_id = ?1 ORDER BY name",
    )?;
    let rows = stmt.query_map(params![org_id], |row| {
        Ok(Environment {
            id: row.get(0)?,
            org_id: row.get(1)?,
            name: row.get(2)?,
            region: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<Result<_, _>>()?)
}

fn env_exists(conn: &Connection, id: &str) -> Result<bool, ApiError> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM environments WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(found.is_some())
}

// ─── Cameras ─────────────────────────────────────────────────────────────────

pub fn create_camera(conn: &Connection, req: &CameraCreate) -> Result<Camera, ApiError> {
    if !env_exists(conn, &req.env_id)? {
        return Err(ApiError::NotFound("env"));
    }

    let cam = Camera {
        id: new_id(),
        env_id: req.env_id.clone(),
        name: req.name.clone(),
        rtsp_url: req.rtsp_url.clone(),
        enabled: req.enabled,
    };
    conn.execute(
        "INSERT INTO cameras (id, env_id, name, rtsp_url, enabled, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![cam.id, cam.env_id, cam.name, cam.rtsp_url, cam.enabled, now()],
    )?;
    Ok(cam)
}

pub fn list_cameras(conn: &Connection, env_id: &str) -> Result<Vec<Camera>, ApiError> {
    let mut stmt = conn.prepare(
        "SELECT id, env_id, name, rtsp_url, enabled FROM cameras WHERE env_id = ?1 ORDER BY name",
    )?;
    let rows = stmt.query_map(params![env_id], |row| {
        Ok(Camera {
            id: row.get(0)?,
            env_id: row.get(1)?,
            name: row.get(2)?,
            rtsp_url: row.get(3)?,
            enabled: row.get(4)?,
        })
    })?;
    Ok(rows.collect::<Result<_, _>>()?)
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// Create an org and its owner in a single transaction.
pub fn bootstrap(
    conn: &Connection,
    org_name: &str,
    owner_email: &str,
    owner_password: &str,
) -> Result<BootstrapResponse, ApiError> {
    let tx = conn.unchecked_transaction()?;

    let org = create_org(&tx, org_name)?;
    let user_id = new_id();
    tx.execute(
        "INSERT INTO users (id, org_id, email, password_hash, role, is_active, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
        params![
            user_id,
            org.id,
            owner_email,
            hash_password(owner_password),
            Role::Owner.as_str(),
            now()
        ],
    )?;
    tx.commit()?;

    info!("Bootstrapped org '{}' with owner {}", org.name, owner_email);
    Ok(BootstrapResponse {
        org_id: org.id,
        owner_user_id: user_id,
    })
}

pub fn list_users(conn: &Connection, org_id: &str) -> Result<Vec<User>, ApiError> {
    let mut stmt = conn.prepare(
        "SELECT id, org_id, email, role, is_active, created_at FROM users \
         WHERE org_id = ?1 ORDER BY created_at, email",
    )?;
    let rows = stmt.query_map(params![org_id], |row| {
        let role: String = row.get(3)?;
        Ok(User {
            id: row.get(0)?,
            org_id: row.get(1)?,
            email: row.get(2)?,
            role: role.parse().unwrap_or_default(),
            is_active: row.get(4)?,
            created_at: row.get(5)?,
        })
    })?;
    Ok(rows.collect::<Result<_, _>>()?)
}

/// Check an email/password pair.  Unknown email, wrong password and a
/// disabled account are indistinguishable to the caller.
pub fn authenticate(conn: &Connection, email: &str, password: &str) -> Result<User, ApiError> {
    let found = conn
        .query_row(
            "SELECT id, org_id, email, role, is_active, created_at, password_hash FROM users \
             WHERE email = ?1 ORDER BY created_at LIMIT 1",
            params![email],
            |row| {
                let role: String = row.get(3)?;
                let hash: String = row.get(6)?;
                let user = User {
                    id: row.get(0)?,
                    org_id: row.get(1)?,
                    email: row.get(2)?,
                    role: role.parse().unwrap_or_default(),
                    is_active: row.get(4)?,
                    created_at: row.get(5)?,
                };
                Ok((user, hash))
            },
        )
        .optional()?;

    match found {
        Some((user, hash)) if user.is_active && hash == hash_password(password) => Ok(user),
        _ => Err(ApiError::Unauthorized("bad credentials")),
    }
}

// ─── Anomaly events ──────────────────────────────────────────────────────────

/// Newest first, at most [`EVENT_PAGE`] rows.
pub fn list_events(conn: &Connection, org_id: &str) -> Result<Vec<AnomalyEvent>, ApiError> {
    let mut stmt = conn.prepare(
        "SELECT id, org_id, camera_id, created_at, blob_url, \
                llm1_flag, llm1_reason, llm1_score, \
                llm2_flag, llm2_reason, llm2_score, \
                final_flag, final_reason \
         FROM anomaly_events WHERE org_id = ?1 \
         ORDER BY created_at DESC LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![org_id, EVENT_PAGE as i64], |row| {
        Ok(AnomalyEvent {
            id: row.get(0)?,
            org_id: row.get(1)?,
            camera_id: row.get(2)?,
            created_at: row.get(3)?,
            blob_url: row.get(4)?,
            llm1_flag: row.get(5)?,
            llm1_reason: row.get(6)?,
            llm1_score: row.get(7)?,
            llm2_flag: row.get(8)?,
            llm2_reason: row.get(9)?,
            llm2_score: row.get(10)?,
            final_flag: row.get(11)?,
            final_reason: row.get(12)?,
        })
    })?;
    Ok(rows.collect::<Result<_, _>>()?)
}

/// Record a human verdict.  Events of other orgs are reported as missing.
pub fn label_event(
    conn: &Connection,
    org_id: &str,
    user_id: &str,
    event_id: &str,
    req: &LabelRequest,
) -> Result<HumanLabel, ApiError> {
    let owner: Option<String> = conn
        .query_row(
            "SELECT org_id FROM anomaly_events WHERE id = ?1",
            params![event_id],
            |row| row.get(0),
        )
        .optional()?;
    if owner.as_deref() != Some(org_id) {
        return Err(ApiError::NotFound("event"));
    }

    let label = HumanLabel {
        id: new_id(),
        event_id: event_id.to_string(),
        labeled_by: user_id.to_string(),
        is_anomaly: req.is_anomaly,
        justification: req.justification.trim().to_string(),
        labeled_at: now(),
    };
    conn.execute(
        "INSERT INTO human_labels (id, event_id, labeled_by, is_anomaly, justification, labeled_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            label.id,
            label.event_id,
            label.labeled_by,
            label.is_anomaly,
            label.justification,
            label.labeled_at
        ],
    )?;
    Ok(label)
}

// ─── tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    use thirdeye_common::schema::TABLES;

    /// Fresh database file under the system temp dir.
    pub(crate) fn temp_db(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("thirdeye_api_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}-{}.db", Uuid::new_v4()));
        initialize(&path).unwrap();
        path
    }

    /// Org → env → camera chain with one flagged event at `created_at`.
    pub(crate) fn seed_event(conn: &Connection, org_id: &str, created_at: &str) -> String {
        let env = create_env(
            conn,
            &EnvCreate {
                org_id: org_id.to_string(),
                name: format!("env-{created_at}"),
                region: None,
            },
        )
        .unwrap();
        let cam = create_camera(
            conn,
            &CameraCreate {
                env_id: env.id,
                name: "Dock".into(),
                rtsp_url: "rtsp://10.0.0.7/live".into(),
                enabled: true,
            },
        )
        .unwrap();
        let id = new_id();
        conn.execute(
            "INSERT INTO anomaly_events (id, org_id, camera_id, created_at, final_flag, final_reason) \
             VALUES (?1, ?2, ?3, ?4, 1, 'person loitering')",
            params![id, org_id, cam.id, created_at],
        )
        .unwrap();
        id
    }

    #[test]
    fn test_initialize_creates_tables() {
        let path = temp_db("init");
        // Running twice must be harmless.
        initialize(&path).unwrap();
        let conn = open(&path).unwrap();
        for table in TABLES {
            let n: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    params![table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(n, 1, "missing table {table}");
        }
    }

    #[test]
    fn test_org_env_camera_chain() {
        let conn = open(&temp_db("chain")).unwrap();

        let org = create_org(&conn, "Acme").unwrap();
        assert_eq!(list_orgs(&conn).unwrap(), vec![org.clone()]);

        let env = create_env(
            &conn,
            &EnvCreate {
                org_id: org.id.clone(),
                name: "Warehouse".into(),
                region: Some("  ".into()),
            },
        )
        .unwrap();
        assert_eq!(env.region, None);
        assert_eq!(list_envs(&conn, &org.id).unwrap(), vec![env.clone()]);

        let cam = create_camera(
            &conn,
            &CameraCreate {
                env_id: env.id.clone(),
                name: "Dock door".into(),
                rtsp_url: "rtsp://10.0.0.7/live".into(),
                enabled: false,
            },
        )
        .unwrap();
        let cams = list_cameras(&conn, &env.id).unwrap();
        assert_eq!(cams, vec![cam]);
        assert!(!cams[0].enabled);
    }

    #[test]
    fn test_duplicate_org_conflicts() {
        let conn = open(&temp_db("dup")).unwrap();
        create_org(&conn, "Acme").unwrap();
        assert!(matches!(create_org(&conn, "Acme"), Err(ApiError::Conflict(_))));
    }

    #[test]
    fn test_missing_parents() {
        let conn = open(&temp_db("parents")).unwrap();
        let env = create_env(
            &conn,
            &EnvCreate {
                org_id: "nope".into(),
                name: "HQ".into(),
                region: None,
            },
        );
        assert!(matches!(env, Err(ApiError::NotFound("org"))));

        let cam = create_camera(
            &conn,
            &CameraCreate {
                env_id: "nope".into(),
                name: "Lobby".into(),
                rtsp_url: "rtsp://x".into(),
                enabled: true,
            },
        );
        assert!(matches!(cam, Err(ApiError::NotFound("env"))));
    }

    #[test]
    fn test_bootstrap_creates_owner() {
        let conn = open(&temp_db("bootstrap")).unwrap();
        let resp = bootstrap(&conn, "Acme", "owner@acme.test", "s3cret").unwrap();

        let users = list_users(&conn, &resp.org_id).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, resp.owner_user_id);
        assert_eq!(users[0].role, Role::Owner);
        assert!(users[0].is_active);

        let hash: String = conn
            .query_row(
                "SELECT password_hash FROM users WHERE id = ?1",
                params![resp.owner_user_id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(hash, hash_password("s3cret"));
        assert_ne!(hash, "s3cret");
    }

    #[test]
    fn test_bootstrap_duplicate_org_leaves_no_user() {
        let conn = open(&temp_db("bootstrap_dup")).unwrap();
        let first = bootstrap(&conn, "Acme", "a@acme.test", "pw").unwrap();
        assert!(matches!(
            bootstrap(&conn, "Acme", "b@acme.test", "pw"),
            Err(ApiError::Conflict(_))
        ));
        assert_eq!(list_users(&conn, &first.org_id).unwrap().len(), 1);
    }

    #[test]
    fn test_hash_password_is_sha256_hex() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_authenticate() {
        let conn = open(&temp_db("auth")).unwrap();
        let resp = bootstrap(&conn, "Acme", "owner@acme.test", "s3cret").unwrap();

        let user = authenticate(&conn, "owner@acme.test", "s3cret").unwrap();
        assert_eq!(user.id, resp.owner_user_id);
        assert_eq!(user.role, Role::Owner);

        for (email, pw) in [("owner@acme.test", "wrong"), ("nobody@acme.test", "s3cret")] {
            assert!(matches!(
                authenticate(&conn, email, pw),
                Err(ApiError::Unauthorized("bad credentials"))
            ));
        }

        conn.execute("UPDATE users SET is_active = 0", []).unwrap();
        assert!(authenticate(&conn, "owner@acme.test", "s3cret").is_err());
    }

    #[test]
    fn test_events_newest_first_per_org() {
        let conn = open(&temp_db("events")).unwrap();
        let acme = create_org(&conn, "Acme").unwrap();
        let other = create_org(&conn, "Other").unwrap();
        let old = seed_event(&conn, &acme.id, "2026-01-01T00:00:00Z");
        let new = seed_event(&conn, &acme.id, "2026-02-01T00:00:00Z");
        seed_event(&conn, &other.id, "2026-03-01T00:00:00Z");

        let events = list_events(&conn, &acme.id).unwrap();
        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![new.as_str(), old.as_str()]);
        assert!(events[0].final_flag);
        assert_eq!(events[0].final_reason, "person loitering");
        assert_eq!(events[0].blob_url, None);
    }

    #[test]
    fn test_label_event_scoped_to_org() {
        let conn = open(&temp_db("labels")).unwrap();
        let acme = create_org(&conn, "Acme").unwrap();
        let other = create_org(&conn, "Other").unwrap();
        let event = seed_event(&conn, &acme.id, "2026-01-01T00:00:00Z");
        let req = LabelRequest {
            is_anomaly: false,
            justification: " delivery driver ".into(),
        };

        let label = label_event(&conn, &acme.id, "u1", &event, &req).unwrap();
        assert_eq!(label.event_id, event);
        assert_eq!(label.labeled_by, "u1");
        assert_eq!(label.justification, "delivery driver");

        assert!(matches!(
            label_event(&conn, &other.id, "u2", &event, &req),
            Err(ApiError::NotFound("event"))
        ));
        assert!(matches!(
            label_event(&conn, &acme.id, "u1", "missing", &req),
            Err(ApiError::NotFound("event"))
        ));
    }
}
