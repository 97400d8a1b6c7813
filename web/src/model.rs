//! Shared data-transfer objects used by both server and client.

use serde::{Deserialize, Serialize};

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Installation-wide totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub organizations: u64,
    pub environments: u64,
    pub cameras: u64,
    pub enabled_cameras: u64,
    pub users: u64,
}

// ─── Environments ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentRow {
    pub id: String,
    pub org_name: String,
    pub name: String,
    pub region: Option<String>,
    pub camera_count: u64,
}

// ─── Cameras ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRow {
    pub id: String,
    pub org_name: String,
    pub env_name: String,
    pub name: String,
    pub rtsp_url: String,
    pub enabled: bool,
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// A console user as listed on the users page (no credentials).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub org_name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
}

// ─── Settings ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsInfo {
    pub version: String,
    pub db_path: String,
}
