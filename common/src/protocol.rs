//! Shared HTTP protocol types for communication between the API and its
//! clients (worker, scripts).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Health-check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

/// JSON body returned with every non-2xx API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// ─── Organizations ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgCreate {
    pub name: String,
}

/// A tenant.  Names are unique across the installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

// ─── Environments ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvCreate {
    pub org_id: String,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
}

/// A site (building, floor, store…) that groups cameras within an org.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub org_id: String,
    pub name: String,
    pub region: Option<String>,
}

// ─── Cameras ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraCreate {
    pub env_id: String,
    pub name: String,
    pub rtsp_url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: String,
    pub env_id: String,
    pub name: String,
    pub rtsp_url: String,
    pub enabled: bool,
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// Access level of a console user within their org.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    #[default]
    Admin,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A console user.  The password hash never leaves the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub org_id: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: String,
}

// ─── Bootstrap ───────────────────────────────────────────────────────────────

/// Create an org together with its first (owner) user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapRequest {
    pub org_name: String,
    pub owner_email: String,
    pub owner_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapResponse {
    pub org_id: String,
    pub owner_user_id: String,
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A bearer token for the `Authorization` header plus the caller's scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub org_id: String,
    pub role: Role,
}

// ─── Anomaly events ──────────────────────────────────────────────────────────

/// A clip flagged by the detector, with both model verdicts and the
/// combined decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyEvent {
    pub id: String,
    pub org_id: String,
    pub camera_id: String,
    pub created_at: String,
    pub blob_url: Option<String>,
    pub llm1_flag: bool,
    pub llm1_reason: String,
    pub llm1_score: String,
    pub llm2_flag: bool,
    pub llm2_reason: String,
    pub llm2_score: String,
    pub final_flag: bool,
    pub final_reason: String,
}

/// An operator's verdict on an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelRequest {
    pub is_anomaly: bool,
    #[serde(default)]
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanLabel {
    pub id: String,
    pub event_id: String,
    /// User id of the labeller.
    pub labeled_by: String,
    pub is_anomaly: bool,
    pub justification: String,
    pub labeled_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"owner\"");
        let role: Role = serde_json::from_str("\"viewer\"").unwrap();
        assert_eq!(role, Role::Viewer);
        assert_eq!(Role::default(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_camera_create_defaults_to_enabled() {
        let req: CameraCreate = serde_json::from_str(
            r#"{"env_id":"e1","name":"Lobby","rtsp_url":"rtsp://10.0.0.5/stream"}"#,
        )
        .unwrap();
        assert!(req.enabled);
    }

    #[test]
    fn test_env_create_region_optional() {
        let req: EnvCreate = serde_json::from_str(r#"{"org_id":"o1","name":"HQ"}"#).unwrap();
        assert_eq!(req.region, None);
    }

    #[test]
    fn test_label_justification_optional() {
        let req: LabelRequest = serde_json::from_str(r#"{"is_anomaly":false}"#).unwrap();
        assert!(!req.is_anomaly);
        assert_eq!(req.justification, "");
    }
}
