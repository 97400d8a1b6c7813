//! HTTP server exposing the tenant resources.
//!
//! Routes:
//!   GET  /health                → health check
//!   POST /bootstrap             → create org + owner user
//!   POST /orgs, GET /orgs       → organizations
//!   POST /envs, GET /envs       → environments (`?org_id=`)
//!   POST /cameras, GET /cameras → cameras (`?env_id=`)
//!   GET  /users                 → users (`?org_id=`)
//!   POST /login                 → bearer token
//!   GET  /events                → anomaly events (`?org_id=`, bearer)
//!   POST /events/{id}/label     → human verdict (bearer)

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use rusqlite::Connection;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use thirdeye_common::protocol::{
    AnomalyEvent, BootstrapRequest, BootstrapResponse, Camera, CameraCreate, EnvCreate,
    Environment, HealthResponse, HumanLabel, LabelRequest, LoginRequest, LoginResponse, OrgCreate,
    Organization, User,
};

use crate::auth::{Claims, TokenSigner};
use crate::db;
use crate::error::{required, ApiError};

/// Shared state for route handlers.
#[derive(Clone)]
pub struct AppState {
    db_path: PathBuf,
    start_time: Instant,
    tokens: Arc<TokenSigner>,
}

impl AppState {
    pub fn new(db_path: PathBuf, tokens: TokenSigner) -> Self {
        Self {
            db_path,
            start_time: Instant::now(),
            tokens: Arc::new(tokens),
        }
    }

    pub fn tokens(&self) -> &TokenSigner {
        &self.tokens
    }

    /// Run `f` against a fresh connection on the blocking pool.
    async fn with_db<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, ApiError> + Send + 'static,
    {
        let path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db::open(&path)?;
            f(&conn)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("database task failed: {e}")))?
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/bootstrap", post(bootstrap))
        .route("/orgs", get(list_orgs).post(create_org))
        .route("/envs", get(list_envs).post(create_env))
        .route("/cameras", get(list_cameras).post(create_camera))
        .route("/users", get(list_users))
        .route("/login", post(login))
        .route("/events", get(list_events))
        .route("/events/{id}/label", post(label_event))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server. Blocks until shutdown.
pub async fn run(
    state: AppState,
    listen_addr: &str,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(listen_addr).await?;
    info!("API server listening on {listen_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                if shutdown.load(Ordering::Relaxed) {
                    break;
                }
            }
        })
        .await?;

    Ok(())
}

// ── query strings ────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OrgQuery {
    org_id: String,
}

#[derive(Deserialize)]
struct EnvQuery {
    env_id: String,
}

// ── route handlers ───────────────────────────────────────────────────────

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

async fn bootstrap(
    State(state): State<AppState>,
    Json(req): Json<BootstrapRequest>,
) -> Result<Json<BootstrapResponse>, ApiError> {
    let org_name = required("org_name", &req.org_name)?;
    let email = required("owner_email", &req.owner_email)?;
    if req.owner_password.is_empty() {
        return Err(ApiError::BadRequest("owner_password must not be empty".into()));
    }
    let password = req.owner_password;

    state
        .with_db(move |conn| db::bootstrap(conn, &org_name, &email, &password))
        .await
        .map(Json)
}

async fn create_org(
    State(state): State<AppState>,
    Json(req): Json<OrgCreate>,
) -> Result<Json<Organization>, ApiError> {
    let name = required("name", &req.name)?;
    let org = state.with_db(move |conn| db::create_org(conn, &name)).await?;
    info!("Created org {} ({})", org.name, org.id);
    Ok(Json(org))
}

async fn list_orgs(State(state): State<AppState>) -> Result<Json<Vec<Organization>>, ApiError> {
    state.with_db(db::list_orgs).await.map(Json)
}

async fn create_env(
    State(state): State<AppState>,
    Json(mut req): Json<EnvCreate>,
) -> Result<Json<Environment>, ApiError> {
    req.name = required("name", &req.name)?;
    state
        .with_db(move |conn| db::create_env(conn, &req))
        .await
        .map(Json)
}

async fn list_envs(
    State(state): State<AppState>,
    Query(q): Query<OrgQuery>,
) -> Result<Json<Vec<Environment>>, ApiError> {
    state
        .with_db(move |conn| db::list_envs(conn, &q.org_id))
        .await
        .map(Json)
}

async fn create_camera(
    State(state): State<AppState>,
    Json(mut req): Json<CameraCreate>,
) -> Result<Json<Camera>, ApiError> {
    req.name = required("name", &req.name)?;
    req.rtsp_url = required("rtsp_url", &req.rtsp_url)?;
    let cam = state
        .with_db(move |conn| db::create_camera(conn, &req))
        .await?;
    info!("Created camera {} in env {}", cam.name, cam.env_id);
    Ok(Json(cam))
}

async fn list_cameras(
    State(state): State<AppState>,
    Query(q): Query<EnvQuery>,
) -> Result<Json<Vec<Camera>>, ApiError> {
    state
        .with_db(move |conn| db::list_cameras(conn, &q.env_id))
        .await
        .map(Json)
}

async fn list_users(
    State(state): State<AppState>,
    Query(q): Query<OrgQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    state
        .with_db(move |conn| db::list_users(conn, &q.org_id))
        .await
        .map(Json)
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = req.email.trim().to_string();
    let password = req.password;
    let user = state
        .with_db(move |conn| db::authenticate(conn, &email, &password))
        .await?;

    let token = state.tokens.sign(&user.id, &user.org_id, user.role)?;
    info!("User {} logged in", user.email);
    Ok(Json(LoginResponse {
        token,
        org_id: user.org_id,
        role: user.role,
    }))
}

async fn list_events(
    State(state): State<AppState>,
    claims: Claims,
    Query(q): Query<OrgQuery>,
) -> Result<Json<Vec<AnomalyEvent>>, ApiError> {
    if claims.org != q.org_id {
        return Err(ApiError::Forbidden("wrong org"));
    }
    state
        .with_db(move |conn| db::list_events(conn, &q.org_id))
        .await
        .map(Json)
}

async fn label_event(
    State(state): State<AppState>,
    claims: Claims,
    Path(event_id): Path<String>,
    Json(req): Json<LabelRequest>,
) -> Result<Json<HumanLabel>, ApiError> {
    let label = state
        .with_db(move |conn| db::label_event(conn, &claims.org, &claims.sub, &event_id, &req))
        .await?;
    info!(
        "Event {} labelled {} by {}",
        label.event_id,
        if label.is_anomaly { "anomaly" } else { "normal" },
        label.labeled_by
    );
    Ok(Json(label))
}

// ── tests ────────────────────────────────────────────────────────────────
