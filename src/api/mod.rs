//! HTTP surface of the service
//!
//! All JSON routes live under `/api`; uploaded avatars are served as static
//! files under `/uploads`. Routes that need a caller take the [`AuthUser`]
//! extractor, which validates the bearer token.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{
    auth::TokenIssuer,
    config::AppConfig,
    error::Result,
    nba::NbaClient,
    storage::AppDatabase,
    uploads::{AvatarStore, MAX_AVATAR_BYTES, PUBLIC_PREFIX},
};

pub mod error;
pub mod extract;
mod nba;
mod session;
mod teams;
mod users;


pub use error::ApiError;
pub use extract::AuthUser;

/// Request bodies may carry one avatar plus a few text fields.
const MAX_BODY_BYTES: usize = MAX_AVATAR_BYTES + 1024 * 1024;

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub nba: Arc<NbaClient>,
    pub db: Arc<Mutex<AppDatabase>>,
    pub tokens: Arc<TokenIssuer>,
    pub avatars: Arc<AvatarStore>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(
        nba: NbaClient,
        db: AppDatabase,
        tokens: TokenIssuer,
        avatars: AvatarStore,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            nba: Arc::new(nba),
            db: Arc::new(Mutex::new(db)),
            tokens: Arc::new(tokens),
            avatars: Arc::new(avatars),
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            NbaClient::new(&config.nba)?,
            AppDatabase::open(&config.database_path)?,
            TokenIssuer::from_config(&config.auth),
            AvatarStore::new(&config.upload_dir),
            config.auth.bcrypt_cost,
        ))
    }

    /// Lock the database. The guard must be dropped before any `.await`.
    pub(crate) fn db(&self) -> MutexGuard<'_, AppDatabase> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn router(state: AppState) -> Router {
    let upload_dir = state.avatars.upload_dir().to_path_buf();

    let api = Router::new()
        .route("/users", post(users::create_user))
        .route("/users/me", get(users::get_current_user))
        .route("/users/me/avatar", put(users::update_avatar))
        .route("/users/me/team", put(users::update_team))
        .route(
            "/session",
            post(session::create_session).delete(session::delete_session),
        )
        .route("/teams", get(teams::list_teams))
        .route("/nba/teams", get(nba::list_teams))
        .route("/nba/players", get(nba::list_players))
        .route("/nba/players/{id}/stats", get(nba::player_stats));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .nest_service(PUBLIC_PREFIX, ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "BuzzerBeater API is running" }))
}

/// Bind, serve until Ctrl-C, then drain in-flight requests.
pub async fn serve(config: AppConfig) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, database = %config.database_path.display(), "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
