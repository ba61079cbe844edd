//! Registration and profile routes

use axum::{
    extract::{multipart::Field, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{error::ApiError, extract::AuthUser, AppState};
use crate::{
    auth::{hash_password, password::MIN_PASSWORD_LEN},
    cli::types::{TeamId, UserId},
    error::BuzzerError,
    storage::{LocalTeam, NewUser, User},
    uploads::AvatarUpload,
};

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    pub team_id: TeamId,
}

/// Fields of the registration form; everything is optional until validated.
#[derive(Debug, Default)]
struct RegistrationForm {
    nickname: Option<String>,
    password: Option<String>,
    team_id: Option<String>,
    avatar: Option<AvatarUpload>,
}

async fn read_avatar(field: Field<'_>) -> Result<AvatarUpload, ApiError> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let data = field.bytes().await?;
    Ok(AvatarUpload {
        file_name,
        content_type,
        data,
    })
}

impl RegistrationForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "nickname" => form.nickname = Some(field.text().await?),
                "password" => form.password = Some(field.text().await?),
                "team_id" => form.team_id = Some(field.text().await?),
                "avatar" => form.avatar = Some(read_avatar(field).await?),
                _ => {}
            }
        }
        Ok(form)
    }
}

/// First `avatar` field of a multipart body.
async fn read_avatar_field(multipart: &mut Multipart) -> Result<Option<AvatarUpload>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("avatar") {
            return read_avatar(field).await.map(Some);
        }
    }
    Ok(None)
}

fn is_unique_violation(err: &BuzzerError) -> bool {
    matches!(
        err,
        BuzzerError::Database(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn nickname_taken() -> ApiError {
    ApiError::Conflict("nickname already taken".to_string())
}

fn user_not_found() -> ApiError {
    ApiError::NotFound("user not found".to_string())
}

pub async fn create_user(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<RegisteredUser>), ApiError> {
    let form = RegistrationForm::read(&mut multipart).await?;

    let nickname = form.nickname.as_deref().map(str::trim).unwrap_or_default();
    let password = form.password.unwrap_or_default();
    let (Some(raw_team), Some(avatar)) = (form.team_id, form.avatar) else {
        return Err(ApiError::BadRequest(
            "nickname, password, team_id and avatar are required".to_string(),
        ));
    };
    if nickname.is_empty() || password.is_empty() {
        return Err(ApiError::BadRequest(
            "nickname, password, team_id and avatar are required".to_string(),
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    let team_id: TeamId = raw_team
        .parse()
        .map_err(|_| ApiError::BadRequest("please choose a valid team".to_string()))?;

    {
        let db = state.db();
        if !db.team_exists(team_id)? {
            return Err(ApiError::BadRequest("please choose a valid team".to_string()));
        }
        if db.nickname_exists(nickname)? {
            return Err(nickname_taken());
        }
    }

    let cost = state.bcrypt_cost;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;

    let avatar_ref = state.avatars.save(&avatar).await?;

    let new_user = NewUser {
        nickname: nickname.to_string(),
        password_hash,
        avatar: avatar_ref.clone(),
        team_id,
    };
    let inserted = {
        let mut db = state.db();
        db.insert_user(&new_user).and_then(|id| db.find_user(id))
    };
    let user = match inserted {
        Ok(Some(user)) => user,
        Ok(None) => {
            discard_avatar(&state, &avatar_ref).await;
            return Err(ApiError::Internal("inserted user vanished".to_string()));
        }
        Err(err) => {
            discard_avatar(&state, &avatar_ref).await;
            return Err(if is_unique_violation(&err) {
                nickname_taken()
            } else {
                err.into()
            });
        }
    };

    let token = state.tokens.issue(user.id)?;
    info!(user_id = %user.id, nickname = %user.nickname, "user registered");
    Ok((StatusCode::CREATED, Json(RegisteredUser { user, token })))
}

pub async fn get_current_user(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<User>, ApiError> {
    let user = state.db().find_user(user_id)?.ok_or_else(user_not_found)?;
    Ok(Json(user))
}

/// Replace the caller's avatar; the previous file is removed afterwards.
pub async fn update_avatar(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let avatar = read_avatar_field(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest("avatar file is required".to_string()))?;

    if state.db().find_user(user_id)?.is_none() {
        return Err(user_not_found());
    }

    let avatar_ref = state.avatars.save(&avatar).await?;
    let previous = state.db().update_avatar(user_id, &avatar_ref);
    let previous = match previous {
        Ok(previous) => previous,
        Err(err) => {
            discard_avatar(&state, &avatar_ref).await;
            return Err(err.into());
        }
    };

    if let Some(old) = previous {
        discard_avatar(&state, &old).await;
    }

    info!(%user_id, avatar = %avatar_ref, "avatar updated");
    Ok(Json(json!({ "avatar": avatar_ref })))
}

pub async fn update_team(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<UpdateTeamRequest>, JsonRejection>,
) -> Result<Json<LocalTeam>, ApiError> {
    let Json(request) = payload?;
    let team = change_team(&state, user_id, request.team_id)?;
    info!(%user_id, team_id = %team.id, "home team updated");
    Ok(Json(team))
}

fn change_team(state: &AppState, user_id: UserId, team_id: TeamId) -> Result<LocalTeam, ApiError> {
    let mut db = state.db();
    let team = db
        .get_team(team_id)?
        .ok_or_else(|| ApiError::BadRequest("team does not exist".to_string()))?;
    if !db.update_team(user_id, team_id)? {
        return Err(user_not_found());
    }
    Ok(team)
}

/// Best-effort removal; a leftover file is only logged.
async fn discard_avatar(state: &AppState, reference: &str) {
    if let Err(err) = state.avatars.delete(reference).await {
        warn!(reference, error = %err, "failed to delete avatar file");
    }
}
