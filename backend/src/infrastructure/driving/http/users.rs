use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use shared::{CreateUserRequest, MessageResponse, UpdateUserRequest, UsersQuery};

use crate::application::admin::commands as admin_commands;
use crate::application::views::{Statistics, UserSummary};
use crate::domain::UserId;
use crate::error::{AppError, Result};
use crate::infrastructure::driving::http::middleware::AuthenticatedUser;
use crate::infrastructure::AppState;

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/:id", put(update_user).delete(deactivate_user))
        .route("/api/statistics", get(statistics))
}

fn user_id(raw: &str) -> Result<UserId> {
    UserId::from_str(raw).map_err(|_| AppError::NotFound("User not found".to_string()))
}

async fn list_users(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<Vec<UserSummary>>> {
    let users = admin_commands::list_users::execute(state.users.as_ref(), &auth.actor(), query).await?;
    Ok(Json(users))
}

async fn create_user(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserSummary>)> {
    auth.actor().require_admin()?;
    let user = admin_commands::create_user::execute(state.users.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserSummary>> {
    let actor = auth.actor();
    actor.require_admin()?;
    let user = admin_commands::update_user::execute(state.users.as_ref(), &actor, &user_id(&id)?, payload).await?;
    Ok(Json(user))
}

async fn deactivate_user(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let actor = auth.actor();
    actor.require_admin()?;
    admin_commands::deactivate_user::execute(state.users.as_ref(), &actor, &user_id(&id)?).await?;
    Ok(Json(MessageResponse::new("User deactivated successfully")))
}

async fn statistics(auth: AuthenticatedUser, State(state): State<AppState>) -> Result<Json<Statistics>> {
    auth.actor().require_admin()?;
    let stats = admin_commands::statistics::execute(state.statistics.as_ref()).await?;
    Ok(Json(stats))
}
