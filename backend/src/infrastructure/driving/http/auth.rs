use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use shared::{LoginRequest, LoginResponse, SetupAdminRequest, SetupStatusResponse, UserProfile};

use crate::application::auth::commands as auth_commands;
use crate::error::Result;
use crate::infrastructure::driving::http::middleware::AuthenticatedUser;
use crate::infrastructure::AppState;

pub fn setup_routes() -> Router<AppState> {
    Router::new()
        .route("/api/setup/status", get(check_setup_status))
        .route("/api/setup/admin", post(create_first_admin))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
}

async fn check_setup_status(State(state): State<AppState>) -> Result<Json<SetupStatusResponse>> {
    let status = auth_commands::setup_status::execute(state.users.as_ref()).await?;
    Ok(Json(status))
}

async fn create_first_admin(
    State(state): State<AppState>,
    Json(payload): Json<SetupAdminRequest>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let admin = auth_commands::bootstrap_admin::execute(state.users.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> Result<Json<LoginResponse>> {
    let response = auth_commands::login::execute(state.users.as_ref(), &state.tokens, payload).await?;
    Ok(Json(response))
}

async fn me(auth: AuthenticatedUser, State(state): State<AppState>) -> Result<Json<UserProfile>> {
    let profile = auth_commands::me::execute(state.users.as_ref(), &auth.id).await?;
    Ok(Json(profile))
}
