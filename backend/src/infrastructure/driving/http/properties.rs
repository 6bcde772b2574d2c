use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use shared::{
    CallAssignmentRequest, CreatePropertyRequest, MessageResponse, PropertyListQuery, SuccessResponse,
    UpdatePropertyRequest,
};

use crate::application::listings::commands as listing_commands;
use crate::application::views::{HistoryEntryView, PropertyView};
use crate::error::Result;
use crate::infrastructure::driving::http::middleware::AuthenticatedUser;
use crate::infrastructure::AppState;

pub fn properties_routes() -> Router<AppState> {
    Router::new()
        .route("/api/properties", get(list_properties).post(create_property))
        .route(
            "/api/properties/:id",
            get(get_property).put(update_property).delete(archive_property),
        )
        .route("/api/properties/:id/archive", post(archive))
        .route("/api/properties/:id/restore", post(restore))
        .route("/api/properties/:id/history", get(history))
        .route("/api/call-assignments", post(assign_calls))
        .route("/api/call-assignments/:id", put(confirm_call))
}

async fn list_properties(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Query(query): Query<PropertyListQuery>,
) -> Result<Json<listing_commands::list_properties::PropertyPage>> {
    let page = listing_commands::list_properties::execute(
        state.properties.as_ref(),
        state.call_assignments.as_ref(),
        &auth.actor(),
        query,
    )
    .await?;
    Ok(Json(page))
}

async fn create_property(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Json(payload): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<PropertyView>)> {
    let property =
        listing_commands::create_property::execute(state.properties.as_ref(), state.catalog(), &auth.actor(), payload)
            .await?;
    Ok((StatusCode::CREATED, Json(property)))
}

async fn get_property(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PropertyView>> {
    let property = listing_commands::get_property::execute(state.properties.as_ref(), &auth.actor(), &id).await?;
    Ok(Json(property))
}

async fn update_property(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePropertyRequest>,
) -> Result<Json<PropertyView>> {
    let property = listing_commands::update_property::execute(
        state.properties.as_ref(),
        state.catalog(),
        &auth.actor(),
        &id,
        payload,
    )
    .await?;
    Ok(Json(property))
}

async fn archive_property(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let message = listing_commands::archive_property::archive(state.properties.as_ref(), &auth.actor(), &id).await?;
    Ok(Json(message))
}

async fn archive(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PropertyView>> {
    let property =
        listing_commands::archive_property::set_archived(state.properties.as_ref(), &auth.actor(), &id, true).await?;
    Ok(Json(property))
}

async fn restore(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PropertyView>> {
    let property =
        listing_commands::archive_property::set_archived(state.properties.as_ref(), &auth.actor(), &id, false).await?;
    Ok(Json(property))
}

async fn history(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<HistoryEntryView>>> {
    let entries = listing_commands::property_history::execute(state.properties.as_ref(), &auth.actor(), &id).await?;
    Ok(Json(entries))
}

async fn assign_calls(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Json(payload): Json<CallAssignmentRequest>,
) -> Result<Json<SuccessResponse>> {
    let response = listing_commands::call_assignments::assign(
        state.call_assignments.as_ref(),
        state.properties.as_ref(),
        state.users.as_ref(),
        &auth.actor(),
        payload,
    )
    .await?;
    Ok(Json(response))
}

async fn confirm_call(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let response =
        listing_commands::call_assignments::confirm(state.call_assignments.as_ref(), &auth.actor(), &id).await?;
    Ok(Json(response))
}
