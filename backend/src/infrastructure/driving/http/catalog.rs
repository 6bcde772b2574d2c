use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use shared::{
    AddressQuery, BuildingListQuery, BuildingSearchQuery, CreateBuildingRequest, MessageResponse,
    NamedEntityRequest, UpdateBuildingRequest, YearReferenceQuery,
};

use crate::application::catalog::commands as catalog_commands;
use crate::application::parse_id;
use crate::application::views::BuildingView;
use crate::domain::{Category, District};
use crate::error::Result;
use crate::infrastructure::driving::http::middleware::AuthenticatedUser;
use crate::infrastructure::AppState;

const BUILDING_NOT_FOUND: &str = "Building not found";

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/districts", get(list_districts).post(create_district))
        .route("/api/categories", get(list_categories).post(create_category))
        .route("/api/buildings", get(list_buildings).post(create_building))
        .route("/api/buildings/search", get(search_buildings))
        .route("/api/buildings/:id", put(update_building).delete(deactivate_building))
        .route("/api/addresses", get(lookup_address))
        .route("/api/reference/year-built", get(year_reference))
}

async fn list_districts(_auth: AuthenticatedUser, State(state): State<AppState>) -> Result<Json<Vec<District>>> {
    Ok(Json(catalog_commands::districts::list(state.districts.as_ref()).await?))
}

async fn create_district(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Json(payload): Json<NamedEntityRequest>,
) -> Result<(StatusCode, Json<District>)> {
    auth.actor().require_staff()?;
    let district = catalog_commands::districts::create(state.districts.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(district)))
}

async fn list_categories(_auth: AuthenticatedUser, State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(catalog_commands::categories::list(state.categories.as_ref()).await?))
}

async fn create_category(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Json(payload): Json<NamedEntityRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    auth.actor().require_staff()?;
    let category = catalog_commands::categories::create(state.categories.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn list_buildings(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Query(query): Query<BuildingListQuery>,
) -> Result<Json<catalog_commands::list_buildings::BuildingPage>> {
    auth.actor().require_staff()?;
    Ok(Json(catalog_commands::list_buildings::execute(state.buildings.as_ref(), query).await?))
}

async fn create_building(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateBuildingRequest>,
) -> Result<(StatusCode, Json<BuildingView>)> {
    auth.actor().require_staff()?;
    let building =
        catalog_commands::create_building::execute(state.buildings.as_ref(), state.districts.as_ref(), payload)
            .await?;
    Ok((StatusCode::CREATED, Json(building)))
}

async fn update_building(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBuildingRequest>,
) -> Result<Json<BuildingView>> {
    auth.actor().require_staff()?;
    let id = parse_id(&id, BUILDING_NOT_FOUND)?;
    let building =
        catalog_commands::update_building::execute(state.buildings.as_ref(), state.districts.as_ref(), id, payload)
            .await?;
    Ok(Json(building))
}

async fn deactivate_building(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    auth.actor().require_staff()?;
    let id = parse_id(&id, BUILDING_NOT_FOUND)?;
    catalog_commands::deactivate_building::execute(state.buildings.as_ref(), id).await?;
    Ok(Json(MessageResponse::new("Building deactivated successfully")))
}

async fn search_buildings(
    _auth: AuthenticatedUser,
    State(state): State<AppState>,
    Query(query): Query<BuildingSearchQuery>,
) -> Result<Json<catalog_commands::search_buildings::BuildingSearchResult>> {
    Ok(Json(catalog_commands::search_buildings::execute(state.buildings.as_ref(), query).await?))
}

async fn lookup_address(
    _auth: AuthenticatedUser,
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<catalog_commands::lookup_address::AddressLookup>> {
    let lookup =
        catalog_commands::lookup_address::execute(state.buildings.as_ref(), state.districts.as_ref(), query).await?;
    Ok(Json(lookup))
}

async fn year_reference(
    _auth: AuthenticatedUser,
    Query(query): Query<YearReferenceQuery>,
) -> Result<Json<catalog_commands::year_reference::YearReference>> {
    Ok(Json(catalog_commands::year_reference::execute(query)?))
}
