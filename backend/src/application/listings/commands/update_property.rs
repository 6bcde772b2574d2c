use std::str::FromStr;

use chrono::Utc;
use shared::UpdatePropertyRequest;
use uuid::Uuid;

use crate::application::listings::{
    existing_building, existing_district, non_empty, photo_set, Catalog, PROPERTY_NOT_FOUND,
};
use crate::application::ports::{
    BuildingRepository, CategoryRepository, DistrictRepository, PropertyChangeSet, PropertyRepository,
};
use crate::application::views::PropertyView;
use crate::application::{parse_id, Actor};
use crate::domain::change_log::{describe_changes, history_notes};
use crate::domain::pricing::price_per_sqm;
use crate::domain::{HistoryAction, PropertyHistory, PropertyStatus};
use crate::error::{AppError, Result};

fn invalid(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

/// `Some(None)` or a blank string: the caller asked to empty the field.
fn is_cleared(field: &Option<Option<String>>) -> bool {
    matches!(field, Some(value) if value.as_deref().map_or(true, |v| v.trim().is_empty()))
}

fn patch<T>(target: &mut Option<T>, value: Option<Option<T>>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn patch_text(target: &mut Option<String>, value: Option<Option<String>>) {
    if let Some(value) = value {
        *target = non_empty(value);
    }
}

/// Agents edit the listing itself, never where it is or what it is.
fn strip_agent_restricted(request: &mut UpdatePropertyRequest) {
    request.category_id = None;
    request.district_id = None;
    request.building_id = None;
    request.is_archived = None;
    request.apartment = None;
    request.year_built = None;
    request.wall_material = None;
    request.layout = None;
    request.total_floors = None;
}

pub async fn execute<P, C, D, B>(
    properties: &P,
    catalog: Catalog<'_, C, D, B>,
    actor: &Actor,
    id: &str,
    mut request: UpdatePropertyRequest,
) -> Result<PropertyView>
where
    P: PropertyRepository + ?Sized,
    C: CategoryRepository + ?Sized,
    D: DistrictRepository + ?Sized,
    B: BuildingRepository + ?Sized,
{
    actor.require_listing_access()?;
    let id = parse_id(id, PROPERTY_NOT_FOUND)?;
    let before = properties
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(PROPERTY_NOT_FOUND.to_string()))?;

    if actor.is_agent() {
        strip_agent_restricted(&mut request);
    }

    if is_cleared(&request.category_id) {
        return Err(invalid("Категория обязательна"));
    }
    let new_category = match request.category_id.take().flatten() {
        Some(raw) => {
            let unknown = || invalid("Указанная категория не существует");
            let category_id = Uuid::parse_str(raw.trim()).map_err(|_| unknown())?;
            Some(catalog.categories.find_by_id(category_id).await?.ok_or_else(unknown)?)
        }
        None => None,
    };
    let is_realtor = match &new_category {
        Some(category) => category.is_realtor(),
        None => catalog
            .categories
            .find_by_id(before.category_id)
            .await?
            .map_or(false, |category| category.is_realtor()),
    };

    if is_realtor {
        let phone_kept = match &request.phone {
            None => before.phone.is_some(),
            Some(phone) => phone.as_deref().map_or(false, |p| !p.trim().is_empty()),
        };
        if !phone_kept {
            return Err(invalid("Для категории \"РИЭЛТОР\" обязателен телефон"));
        }
        if is_cleared(&request.status) {
            return Err(invalid("Для категории \"РИЭЛТОР\" обязателен статус"));
        }
    } else {
        if is_cleared(&request.district_id) {
            return Err(invalid("Район обязателен"));
        }
        if is_cleared(&request.building_id) {
            return Err(invalid("Адрес обязателен"));
        }
        if is_cleared(&request.status) {
            return Err(invalid("Статус обязателен"));
        }
    }

    let mut after = before.clone();
    if let Some(category) = new_category {
        after.category_id = category.id;
    }
    if let Some(district) = request.district_id.take() {
        after.district_id = match non_empty(district) {
            Some(raw) => Some(existing_district(catalog.districts, &raw).await?),
            None => None,
        };
    }
    if let Some(building) = request.building_id.take() {
        after.building_id = match non_empty(building) {
            Some(raw) => Some(existing_building(catalog.buildings, &raw).await?),
            None => None,
        };
    }
    if let Some(status) = request.status.take().flatten() {
        after.status = PropertyStatus::from_str(&status).map_err(AppError::Validation)?;
    }

    patch_text(&mut after.apartment, request.apartment);
    patch(&mut after.floor, request.floor);
    patch(&mut after.total_floors, request.total_floors);
    patch(&mut after.living_area, request.living_area);
    patch(&mut after.kitchen_area, request.kitchen_area);
    patch(&mut after.rooms, request.rooms);
    patch(&mut after.ceiling_height, request.ceiling_height);
    patch_text(&mut after.balcony, request.balcony);
    if let Some(loggia) = request.loggia {
        after.loggia = loggia;
    }
    patch_text(&mut after.layout, request.layout);
    patch_text(&mut after.wall_material, request.wall_material);
    patch_text(&mut after.condition, request.condition);
    patch(&mut after.year_built, request.year_built);
    patch_text(&mut after.phone, request.phone);
    patch_text(&mut after.source, request.source);
    patch_text(&mut after.renovation, request.renovation);
    patch_text(&mut after.p_field, request.p_field);
    patch_text(&mut after.currency, request.currency);
    patch_text(&mut after.description, request.description);
    patch_text(&mut after.notes, request.notes);
    if let Some(archived) = request.is_archived {
        after.is_archived = archived;
    }

    let price_inputs_changed = request.price.is_some() || request.total_area.is_some();
    patch(&mut after.price, request.price);
    patch(&mut after.total_area, request.total_area);
    patch(&mut after.price_per_sqm, request.price_per_sqm);
    if price_inputs_changed {
        if let Some(per_sqm) = price_per_sqm(after.price, after.total_area) {
            after.price_per_sqm = Some(per_sqm);
        }
    }

    let changes = describe_changes(&before, &after);
    after.updated_at = Utc::now();

    let change_set = PropertyChangeSet {
        photos: request
            .photos
            .map(|photos| photo_set(id, &photos, |_| "unnamed.jpg".to_string())),
        history: history_notes(&changes)
            .map(|notes| PropertyHistory::record(id, actor.id, HistoryAction::Updated, Some(notes))),
        close_assignments_for: actor.is_agent().then_some(actor.id),
        property: after,
    };
    properties.update(&change_set).await?;
    tracing::info!(property_id = %id, by = %actor.id, changed = changes.len(), "Property updated");

    properties
        .find_view(id)
        .await?
        .ok_or_else(|| AppError::NotFound(PROPERTY_NOT_FOUND.to_string()))
}
