use std::str::FromStr;

use shared::CreatePropertyRequest;
use uuid::Uuid;

use crate::application::listings::{existing_building, existing_district, non_empty, photo_set, Catalog};
use crate::application::ports::{BuildingRepository, CategoryRepository, DistrictRepository, PropertyRepository};
use crate::application::views::PropertyView;
use crate::application::Actor;
use crate::domain::pricing::price_per_sqm;
use crate::domain::{HistoryAction, Property, PropertyHistory, PropertyStatus};
use crate::error::{AppError, Result};

pub const CREATED_NOTE: &str = "Объект недвижимости создан";

/// Realtor leads need only a phone and a status; every other category needs
/// a district and a building. The caller becomes creator and assignee.
pub async fn execute<P, C, D, B>(
    properties: &P,
    catalog: Catalog<'_, C, D, B>,
    actor: &Actor,
    request: CreatePropertyRequest,
) -> Result<PropertyView>
where
    P: PropertyRepository + ?Sized,
    C: CategoryRepository + ?Sized,
    D: DistrictRepository + ?Sized,
    B: BuildingRepository + ?Sized,
{
    let required = || AppError::Validation("Категория, район и адрес обязательны".to_string());
    let category_raw = non_empty(request.category_id.clone()).ok_or_else(required)?;
    let unknown_category = || AppError::Validation("Указанная категория не существует".to_string());
    let category_id = Uuid::parse_str(&category_raw).map_err(|_| unknown_category())?;
    let category = catalog
        .categories
        .find_by_id(category_id)
        .await?
        .ok_or_else(unknown_category)?;

    let phone = non_empty(request.phone);
    let status = non_empty(request.status);
    let district_raw = non_empty(request.district_id);
    let building_raw = non_empty(request.building_id);

    if category.is_realtor() {
        if phone.is_none() || status.is_none() {
            return Err(AppError::Validation(
                "Для категории \"РИЭЛТОР\" обязательны только телефон и статус".to_string(),
            ));
        }
    } else if district_raw.is_none() || building_raw.is_none() {
        return Err(required());
    }

    let mut property = Property::new(category.id, actor.id);
    if let Some(raw) = district_raw {
        property.district_id = Some(existing_district(catalog.districts, &raw).await?);
    }
    if let Some(raw) = building_raw {
        property.building_id = Some(existing_building(catalog.buildings, &raw).await?);
    }
    if let Some(status) = status {
        property.status = PropertyStatus::from_str(&status).map_err(AppError::Validation)?;
    }

    property.apartment = non_empty(request.apartment);
    property.floor = request.floor;
    property.total_floors = request.total_floors;
    property.total_area = request.total_area;
    property.living_area = request.living_area;
    property.kitchen_area = request.kitchen_area;
    property.rooms = request.rooms;
    property.ceiling_height = request.ceiling_height;
    property.balcony = non_empty(request.balcony);
    property.loggia = request.loggia.unwrap_or(false);
    property.layout = non_empty(request.layout);
    property.wall_material = non_empty(request.wall_material);
    property.condition = non_empty(request.condition);
    property.year_built = request.year_built;
    property.phone = phone;
    property.source = non_empty(request.source);
    property.renovation = non_empty(request.renovation);
    property.p_field = non_empty(request.p_field);
    property.price = request.price;
    property.price_per_sqm = request
        .price_per_sqm
        .or_else(|| price_per_sqm(request.price, request.total_area));
    property.currency = non_empty(request.currency);
    property.description = non_empty(request.description);
    property.notes = non_empty(request.notes);

    let photos = photo_set(property.id, request.photos.as_deref().unwrap_or_default(), |i| {
        format!("photo_{}.jpg", i + 1)
    });
    let history = PropertyHistory::record(
        property.id,
        actor.id,
        HistoryAction::Created,
        Some(CREATED_NOTE.to_string()),
    );

    properties.create(&property, &photos, &history).await?;
    tracing::info!(property_id = %property.id, by = %actor.id, realtor = category.is_realtor(), "Property created");

    properties
        .find_view(property.id)
        .await?
        .ok_or_else(|| AppError::Internal("created property vanished".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::building_repository::MockBuildingRepository;
    use crate::application::ports::category_repository::MockCategoryRepository;
    use crate::application::ports::district_repository::MockDistrictRepository;
    use crate::application::ports::property_repository::MockPropertyRepository;
    use crate::domain::{Building, Category, District, UserId, UserRole, REALTOR_CATEGORY};
    use shared::PhotoInput;

    struct Fixture {
        categories: MockCategoryRepository,
        districts: MockDistrictRepository,
        buildings: MockBuildingRepository,
    }

    fn fixture(category: Category) -> Fixture {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_id().returning(move |_| Ok(Some(category.clone())));
        let mut districts = MockDistrictRepository::new();
        districts
            .expect_find_by_id()
            .returning(|id| Ok(Some(District { id, ..District::new("Центр".into(), None).unwrap() })));
        let mut buildings = MockBuildingRepository::new();
        buildings
            .expect_find_by_id()
            .returning(|id| Ok(Some(Building { id, ..Building::new(Uuid::new_v4(), "Ленина", "1").unwrap() })));
        Fixture { categories, districts, buildings }
    }

    fn agent() -> Actor {
        Actor { id: UserId::new(), role: UserRole::Agent }
    }

    fn view_of(property: Property) -> PropertyView {
        PropertyView {
            property,
            category: None,
            district: None,
            building: None,
            created_by: None,
            assigned_to: None,
            photos: vec![],
            call_assignments: None,
            histories: None,
        }
    }

    /// Repository that hands back whatever was created.
    fn recording_repo(expect_create: bool) -> MockPropertyRepository {
        let stored = std::sync::Arc::new(std::sync::Mutex::new(None::<Property>));
        let mut properties = MockPropertyRepository::new();
        let sink = stored.clone();
        properties
            .expect_create()
            .times(usize::from(expect_create))
            .returning(move |property, photos, history| {
                assert_eq!(history.action, HistoryAction::Created);
                assert_eq!(history.notes.as_deref(), Some(CREATED_NOTE));
                assert!(photos.first().map_or(true, |p| p.is_primary));
                *sink.lock().unwrap() = Some(property.clone());
                Ok(())
            });
        properties
            .expect_find_view()
            .returning(move |_| Ok(stored.lock().unwrap().clone().map(view_of)));
        properties
    }

    fn flat_request() -> CreatePropertyRequest {
        CreatePropertyRequest {
            category_id: Some(Uuid::new_v4().to_string()),
            district_id: Some(Uuid::new_v4().to_string()),
            building_id: Some(Uuid::new_v4().to_string()),
            price: Some(6_000_000.0),
            total_area: Some(48.0),
            photos: Some(vec![
                PhotoInput { url: "/uploads/1.jpg".into(), name: None, caption: None },
                PhotoInput { url: "/uploads/2.jpg".into(), name: None, caption: None },
            ]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn regular_listing_gets_defaults_and_price_per_sqm() {
        let f = fixture(Category::new("2-комнатная".into(), None).unwrap());
        let properties = recording_repo(true);
        let actor = agent();
        let catalog = Catalog { categories: &f.categories, districts: &f.districts, buildings: &f.buildings };

        let view = execute(&properties, catalog, &actor, flat_request()).await.unwrap();
        assert_eq!(view.property.status, PropertyStatus::Active);
        assert_eq!(view.property.price_per_sqm, Some(125_000.0));
        assert_eq!(view.property.created_by_id, actor.id);
        assert_eq!(view.property.assigned_to_id, Some(actor.id));
    }

    #[tokio::test]
    async fn regular_listing_requires_building() {
        let f = fixture(Category::new("Дом".into(), None).unwrap());
        let properties = recording_repo(false);
        let catalog = Catalog { categories: &f.categories, districts: &f.districts, buildings: &f.buildings };
        let request = CreatePropertyRequest { building_id: Some(" ".into()), ..flat_request() };

        let err = execute(&properties, catalog, &agent(), request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Категория, район и адрес обязательны"));
    }

    #[tokio::test]
    async fn realtor_lead_needs_phone_and_status_only() {
        let f = fixture(Category::new(REALTOR_CATEGORY.into(), None).unwrap());
        let properties = recording_repo(true);
        let catalog = Catalog { categories: &f.categories, districts: &f.districts, buildings: &f.buildings };
        let request = CreatePropertyRequest {
            category_id: Some(Uuid::new_v4().to_string()),
            district_id: Some(String::new()),
            phone: Some("+7 900 000-00-00".into()),
            status: Some("BUSY".into()),
            ..Default::default()
        };

        let view = execute(&properties, catalog, &agent(), request).await.unwrap();
        assert_eq!(view.property.status, PropertyStatus::Busy);
        assert!(view.property.district_id.is_none() && view.property.building_id.is_none());
    }

    #[tokio::test]
    async fn realtor_lead_without_status_is_rejected() {
        let f = fixture(Category::new(REALTOR_CATEGORY.into(), None).unwrap());
        let properties = recording_repo(false);
        let catalog = Catalog { categories: &f.categories, districts: &f.districts, buildings: &f.buildings };
        let request = CreatePropertyRequest {
            category_id: Some(Uuid::new_v4().to_string()),
            phone: Some("+7 900 000-00-00".into()),
            ..Default::default()
        };
        let err = execute(&properties, catalog, &agent(), request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("РИЭЛТОР")));
    }

    #[tokio::test]
    async fn unknown_category_is_a_bad_request() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_id().returning(|_| Ok(None));
        let (districts, buildings) = (MockDistrictRepository::new(), MockBuildingRepository::new());
        let properties = recording_repo(false);
        let catalog = Catalog { categories: &categories, districts: &districts, buildings: &buildings };

        let err = execute(&properties, catalog, &agent(), flat_request()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Указанная категория не существует"));
    }
}
