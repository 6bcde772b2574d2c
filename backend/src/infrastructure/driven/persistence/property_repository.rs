use std::collections::HashMap;

use axum::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::building_repository::BUILDING_SELECT;
use super::db_types::{DbBuilding, DbHistory, DbNamedEntity, DbPerson, DbPhoto, DbProperty};
use super::query::{distinct, fetch_by_ids, page_offset, push_contains_any, push_in};
use crate::application::ports::{NumberRange, PropertyChangeSet, PropertyFilter, PropertyRepository};
use crate::application::views::{HistoryEntryView, PersonRef, PropertyView};
use crate::domain::{Building, Category, District, Property, PropertyHistory, PropertyPhoto, UserId};
use crate::error::Result;

const PROPERTY_SELECT: &str = "SELECT p.id, p.category_id, p.district_id, p.building_id, p.apartment, p.floor, \
     p.total_floors, p.total_area, p.living_area, p.kitchen_area, p.rooms, p.ceiling_height, p.balcony, p.loggia, \
     p.layout, p.wall_material, p.condition, p.year_built, p.phone, p.source, p.renovation, p.p_field, p.price, \
     p.price_per_sqm, p.currency, p.status, p.description, p.notes, p.is_archived, p.created_by_id, \
     p.assigned_to_id, p.created_at, p.updated_at \
     FROM properties p LEFT JOIN buildings b ON b.id = p.building_id";

const NEWEST_FIRST: &str = " ORDER BY p.created_at DESC, p.rowid DESC";

fn push_range(qb: &mut QueryBuilder<'_, Sqlite>, column: &str, range: &NumberRange) {
    if let Some(min) = range.min {
        qb.push(" AND ").push(column).push(" >= ").push_bind(min);
    }
    if let Some(max) = range.max {
        qb.push(" AND ").push(column).push(" <= ").push_bind(max);
    }
}

fn push_list(qb: &mut QueryBuilder<'_, Sqlite>, column: &str, values: &[String]) {
    if !values.is_empty() {
        qb.push(" AND ");
        push_in(qb, column, values.iter().cloned());
    }
}

fn push_contains(qb: &mut QueryBuilder<'_, Sqlite>, column: &str, needle: &Option<String>) {
    if let Some(needle) = needle {
        qb.push(" AND ");
        push_contains_any(qb, &[column], &[needle.clone()]);
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &PropertyFilter) {
    qb.push(" WHERE p.is_archived = ").push_bind(filter.archived);
    push_list(qb, "p.category_id", &filter.category_ids);
    push_list(qb, "p.district_id", &filter.district_ids);
    push_list(qb, "p.status", &filter.statuses);
    push_list(qb, "p.layout", &filter.layouts);
    push_list(qb, "b.wall_material", &filter.wall_materials);
    push_list(qb, "p.balcony", &filter.balcony_types);
    push_list(qb, "p.p_field", &filter.p_fields);
    push_contains(qb, "p.condition", &filter.condition);
    push_contains(qb, "p.source", &filter.source);
    push_range(qb, "p.price", &filter.price);
    push_range(qb, "p.total_area", &filter.total_area);
    push_range(qb, "p.kitchen_area", &filter.kitchen_area);
    push_range(qb, "p.floor", &filter.floor);
    push_range(qb, "p.year_built", &filter.year_built);
    push_contains(qb, "p.phone", &filter.phone);
    push_contains(qb, "b.street", &filter.street);
    push_contains(qb, "b.house_number", &filter.house_number);
    push_contains(qb, "p.description", &filter.description);
    if !filter.exclude_ids.is_empty() {
        qb.push(" AND NOT ");
        push_in(qb, "p.id", filter.exclude_ids.iter().map(Uuid::to_string));
    }
}

async fn insert_property(conn: &mut SqliteConnection, p: &Property) -> Result<()> {
    sqlx::query(
        "INSERT INTO properties (id, category_id, district_id, building_id, apartment, floor, total_floors,
            total_area, living_area, kitchen_area, rooms, ceiling_height, balcony, loggia, layout, wall_material,
            condition, year_built, phone, source, renovation, p_field, price, price_per_sqm, currency, status,
            description, notes, is_archived, created_by_id, assigned_to_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(p.id.to_string())
    .bind(p.category_id.to_string())
    .bind(p.district_id.map(|id| id.to_string()))
    .bind(p.building_id.map(|id| id.to_string()))
    .bind(&p.apartment)
    .bind(p.floor)
    .bind(p.total_floors)
    .bind(p.total_area)
    .bind(p.living_area)
    .bind(p.kitchen_area)
    .bind(p.rooms)
    .bind(p.ceiling_height)
    .bind(&p.balcony)
    .bind(p.loggia)
    .bind(&p.layout)
    .bind(&p.wall_material)
    .bind(&p.condition)
    .bind(p.year_built)
    .bind(&p.phone)
    .bind(&p.source)
    .bind(&p.renovation)
    .bind(&p.p_field)
    .bind(p.price)
    .bind(p.price_per_sqm)
    .bind(&p.currency)
    .bind(p.status.as_db_str())
    .bind(&p.description)
    .bind(&p.notes)
    .bind(p.is_archived)
    .bind(p.created_by_id.to_string())
    .bind(p.assigned_to_id.map(|id| id.to_string()))
    .bind(p.created_at)
    .bind(p.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

async fn update_property(conn: &mut SqliteConnection, p: &Property) -> Result<()> {
    sqlx::query(
        "UPDATE properties SET category_id = ?, district_id = ?, building_id = ?, apartment = ?, floor = ?,
            total_floors = ?, total_area = ?, living_area = ?, kitchen_area = ?, rooms = ?, ceiling_height = ?,
            balcony = ?, loggia = ?, layout = ?, wall_material = ?, condition = ?, year_built = ?, phone = ?,
            source = ?, renovation = ?, p_field = ?, price = ?, price_per_sqm = ?, currency = ?, status = ?,
            description = ?, notes = ?, is_archived = ?, assigned_to_id = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(p.category_id.to_string())
    .bind(p.district_id.map(|id| id.to_string()))
    .bind(p.building_id.map(|id| id.to_string()))
    .bind(&p.apartment)
    .bind(p.floor)
    .bind(p.total_floors)
    .bind(p.total_area)
    .bind(p.living_area)
    .bind(p.kitchen_area)
    .bind(p.rooms)
    .bind(p.ceiling_height)
    .bind(&p.balcony)
    .bind(p.loggia)
    .bind(&p.layout)
    .bind(&p.wall_material)
    .bind(&p.condition)
    .bind(p.year_built)
    .bind(&p.phone)
    .bind(&p.source)
    .bind(&p.renovation)
    .bind(&p.p_field)
    .bind(p.price)
    .bind(p.price_per_sqm)
    .bind(&p.currency)
    .bind(p.status.as_db_str())
    .bind(&p.description)
    .bind(&p.notes)
    .bind(p.is_archived)
    .bind(p.assigned_to_id.map(|id| id.to_string()))
    .bind(p.updated_at)
    .bind(p.id.to_string())
    .execute(conn)
    .await?;
    Ok(())
}

async fn insert_photo(conn: &mut SqliteConnection, photo: &PropertyPhoto) -> Result<()> {
    sqlx::query(
        "INSERT INTO property_photos (id, property_id, filename, url, caption, is_primary, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(photo.id.to_string())
    .bind(photo.property_id.to_string())
    .bind(&photo.filename)
    .bind(&photo.url)
    .bind(&photo.caption)
    .bind(photo.is_primary)
    .bind(photo.created_at)
    .execute(conn)
    .await?;
    Ok(())
}

pub(crate) async fn insert_history(conn: &mut SqliteConnection, entry: &PropertyHistory) -> Result<()> {
    sqlx::query(
        "INSERT INTO property_history (id, property_id, user_id, action, notes, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(entry.id.to_string())
    .bind(entry.property_id.to_string())
    .bind(entry.user_id.to_string())
    .bind(entry.action.as_db_str())
    .bind(&entry.notes)
    .bind(entry.created_at)
    .execute(conn)
    .await?;
    Ok(())
}

fn keyed<T, K: std::hash::Hash + Eq>(items: Vec<T>, key: impl Fn(&T) -> K) -> HashMap<K, T> {
    items.into_iter().map(|item| (key(&item), item)).collect()
}

pub struct SqlitePropertyRepository {
    pool: SqlitePool,
}

impl SqlitePropertyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Loads the records every listing row shows: category, district,
    /// building, people and photos.
    async fn views(&self, rows: Vec<DbProperty>) -> Result<Vec<PropertyView>> {
        let properties = rows.into_iter().map(Property::try_from).collect::<Result<Vec<_>>>()?;
        if properties.is_empty() {
            return Ok(Vec::new());
        }

        let category_ids = distinct(properties.iter().map(|p| p.category_id.to_string()));
        let district_ids = distinct(properties.iter().filter_map(|p| p.district_id).map(|id| id.to_string()));
        let building_ids = distinct(properties.iter().filter_map(|p| p.building_id).map(|id| id.to_string()));
        let people_ids = distinct(
            properties
                .iter()
                .flat_map(|p| std::iter::once(p.created_by_id).chain(p.assigned_to_id))
                .map(|id| id.to_string()),
        );
        let property_ids: Vec<String> = properties.iter().map(|p| p.id.to_string()).collect();

        let named = "SELECT id, name, description, is_active, created_at";
        let categories: Vec<Category> = fetch_by_ids::<DbNamedEntity>(
            &self.pool,
            &format!("{} FROM categories", named),
            "id",
            category_ids,
            "",
        )
        .await?
        .into_iter()
        .map(Category::try_from)
        .collect::<Result<_>>()?;
        let districts: Vec<District> = fetch_by_ids::<DbNamedEntity>(
            &self.pool,
            &format!("{} FROM districts", named),
            "id",
            district_ids,
            "",
        )
        .await?
        .into_iter()
        .map(District::try_from)
        .collect::<Result<_>>()?;
        let buildings: Vec<Building> = fetch_by_ids::<DbBuilding>(&self.pool, BUILDING_SELECT, "b.id", building_ids, "")
            .await?
            .into_iter()
            .map(Building::try_from)
            .collect::<Result<_>>()?;
        let people: HashMap<String, PersonRef> =
            fetch_by_ids::<DbPerson>(&self.pool, "SELECT id, name, email FROM users", "id", people_ids, "")
                .await?
                .into_iter()
                .map(|row| (row.id, PersonRef { name: row.name, email: row.email }))
                .collect();
        let photos: Vec<PropertyPhoto> = fetch_by_ids::<DbPhoto>(
            &self.pool,
            "SELECT id, property_id, filename, url, caption, is_primary, created_at FROM property_photos",
            "property_id",
            property_ids,
            " ORDER BY is_primary DESC, rowid ASC",
        )
        .await?
        .into_iter()
        .map(PropertyPhoto::try_from)
        .collect::<Result<_>>()?;

        let categories = keyed(categories, |c| c.id);
        let districts = keyed(districts, |d| d.id);
        let buildings = keyed(buildings, |b| b.id);
        let mut photos_by_property: HashMap<Uuid, Vec<PropertyPhoto>> = HashMap::new();
        for photo in photos {
            photos_by_property.entry(photo.property_id).or_default().push(photo);
        }
        let person = |id: &UserId| people.get(&id.to_string()).cloned();

        Ok(properties
            .into_iter()
            .map(|property| PropertyView {
                category: categories.get(&property.category_id).cloned(),
                district: property.district_id.and_then(|id| districts.get(&id).cloned()),
                building: property.building_id.and_then(|id| buildings.get(&id).cloned()),
                created_by: person(&property.created_by_id),
                assigned_to: property.assigned_to_id.as_ref().and_then(person),
                photos: photos_by_property.remove(&property.id).unwrap_or_default(),
                call_assignments: None,
                histories: None,
                property,
            })
            .collect())
    }
}

#[async_trait]
impl PropertyRepository for SqlitePropertyRepository {
    async fn list(&self, filter: &PropertyFilter, page: i64, limit: i64) -> Result<(Vec<PropertyView>, i64)> {
        let mut count = QueryBuilder::<Sqlite>::new(
            "SELECT COUNT(*) FROM properties p LEFT JOIN buildings b ON b.id = p.building_id",
        );
        push_filter(&mut count, filter);
        let (total,): (i64,) = count.build_query_as().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::<Sqlite>::new(PROPERTY_SELECT);
        push_filter(&mut qb, filter);
        qb.push(NEWEST_FIRST)
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(page_offset(page, limit));
        let rows: Vec<DbProperty> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok((self.views(rows).await?, total))
    }

    async fn pinned_for(&self, agent: &UserId, archived: bool) -> Result<Vec<PropertyView>> {
        let rows: Vec<DbProperty> = sqlx::query_as(&format!(
            "{} WHERE p.is_archived = ? AND EXISTS (
                SELECT 1 FROM call_assignments c
                WHERE c.property_id = p.id AND c.agent_id = ? AND c.is_called = 0
             ){}",
            PROPERTY_SELECT, NEWEST_FIRST
        ))
        .bind(archived)
        .bind(agent.to_string())
        .fetch_all(&self.pool)
        .await?;
        self.views(rows).await
    }

    async fn find(&self, id: Uuid) -> Result<Option<Property>> {
        let row: Option<DbProperty> = sqlx::query_as(&format!("{} WHERE p.id = ?", PROPERTY_SELECT))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Property::try_from).transpose()
    }

    async fn find_view(&self, id: Uuid) -> Result<Option<PropertyView>> {
        let rows: Vec<DbProperty> = sqlx::query_as(&format!("{} WHERE p.id = ?", PROPERTY_SELECT))
            .bind(id.to_string())
            .fetch_all(&self.pool)
            .await?;
        Ok(self.views(rows).await?.into_iter().next())
    }

    async fn create(&self, property: &Property, photos: &[PropertyPhoto], history: &PropertyHistory) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        insert_property(&mut tx, property).await?;
        for photo in photos {
            insert_photo(&mut tx, photo).await?;
        }
        insert_history(&mut tx, history).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update(&self, changes: &PropertyChangeSet) -> Result<()> {
        let property = &changes.property;
        let mut tx = self.pool.begin().await?;
        update_property(&mut tx, property).await?;

        if let Some(photos) = &changes.photos {
            sqlx::query("DELETE FROM property_photos WHERE property_id = ?")
                .bind(property.id.to_string())
                .execute(&mut *tx)
                .await?;
            for photo in photos {
                insert_photo(&mut tx, photo).await?;
            }
        }
        if let Some(history) = &changes.history {
            insert_history(&mut tx, history).await?;
        }
        if let Some(agent) = &changes.close_assignments_for {
            sqlx::query(
                "UPDATE call_assignments SET is_called = 1
                 WHERE property_id = ? AND agent_id = ? AND is_called = 0",
            )
            .bind(property.id.to_string())
            .bind(agent.to_string())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn set_archived(&self, id: Uuid, archived: bool, history: &PropertyHistory) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("UPDATE properties SET is_archived = ?, updated_at = ? WHERE id = ?")
            .bind(archived)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }
        insert_history(&mut tx, history).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn history(&self, id: Uuid) -> Result<Vec<HistoryEntryView>> {
        let rows: Vec<DbHistory> = sqlx::query_as(
            "SELECT h.id, h.property_id, h.user_id, h.action, h.notes, h.created_at,
                    u.name AS user_name, u.email AS user_email
             FROM property_history h LEFT JOIN users u ON u.id = h.user_id
             WHERE h.property_id = ?
             ORDER BY h.created_at DESC, h.rowid DESC",
        )
        .bind(id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let (entry, author) = row.into_entry()?;
                Ok(HistoryEntryView {
                    entry,
                    user: author.map(|(name, email)| PersonRef { name, email }),
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::ports::{BuildingRepository, CategoryRepository, DistrictRepository, UserRepository};
    use crate::domain::{HistoryAction, PropertyStatus, User, UserRole};
    use crate::infrastructure::driven::persistence::{
        SqliteBuildingRepository, SqliteCategoryRepository, SqliteDistrictRepository, SqliteUserRepository,
    };
    use crate::test_support::{memory_pool, user};

    /// A database with one agent, category, district and building.
    pub(crate) struct World {
        pub pool: SqlitePool,
        pub agent: User,
        pub category: Category,
        pub district: District,
        pub building: Building,
    }

    impl World {
        pub(crate) async fn new() -> Self {
            let pool = memory_pool().await;
            let agent = user("agent@example.com", UserRole::Agent);
            SqliteUserRepository::new(pool.clone()).insert(&agent).await.unwrap();
            let category = Category::new("2-комнатная".into(), None).unwrap();
            SqliteCategoryRepository::new(pool.clone()).insert(&category).await.unwrap();
            let district = District::new("Центр".into(), None).unwrap();
            SqliteDistrictRepository::new(pool.clone()).insert(&district).await.unwrap();
            let mut building = Building::new(district.id, "Ленина", "10").unwrap();
            building.wall_material = Some("Кирпич".into());
            SqliteBuildingRepository::new(pool.clone()).insert(&building).await.unwrap();
            Self { pool, agent, category, district, building }
        }

        pub(crate) fn listing(&self) -> Property {
            let mut property = Property::new(self.category.id, *self.agent.id());
            property.district_id = Some(self.district.id);
            property.building_id = Some(self.building.id);
            property
        }

        pub(crate) fn created(&self, property: &Property) -> PropertyHistory {
            PropertyHistory::record(property.id, *self.agent.id(), HistoryAction::Created, Some("создан".into()))
        }
    }

    #[tokio::test]
    async fn create_then_view_with_relations() {
        let world = World::new().await;
        let repo = SqlitePropertyRepository::new(world.pool.clone());
        let property = world.listing();
        let photos = vec![
            PropertyPhoto::new(property.id, "/uploads/1.jpg".into(), "1.jpg".into(), None, true),
            PropertyPhoto::new(property.id, "/uploads/2.jpg".into(), "2.jpg".into(), None, false),
        ];
        repo.create(&property, &photos, &world.created(&property)).await.unwrap();

        let view = repo.find_view(property.id).await.unwrap().unwrap();
        assert_eq!(view.category.unwrap().name, "2-комнатная");
        assert_eq!(view.district.unwrap().name, "Центр");
        assert_eq!(view.building.unwrap().full_address, "Ленина, 10");
        assert_eq!(view.created_by.unwrap().email, "agent@example.com");
        assert_eq!(view.photos.len(), 2);
        assert!(view.photos[0].is_primary);

        let history = repo.history(property.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user.as_ref().unwrap().name, "agent");
    }

    #[tokio::test]
    async fn list_filters_by_building_and_ranges() {
        let world = World::new().await;
        let repo = SqlitePropertyRepository::new(world.pool.clone());
        for price in [3_000_000.0, 6_000_000.0] {
            let mut property = world.listing();
            property.price = Some(price);
            repo.create(&property, &[], &world.created(&property)).await.unwrap();
        }
        let mut lead = Property::new(world.category.id, *world.agent.id());
        lead.phone = Some("+7 900 123-45-67".into());
        repo.create(&lead, &[], &world.created(&lead)).await.unwrap();

        let filter = PropertyFilter {
            wall_materials: vec!["Кирпич".into()],
            price: NumberRange { min: Some(5_000_000.0), max: None },
            ..Default::default()
        };
        let (page, total) = repo.list(&filter, 1, 50).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(page[0].property.price, Some(6_000_000.0));

        let by_phone = PropertyFilter { phone: Some("123-45".into()), ..Default::default() };
        assert_eq!(repo.list(&by_phone, 1, 50).await.unwrap().1, 1);

        let all = repo.list(&PropertyFilter::default(), 1, 2).await.unwrap();
        assert_eq!(all.1, 3);
        assert_eq!(all.0.len(), 2);
        assert_eq!(all.0[0].property.id, lead.id);
    }

    #[tokio::test]
    async fn page_far_past_the_end_is_empty() {
        let world = World::new().await;
        let repo = SqlitePropertyRepository::new(world.pool.clone());
        let property = world.listing();
        repo.create(&property, &[], &world.created(&property)).await.unwrap();

        let (page, total) = repo.list(&PropertyFilter::default(), i64::MAX, 50).await.unwrap();
        assert_eq!(total, 1);
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_photos_and_writes_history() {
        let world = World::new().await;
        let repo = SqlitePropertyRepository::new(world.pool.clone());
        let property = world.listing();
        let old_photo = PropertyPhoto::new(property.id, "/uploads/old.jpg".into(), "old.jpg".into(), None, true);
        repo.create(&property, &[old_photo], &world.created(&property)).await.unwrap();

        let mut after = property.clone();
        after.status = PropertyStatus::Sold;
        let changes = PropertyChangeSet {
            photos: Some(vec![PropertyPhoto::new(
                property.id,
                "/uploads/new.jpg".into(),
                "new.jpg".into(),
                None,
                true,
            )]),
            history: Some(PropertyHistory::record(
                property.id,
                *world.agent.id(),
                HistoryAction::Updated,
                Some("Изменения: Статус: ACTIVE → SOLD".into()),
            )),
            close_assignments_for: None,
            property: after,
        };
        repo.update(&changes).await.unwrap();

        let view = repo.find_view(property.id).await.unwrap().unwrap();
        assert_eq!(view.property.status, PropertyStatus::Sold);
        assert_eq!(view.photos.len(), 1);
        assert_eq!(view.photos[0].filename, "new.jpg");
        let history = repo.history(property.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].entry.action, HistoryAction::Updated);
    }

    #[tokio::test]
    async fn archive_moves_listing_between_tables() {
        let world = World::new().await;
        let repo = SqlitePropertyRepository::new(world.pool.clone());
        let property = world.listing();
        repo.create(&property, &[], &world.created(&property)).await.unwrap();

        let archived = PropertyHistory::record(property.id, *world.agent.id(), HistoryAction::Archived, None);
        assert!(repo.set_archived(property.id, true, &archived).await.unwrap());
        assert_eq!(repo.list(&PropertyFilter::default(), 1, 50).await.unwrap().1, 0);
        let archive = PropertyFilter { archived: true, ..Default::default() };
        assert_eq!(repo.list(&archive, 1, 50).await.unwrap().1, 1);

        let missing = PropertyHistory::record(Uuid::new_v4(), *world.agent.id(), HistoryAction::Restored, None);
        assert!(!repo.set_archived(missing.property_id, false, &missing).await.unwrap());
    }
}
