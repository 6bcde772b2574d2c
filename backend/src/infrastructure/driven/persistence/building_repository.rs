use std::collections::HashMap;

use axum::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use super::db_types::{DbBuilding, DbNamedEntity};
use super::query::{distinct, fetch_by_ids, page_offset, push_contains_any};
use crate::application::ports::{BuildingFilter, BuildingRepository, BuildingSearch};
use crate::application::views::BuildingView;
use crate::domain::address::capitalize_first;
use crate::domain::{Building, District};
use crate::error::Result;

pub(crate) const BUILDING_SELECT: &str = "SELECT b.id, b.district_id, b.street, b.house_number, b.full_address, \
     b.total_floors, b.year_built, b.wall_material, b.entrance_count, b.building_type, b.has_elevator, \
     b.has_garbage_chute, b.heating_type, b.layout, b.latitude, b.longitude, b.data_source, \
     b.confidence_level, b.is_verified, b.is_active, b.created_at, b.updated_at FROM buildings b";

const BY_CONFIDENCE: &str = " ORDER BY CASE b.confidence_level WHEN 'HIGH' THEN 0 WHEN 'MEDIUM' THEN 1 ELSE 2 END, \
     b.full_address ASC";

const NEWEST_FIRST: &str = " ORDER BY b.created_at DESC, b.rowid DESC";

/// The needle as typed plus its capitalised form.
fn needles(term: &str) -> Vec<String> {
    distinct([term.to_string(), capitalize_first(term)])
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &BuildingFilter) {
    qb.push(" WHERE b.is_active = 1");
    if let Some(district_id) = filter.district_id {
        qb.push(" AND b.district_id = ").push_bind(district_id.to_string());
    }
    if let Some(year) = filter.year_built {
        qb.push(" AND b.year_built = ").push_bind(year);
    }
    if let Some(material) = &filter.wall_material {
        qb.push(" AND b.wall_material = ").push_bind(material.clone());
    }
    if let Some(floors) = filter.total_floors {
        qb.push(" AND b.total_floors = ").push_bind(floors);
    }
    if let Some(layout) = &filter.layout {
        qb.push(" AND b.layout = ").push_bind(layout.clone());
    }
    if let Some(search) = &filter.search {
        qb.push(" AND ");
        push_contains_any(qb, &["b.full_address", "b.street", "b.house_number"], &[search.clone()]);
    }
}

pub struct SqliteBuildingRepository {
    pool: SqlitePool,
}

impl SqliteBuildingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Attaches each building's district.
    pub(crate) async fn views(&self, rows: Vec<DbBuilding>) -> Result<Vec<BuildingView>> {
        let buildings = rows.into_iter().map(Building::try_from).collect::<Result<Vec<_>>>()?;
        let district_ids = distinct(buildings.iter().map(|b| b.district_id.to_string()));
        let districts: HashMap<Uuid, District> = fetch_by_ids::<DbNamedEntity>(
            &self.pool,
            "SELECT id, name, description, is_active, created_at FROM districts",
            "id",
            district_ids,
            "",
        )
        .await?
        .into_iter()
        .map(|row| District::try_from(row).map(|d| (d.id, d)))
        .collect::<Result<_>>()?;

        Ok(buildings
            .into_iter()
            .map(|building| BuildingView {
                district: districts.get(&building.district_id).cloned(),
                building,
            })
            .collect())
    }

    async fn fetch(&self, mut qb: QueryBuilder<'_, Sqlite>) -> Result<Vec<BuildingView>> {
        let rows: Vec<DbBuilding> = qb.build_query_as().fetch_all(&self.pool).await?;
        self.views(rows).await
    }
}

#[async_trait]
impl BuildingRepository for SqliteBuildingRepository {
    async fn list(&self, filter: &BuildingFilter, page: i64, limit: i64) -> Result<(Vec<BuildingView>, i64)> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM buildings b");
        push_filter(&mut count, filter);
        let (total,): (i64,) = count.build_query_as().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::<Sqlite>::new(BUILDING_SELECT);
        push_filter(&mut qb, filter);
        qb.push(NEWEST_FIRST)
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(page_offset(page, limit));
        Ok((self.fetch(qb).await?, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Building>> {
        let row: Option<DbBuilding> = sqlx::query_as(&format!("{} WHERE b.id = ?", BUILDING_SELECT))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Building::try_from).transpose()
    }

    async fn find_view(&self, id: Uuid) -> Result<Option<BuildingView>> {
        let mut qb = QueryBuilder::<Sqlite>::new(BUILDING_SELECT);
        qb.push(" WHERE b.id = ").push_bind(id.to_string());
        Ok(self.fetch(qb).await?.into_iter().next())
    }

    async fn find_by_address(&self, district_id: Uuid, street: &str, house_number: &str) -> Result<Option<Building>> {
        let row: Option<DbBuilding> = sqlx::query_as(&format!(
            "{} WHERE b.district_id = ? AND b.street = ? AND b.house_number = ?",
            BUILDING_SELECT
        ))
        .bind(district_id.to_string())
        .bind(street)
        .bind(house_number)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Building::try_from).transpose()
    }

    async fn insert(&self, b: &Building) -> Result<()> {
        sqlx::query(
            "INSERT INTO buildings (id, district_id, street, house_number, full_address, total_floors, year_built,
                wall_material, entrance_count, building_type, has_elevator, has_garbage_chute, heating_type, layout,
                latitude, longitude, data_source, confidence_level, is_verified, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(b.id.to_string())
        .bind(b.district_id.to_string())
        .bind(&b.street)
        .bind(&b.house_number)
        .bind(&b.full_address)
        .bind(b.total_floors)
        .bind(b.year_built)
        .bind(&b.wall_material)
        .bind(b.entrance_count)
        .bind(&b.building_type)
        .bind(b.has_elevator)
        .bind(b.has_garbage_chute)
        .bind(&b.heating_type)
        .bind(&b.layout)
        .bind(b.latitude)
        .bind(b.longitude)
        .bind(&b.data_source)
        .bind(b.confidence_level.as_db_str())
        .bind(b.is_verified)
        .bind(b.is_active)
        .bind(b.created_at)
        .bind(b.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, b: &Building) -> Result<()> {
        sqlx::query(
            "UPDATE buildings SET district_id = ?, street = ?, house_number = ?, full_address = ?, total_floors = ?,
                year_built = ?, wall_material = ?, entrance_count = ?, building_type = ?, has_elevator = ?,
                has_garbage_chute = ?, heating_type = ?, layout = ?, latitude = ?, longitude = ?, data_source = ?,
                confidence_level = ?, is_verified = ?, is_active = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(b.district_id.to_string())
        .bind(&b.street)
        .bind(&b.house_number)
        .bind(&b.full_address)
        .bind(b.total_floors)
        .bind(b.year_built)
        .bind(&b.wall_material)
        .bind(b.entrance_count)
        .bind(&b.building_type)
        .bind(b.has_elevator)
        .bind(b.has_garbage_chute)
        .bind(&b.heating_type)
        .bind(&b.layout)
        .bind(b.latitude)
        .bind(b.longitude)
        .bind(&b.data_source)
        .bind(b.confidence_level.as_db_str())
        .bind(b.is_verified)
        .bind(b.is_active)
        .bind(b.updated_at)
        .bind(b.id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("UPDATE buildings SET is_active = 0, updated_at = ? WHERE id = ?")
            .bind(chrono::Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, search: &BuildingSearch, district_id: Option<Uuid>, limit: i64) -> Result<Vec<BuildingView>> {
        let mut qb = QueryBuilder::<Sqlite>::new(BUILDING_SELECT);
        qb.push(" WHERE b.is_active = 1");
        if let Some(district_id) = district_id {
            qb.push(" AND b.district_id = ").push_bind(district_id.to_string());
        }

        match search {
            BuildingSearch::Exact { street, house_number } => {
                qb.push(" AND ");
                push_contains_any(&mut qb, &["b.street"], &[street.clone()]);
                qb.push(" AND ");
                push_contains_any(&mut qb, &["b.house_number"], &[house_number.clone()]);
                qb.push(BY_CONFIDENCE);
            }
            BuildingSearch::Parsed { street, house_number } => {
                qb.push(" AND ");
                push_contains_any(&mut qb, &["b.street", "b.full_address"], &needles(street));
                if let Some(number) = house_number {
                    qb.push(" AND ");
                    push_contains_any(&mut qb, &["b.house_number"], &[number.clone()]);
                }
                qb.push(BY_CONFIDENCE);
            }
            BuildingSearch::Term(term) => {
                qb.push(" AND ");
                push_contains_any(&mut qb, &["b.street", "b.full_address", "b.house_number"], &needles(term));
                qb.push(BY_CONFIDENCE);
            }
            BuildingSearch::Recent => {
                qb.push(NEWEST_FIRST);
            }
        }
        qb.push(" LIMIT ").push_bind(limit);
        self.fetch(qb).await
    }

    async fn in_district(&self, district_id: Uuid) -> Result<Vec<BuildingView>> {
        let mut qb = QueryBuilder::<Sqlite>::new(BUILDING_SELECT);
        qb.push(" WHERE b.is_active = 1 AND b.district_id = ")
            .push_bind(district_id.to_string())
            .push(" ORDER BY b.street ASC, b.house_number ASC");
        self.fetch(qb).await
    }

    async fn active_at_address(&self, district_id: Uuid, street: &str, house_number: &str) -> Result<Option<BuildingView>> {
        let mut qb = QueryBuilder::<Sqlite>::new(BUILDING_SELECT);
        qb.push(" WHERE b.is_active = 1 AND b.district_id = ")
            .push_bind(district_id.to_string())
            .push(" AND b.street = ")
            .push_bind(street.to_string())
            .push(" AND b.house_number = ")
            .push_bind(house_number.to_string())
            .push(" LIMIT 1");
        Ok(self.fetch(qb).await?.into_iter().next())
    }
}
