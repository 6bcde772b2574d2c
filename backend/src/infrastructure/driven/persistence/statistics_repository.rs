use axum::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::db_types::parse_uuid;
use crate::application::ports::StatisticsRepository;
use crate::application::views::{
    property_address, NamedCount, Overview, PersonRef, PriceStats, PropertyBreakdown, PropertyRef, RecentActivity,
    Statistics, StatusCount,
};
use crate::domain::HistoryAction;
use crate::error::{AppError, Result};

const UNKNOWN: &str = "Unknown";

#[derive(Debug, FromRow)]
struct DbActivity {
    id: String,
    property_id: String,
    action: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    user_name: Option<String>,
    user_email: Option<String>,
    street: Option<String>,
    house_number: Option<String>,
    apartment: Option<String>,
}

impl TryFrom<DbActivity> for RecentActivity {
    type Error = AppError;

    fn try_from(row: DbActivity) -> Result<Self> {
        let action = row
            .action
            .parse::<HistoryAction>()
            .map_err(|e| AppError::Database(format!("corrupt history action in database: {}", e)))?;
        let user = match (row.user_name, row.user_email) {
            (Some(name), Some(email)) => Some(PersonRef { name, email }),
            _ => None,
        };
        Ok(RecentActivity {
            id: parse_uuid(&row.id)?,
            action,
            notes: row.notes,
            created_at: row.created_at,
            user,
            property: PropertyRef {
                id: parse_uuid(&row.property_id)?,
                address: property_address(
                    row.street.as_deref(),
                    row.house_number.as_deref(),
                    row.apartment.as_deref(),
                ),
            },
        })
    }
}

pub struct SqliteStatisticsRepository {
    pool: SqlitePool,
}

impl SqliteStatisticsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &str) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn overview(&self) -> Result<Overview> {
        Ok(Overview {
            total_properties: self.count("SELECT COUNT(*) FROM properties").await?,
            active_properties: self
                .count("SELECT COUNT(*) FROM properties WHERE status = 'ACTIVE' AND is_archived = 0")
                .await?,
            sold_properties: self.count("SELECT COUNT(*) FROM properties WHERE status = 'SOLD'").await?,
            rented_properties: self.count("SELECT COUNT(*) FROM properties WHERE status = 'RENTED'").await?,
            total_users: self.count("SELECT COUNT(*) FROM users").await?,
            active_users: self.count("SELECT COUNT(*) FROM users WHERE is_active = 1").await?,
            total_categories: self.count("SELECT COUNT(*) FROM categories WHERE is_active = 1").await?,
            total_districts: self.count("SELECT COUNT(*) FROM districts WHERE is_active = 1").await?,
        })
    }

    /// Non-archived listings grouped by a reference table. Listings whose
    /// reference is missing or inactive are counted under "Unknown".
    async fn grouped(&self, column: &str, table: &str) -> Result<Vec<NamedCount>> {
        let rows: Vec<(Option<String>, i64)> = sqlx::query_as(&format!(
            "SELECT r.name, COUNT(*) FROM properties p
             LEFT JOIN {table} r ON r.id = p.{column} AND r.is_active = 1
             WHERE p.is_archived = 0
             GROUP BY p.{column}
             ORDER BY COUNT(*) DESC",
            table = table,
            column = column
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(name, count)| NamedCount {
                name: name.unwrap_or_else(|| UNKNOWN.to_string()),
                count,
            })
            .collect())
    }

    async fn breakdown(&self) -> Result<PropertyBreakdown> {
        let by_status: Vec<(String, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM properties WHERE is_archived = 0 GROUP BY status ORDER BY COUNT(*) DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(PropertyBreakdown {
            by_status: by_status
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
            by_category: self.grouped("category_id", "categories").await?,
            by_district: self.grouped("district_id", "districts").await?,
        })
    }

    async fn prices(&self) -> Result<PriceStats> {
        let (average, minimum, maximum): (Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
            "SELECT AVG(price), MIN(price), MAX(price) FROM properties
             WHERE price IS NOT NULL AND status = 'ACTIVE' AND is_archived = 0",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(PriceStats {
            average: average.unwrap_or(0.0),
            minimum: minimum.unwrap_or(0.0),
            maximum: maximum.unwrap_or(0.0),
        })
    }

    async fn recent(&self, limit: i64) -> Result<Vec<RecentActivity>> {
        let rows: Vec<DbActivity> = sqlx::query_as(
            "SELECT h.id, h.property_id, h.action, h.notes, h.created_at,
                    u.name AS user_name, u.email AS user_email,
                    b.street, b.house_number, p.apartment
             FROM property_history h
             JOIN properties p ON p.id = h.property_id
             LEFT JOIN buildings b ON b.id = p.building_id
             LEFT JOIN users u ON u.id = h.user_id
             ORDER BY h.created_at DESC, h.rowid DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(RecentActivity::try_from).collect()
    }
}

#[async_trait]
impl StatisticsRepository for SqliteStatisticsRepository {
    async fn snapshot(&self, recent_limit: i64) -> Result<Statistics> {
        Ok(Statistics {
            overview: self.overview().await?,
            properties: self.breakdown().await?,
            prices: self.prices().await?,
            recent_activities: self.recent(recent_limit).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::PropertyRepository;
    use crate::domain::{Property, PropertyStatus};
    use crate::infrastructure::driven::persistence::property_repository::tests::World;
    use crate::infrastructure::driven::persistence::SqlitePropertyRepository;

    #[tokio::test]
    async fn empty_database_has_zero_prices() {
        let world = World::new().await;
        let stats = SqliteStatisticsRepository::new(world.pool.clone()).snapshot(10).await.unwrap();
        assert_eq!(stats.overview.total_users, 1);
        assert_eq!(stats.overview.total_properties, 0);
        assert_eq!(stats.prices, PriceStats::default());
        assert!(stats.recent_activities.is_empty());
    }

    #[tokio::test]
    async fn snapshot_counts_and_prices() {
        let world = World::new().await;
        let properties = SqlitePropertyRepository::new(world.pool.clone());

        let mut cheap = world.listing();
        cheap.price = Some(1_000_000.0);
        cheap.apartment = Some("12".into());
        let mut dear = world.listing();
        dear.price = Some(2_000_001.0);
        let mut sold = world.listing();
        sold.price = Some(9_000_000.0);
        sold.status = PropertyStatus::Sold;
        let lead = Property::new(world.category.id, *world.agent.id());
        for property in [&cheap, &dear, &sold, &lead] {
            properties.create(property, &[], &world.created(property)).await.unwrap();
        }

        let stats = SqliteStatisticsRepository::new(world.pool.clone()).snapshot(2).await.unwrap();
        assert_eq!(stats.overview.total_properties, 4);
        assert_eq!(stats.overview.active_properties, 3);
        assert_eq!(stats.overview.sold_properties, 1);
        assert_eq!(stats.prices.minimum, 1_000_000.0);
        assert_eq!(stats.prices.maximum, 2_000_001.0);
        assert_eq!(stats.prices.average, 1_500_000.5);

        assert_eq!(stats.properties.by_category[0].name, "2-комнатная");
        assert_eq!(stats.properties.by_category[0].count, 4);
        let unknown = stats.properties.by_district.iter().find(|d| d.name == "Unknown").unwrap();
        assert_eq!(unknown.count, 1);
        assert_eq!(stats.properties.by_status.iter().map(|s| s.count).sum::<i64>(), 4);

        assert_eq!(stats.recent_activities.len(), 2);
        assert_eq!(stats.recent_activities[0].property.id, lead.id);
        assert_eq!(stats.recent_activities[0].property.address, None);
        assert_eq!(stats.recent_activities[0].user.as_ref().unwrap().email, "agent@example.com");
    }
}
