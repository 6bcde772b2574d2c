//! Districts and categories: small named lookup tables with identical
//! storage.

use axum::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db_types::{convert_all, DbNamedEntity};
use crate::application::ports::{CategoryRepository, DistrictRepository};
use crate::domain::{Category, District};
use crate::error::Result;

const NAMED_COLUMNS: &str = "id, name, description, is_active, created_at";

async fn list_active(pool: &SqlitePool, table: &str) -> Result<Vec<DbNamedEntity>> {
    let sql = format!("SELECT {} FROM {} WHERE is_active = 1 ORDER BY name ASC", NAMED_COLUMNS, table);
    Ok(sqlx::query_as(&sql).fetch_all(pool).await?)
}

async fn find_where(pool: &SqlitePool, table: &str, column: &str, value: String) -> Result<Option<DbNamedEntity>> {
    let sql = format!("SELECT {} FROM {} WHERE {} = ?", NAMED_COLUMNS, table, column);
    Ok(sqlx::query_as(&sql).bind(value).fetch_optional(pool).await?)
}

async fn insert(
    pool: &SqlitePool,
    table: &str,
    id: Uuid,
    name: &str,
    description: Option<&str>,
    is_active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
) -> Result<()> {
    let sql = format!(
        "INSERT INTO {} (id, name, description, is_active, created_at) VALUES (?, ?, ?, ?, ?)",
        table
    );
    sqlx::query(&sql)
        .bind(id.to_string())
        .bind(name)
        .bind(description)
        .bind(is_active)
        .bind(created_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub struct SqliteDistrictRepository {
    pool: SqlitePool,
}

impl SqliteDistrictRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DistrictRepository for SqliteDistrictRepository {
    async fn list_active(&self) -> Result<Vec<District>> {
        convert_all(list_active(&self.pool, "districts").await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<District>> {
        find_where(&self.pool, "districts", "id", id.to_string())
            .await?
            .map(District::try_from)
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<District>> {
        find_where(&self.pool, "districts", "name", name.to_string())
            .await?
            .map(District::try_from)
            .transpose()
    }

    async fn insert(&self, district: &District) -> Result<()> {
        insert(
            &self.pool,
            "districts",
            district.id,
            &district.name,
            district.description.as_deref(),
            district.is_active,
            district.created_at,
        )
        .await
    }
}

pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn list_active(&self) -> Result<Vec<Category>> {
        convert_all(list_active(&self.pool, "categories").await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        find_where(&self.pool, "categories", "id", id.to_string())
            .await?
            .map(Category::try_from)
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        find_where(&self.pool, "categories", "name", name.to_string())
            .await?
            .map(Category::try_from)
            .transpose()
    }

    async fn insert(&self, category: &Category) -> Result<()> {
        insert(
            &self.pool,
            "categories",
            category.id,
            &category.name,
            category.description.as_deref(),
            category.is_active,
            category.created_at,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::test_support::memory_pool;

    #[tokio::test]
    async fn districts_list_active_by_name() {
        let repo = SqliteDistrictRepository::new(memory_pool().await);
        for name in ["Центр", "Автозаводский", "Заречный"] {
            repo.insert(&District::new(name.into(), None).unwrap()).await.unwrap();
        }
        let mut closed = District::new("Старый".into(), None).unwrap();
        closed.is_active = false;
        repo.insert(&closed).await.unwrap();

        let names: Vec<String> = repo.list_active().await.unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Автозаводский", "Заречный", "Центр"]);
    }

    #[tokio::test]
    async fn category_names_are_unique() {
        let repo = SqliteCategoryRepository::new(memory_pool().await);
        repo.insert(&Category::new("Дом".into(), None).unwrap()).await.unwrap();
        let err = repo
            .insert(&Category::new("Дом".into(), Some("дубль".into())).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(repo.find_by_name("Дом").await.unwrap().is_some());
    }
}
