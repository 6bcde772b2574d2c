use axum::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use super::db_types::{convert_all, DbCallAssignment};
use super::property_repository::insert_history;
use super::query::push_in;
use crate::application::ports::CallAssignmentRepository;
use crate::domain::{CallAssignment, PropertyHistory, UserId};
use crate::error::Result;

const ASSIGNMENT_SELECT: &str = "SELECT id, property_id, agent_id, is_called, created_at FROM call_assignments";

pub struct SqliteCallAssignmentRepository {
    pool: SqlitePool,
}

impl SqliteCallAssignmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CallAssignmentRepository for SqliteCallAssignmentRepository {
    async fn assign(&self, assignments: &[CallAssignment], history: &[PropertyHistory]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for assignment in assignments {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO call_assignments (id, property_id, agent_id, is_called, created_at)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(assignment.id.to_string())
            .bind(assignment.property_id.to_string())
            .bind(assignment.agent_id.to_string())
            .bind(assignment.is_called)
            .bind(assignment.created_at)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }
        for entry in history {
            insert_history(&mut tx, entry).await?;
        }
        tx.commit().await?;
        Ok(inserted)
    }

    async fn find(&self, id: Uuid) -> Result<Option<CallAssignment>> {
        let row: Option<DbCallAssignment> = sqlx::query_as(&format!("{} WHERE id = ?", ASSIGNMENT_SELECT))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(CallAssignment::try_from).transpose()
    }

    async fn for_agent(&self, agent: &UserId, property_ids: &[Uuid]) -> Result<Vec<CallAssignment>> {
        if property_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut qb = QueryBuilder::<Sqlite>::new(ASSIGNMENT_SELECT);
        qb.push(" WHERE agent_id = ").push_bind(agent.to_string()).push(" AND ");
        push_in(&mut qb, "property_id", property_ids.iter().map(Uuid::to_string));
        qb.push(" ORDER BY created_at DESC");
        let rows: Vec<DbCallAssignment> = qb.build_query_as().fetch_all(&self.pool).await?;
        convert_all(rows)
    }

    async fn confirm(&self, id: Uuid, history: &PropertyHistory) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        insert_history(&mut tx, history).await?;
        sqlx::query("DELETE FROM call_assignments WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
