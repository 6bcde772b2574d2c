//! Query-building helpers shared by the repositories.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

/// Appends `column IN (?, ?, ...)`. Callers skip empty lists.
pub(crate) fn push_in<'a>(qb: &mut QueryBuilder<'a, Sqlite>, column: &str, values: impl IntoIterator<Item = String>) {
    qb.push(column).push(" IN (");
    let mut separated = qb.separated(", ");
    for value in values {
        separated.push_bind(value);
    }
    separated.push_unseparated(")");
}

/// Appends `(instr(c1, ?) > 0 OR instr(c2, ?) > 0 ...)` over every
/// column/needle pair: a case-sensitive substring match.
pub(crate) fn push_contains_any<'a>(qb: &mut QueryBuilder<'a, Sqlite>, columns: &[&str], needles: &[String]) {
    qb.push("(");
    let mut first = true;
    for needle in needles {
        for column in columns {
            if !first {
                qb.push(" OR ");
            }
            first = false;
            qb.push("instr(").push(*column).push(", ").push_bind(needle.clone()).push(") > 0");
        }
    }
    qb.push(")");
}

/// Loads the rows of `select` whose `column` is one of `ids`; `order` is
/// appended verbatim.
pub(crate) async fn fetch_by_ids<R>(
    pool: &SqlitePool,
    select: &str,
    column: &str,
    ids: Vec<String>,
    order: &str,
) -> sqlx::Result<Vec<R>>
where
    R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb = QueryBuilder::<Sqlite>::new(select);
    qb.push(" WHERE ");
    push_in(&mut qb, column, ids);
    qb.push(order);
    qb.build_query_as::<R>().fetch_all(pool).await
}

/// Rows to skip for a 1-based page. Saturates instead of overflowing on
/// absurd page numbers.
pub(crate) fn page_offset(page: i64, limit: i64) -> i64 {
    page.max(1).saturating_sub(1).saturating_mul(limit.max(0))
}

/// Distinct values, first occurrence kept.
pub(crate) fn distinct(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_offset_saturates() {
        assert_eq!(page_offset(1, 50), 0);
        assert_eq!(page_offset(3, 20), 40);
        assert_eq!(page_offset(0, 20), 0);
        assert_eq!(page_offset(i64::MAX, 50), i64::MAX);
    }

    #[test]
    fn distinct_keeps_first_occurrence() {
        let values = ["b", "a", "b", "c", "a"].map(String::from);
        assert_eq!(distinct(values), vec!["b", "a", "c"]);
    }
}
