use serde::Serialize;
use shared::{BuildingListQuery, Pagination};

use crate::application::ports::{BuildingFilter, BuildingRepository};
use crate::application::views::BuildingView;
use crate::application::parse_id;
use crate::error::Result;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 200;

#[derive(Debug, Serialize)]
pub struct BuildingPage {
    pub buildings: Vec<BuildingView>,
    pub pagination: Pagination,
}

pub async fn execute<R: BuildingRepository + ?Sized>(repo: &R, query: BuildingListQuery) -> Result<BuildingPage> {
    let page = query.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = query.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    let filter = BuildingFilter {
        district_id: non_empty(query.district_id)
            .map(|id| parse_id(&id, "District not found"))
            .transpose()?,
        year_built: query.year_built,
        wall_material: non_empty(query.wall_material),
        total_floors: query.total_floors,
        layout: non_empty(query.layout),
        search: non_empty(query.search),
    };

    let (buildings, total) = repo.list(&filter, page, limit).await?;
    Ok(BuildingPage {
        buildings,
        pagination: Pagination::new(page, limit, total),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::building_repository::MockBuildingRepository;

    #[tokio::test]
    async fn defaults_to_first_page_of_twenty() {
        let mut repo = MockBuildingRepository::new();
        repo.expect_list()
            .withf(|filter, page, limit| *filter == BuildingFilter::default() && *page == 1 && *limit == 20)
            .returning(|_, _, _| Ok((vec![], 41)));

        let result = execute(&repo, BuildingListQuery::default()).await.unwrap();
        assert_eq!(result.pagination.pages, 3);
        assert_eq!(result.pagination.total, 41);
    }

    #[tokio::test]
    async fn blank_filters_are_ignored() {
        let mut repo = MockBuildingRepository::new();
        repo.expect_list()
            .withf(|filter, _, _| filter.search.as_deref() == Some("Ленина") && filter.layout.is_none())
            .returning(|_, _, _| Ok((vec![], 0)));

        let query = BuildingListQuery {
            search: Some(" Ленина ".into()),
            layout: Some("".into()),
            ..Default::default()
        };
        execute(&repo, query).await.unwrap();
    }
}
