//! Address autocomplete for the listing form.

use serde::Serialize;
use shared::BuildingSearchQuery;

use crate::application::parse_id;
use crate::application::ports::{BuildingRepository, BuildingSearch};
use crate::application::views::BuildingView;
use crate::domain::address::{parse_address, ParsedAddress};
use crate::error::Result;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Exact,
    Query,
    Recent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingSearchResult {
    pub buildings: Vec<BuildingView>,
    pub total: usize,
    pub search_type: SearchType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_address: Option<ParsedAddress>,
}

/// Separate street and number win over free text; with neither, the most
/// recently added buildings are returned.
pub fn plan(query: &BuildingSearchQuery) -> (BuildingSearch, Option<String>, Option<ParsedAddress>) {
    let given = |value: &Option<String>| value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);

    if let (Some(street), Some(house_number)) = (given(&query.street), given(&query.house_number)) {
        return (BuildingSearch::Exact { street, house_number }, None, None);
    }

    if let Some(term) = given(&query.q).map(|q| q.to_lowercase()) {
        let parsed = parse_address(&term);
        let search = match (&parsed.street, &parsed.house_number) {
            (Some(street), number) if !street.is_empty() => BuildingSearch::Parsed {
                street: street.clone(),
                house_number: number.clone(),
            },
            _ => BuildingSearch::Term(term.clone()),
        };
        return (search, Some(term), Some(parsed));
    }

    (BuildingSearch::Recent, None, None)
}

pub async fn execute<R: BuildingRepository + ?Sized>(repo: &R, query: BuildingSearchQuery) -> Result<BuildingSearchResult> {
    let limit = query.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let district_id = query
        .district_id
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(|d| parse_id(d, "District not found"))
        .transpose()?;

    let (search, term, parsed_address) = plan(&query);
    let search_type = match search {
        BuildingSearch::Exact { .. } => SearchType::Exact,
        BuildingSearch::Recent => SearchType::Recent,
        BuildingSearch::Parsed { .. } | BuildingSearch::Term(_) => SearchType::Query,
    };
    let limit = if search_type == SearchType::Exact { 1 } else { limit };

    let buildings = repo.search(&search, district_id, limit).await?;
    tracing::debug!(?search, found = buildings.len(), "Building search");

    Ok(BuildingSearchResult {
        total: buildings.len(),
        buildings,
        search_type,
        query: term,
        parsed_address,
    })
}
