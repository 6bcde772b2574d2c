use std::collections::HashMap;

use serde::Serialize;
use shared::PropertyListQuery;
use uuid::Uuid;

use crate::application::ports::{CallAssignmentRepository, NumberRange, PropertyFilter, PropertyRepository};
use crate::application::views::PropertyView;
use crate::application::Actor;
use crate::error::Result;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPage {
    pub properties: Vec<PropertyView>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total: i64,
}

fn list(value: &Option<String>) -> Vec<String> {
    value
        .as_deref()
        .map(|v| v.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect())
        .unwrap_or_default()
}

fn text(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// `"min,max"`; either side may be empty or missing.
fn range(value: &Option<String>) -> NumberRange {
    let Some(raw) = value.as_deref() else {
        return NumberRange::default();
    };
    let mut parts = raw.splitn(2, ',').map(|p| p.trim().parse::<f64>().ok().filter(|n| n.is_finite()));
    NumberRange {
        min: parts.next().flatten(),
        max: parts.next().flatten(),
    }
}

pub fn filter_from_query(query: &PropertyListQuery) -> PropertyFilter {
    PropertyFilter {
        archived: query.include_archived.unwrap_or(false),
        category_ids: list(&query.category),
        district_ids: list(&query.district),
        statuses: list(&query.status),
        layouts: list(&query.layout),
        wall_materials: list(&query.wall_material),
        balcony_types: list(&query.balcony_type),
        p_fields: list(&query.p_field),
        condition: list(&query.condition).into_iter().next(),
        source: list(&query.source).into_iter().next(),
        price: range(&query.price),
        total_area: range(&query.total_area),
        kitchen_area: range(&query.kitchen_area),
        floor: range(&query.floor),
        year_built: range(&query.year_built),
        phone: text(&query.phone),
        street: text(&query.street),
        house_number: text(&query.house_number),
        description: text(&query.description),
        exclude_ids: Vec::new(),
    }
}

/// Agents see listings they were asked to phone on top of every page, and
/// each listing carries that agent's call assignments.
pub async fn execute<P, C>(properties: &P, calls: &C, actor: &Actor, query: PropertyListQuery) -> Result<PropertyPage>
where
    P: PropertyRepository + ?Sized,
    C: CallAssignmentRepository + ?Sized,
{
    let page = query.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = query.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let mut filter = filter_from_query(&query);

    let pinned = if actor.is_agent() {
        properties.pinned_for(&actor.id, filter.archived).await?
    } else {
        Vec::new()
    };
    filter.exclude_ids = pinned.iter().map(|view| view.property.id).collect();

    let (regular, total) = properties.list(&filter, page, limit).await?;
    let mut listed: Vec<PropertyView> = pinned.into_iter().chain(regular).collect();

    if actor.is_agent() && !listed.is_empty() {
        let ids: Vec<Uuid> = listed.iter().map(|view| view.property.id).collect();
        let mut by_property: HashMap<Uuid, Vec<_>> = HashMap::new();
        for assignment in calls.for_agent(&actor.id, &ids).await? {
            by_property.entry(assignment.property_id).or_default().push(assignment);
        }
        for view in &mut listed {
            view.call_assignments = Some(by_property.remove(&view.property.id).unwrap_or_default());
        }
    }

    Ok(PropertyPage {
        properties: listed,
        total_pages: (total + limit - 1) / limit,
        current_page: page,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::call_assignment_repository::MockCallAssignmentRepository;
    use crate::application::ports::property_repository::MockPropertyRepository;
    use crate::domain::{CallAssignment, Property, UserId, UserRole};

    fn view() -> PropertyView {
        PropertyView {
            property: Property::new(Uuid::new_v4(), UserId::new()),
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

    #[test]
    fn query_lists_and_ranges_are_parsed() {
        let query = PropertyListQuery {
            status: Some("ACTIVE, SOLD,,".into()),
            condition: Some("рем,евро".into()),
            price: Some("1000000,".into()),
            floor: Some(",5".into()),
            total_area: Some("abc,70".into()),
            phone: Some("  ".into()),
            ..Default::default()
        };
        let filter = filter_from_query(&query);
        assert_eq!(filter.statuses, vec!["ACTIVE", "SOLD"]);
        assert_eq!(filter.condition.as_deref(), Some("рем"));
        assert_eq!(filter.price, NumberRange { min: Some(1_000_000.0), max: None });
        assert_eq!(filter.floor, NumberRange { min: None, max: Some(5.0) });
        assert_eq!(filter.total_area, NumberRange { min: None, max: Some(70.0) });
        assert!(filter.phone.is_none());
        assert!(!filter.archived);
    }

    #[tokio::test]
    async fn manager_gets_plain_page() {
        let mut properties = MockPropertyRepository::new();
        properties.expect_pinned_for().never();
        properties
            .expect_list()
            .withf(|filter, page, limit| filter.exclude_ids.is_empty() && *page == 1 && *limit == 50)
            .returning(|_, _, _| Ok((vec![view()], 101)));
        let mut calls = MockCallAssignmentRepository::new();
        calls.expect_for_agent().never();

        let actor = Actor { id: UserId::new(), role: UserRole::Manager };
        let page = execute(&properties, &calls, &actor, PropertyListQuery::default()).await.unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total, 101);
        assert!(page.properties[0].call_assignments.is_none());
    }

    #[tokio::test]
    async fn agent_sees_pinned_first_with_assignments() {
        let agent = UserId::new();
        let pinned = view();
        let pinned_id = pinned.property.id;
        let regular = view();

        let mut properties = MockPropertyRepository::new();
        properties
            .expect_pinned_for()
            .withf(move |id, archived| *id == agent && !archived)
            .returning(move |_, _| Ok(vec![pinned.clone()]));
        properties
            .expect_list()
            .withf(move |filter, _, _| filter.exclude_ids == vec![pinned_id])
            .returning(move |_, _, _| Ok((vec![regular.clone()], 1)));
        let mut calls = MockCallAssignmentRepository::new();
        calls
            .expect_for_agent()
            .returning(move |agent, _| Ok(vec![CallAssignment::new(pinned_id, *agent)]));

        let actor = Actor { id: agent, role: UserRole::Agent };
        let page = execute(&properties, &calls, &actor, PropertyListQuery::default()).await.unwrap();
        assert_eq!(page.properties.len(), 2);
        assert_eq!(page.properties[0].property.id, pinned_id);
        assert_eq!(page.properties[0].call_assignments.as_ref().unwrap().len(), 1);
        assert_eq!(page.properties[1].call_assignments, Some(vec![]));
    }
}
