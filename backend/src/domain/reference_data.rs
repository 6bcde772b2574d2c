//! Typical building attributes by construction period, used to pre-fill the
//! listing form once the year built is known.

use chrono::Datelike;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub wall_material: &'static str,
    pub layout: &'static str,
    pub condition: &'static str,
    pub total_floors: i32,
    pub balcony: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceiling_height: Option<f64>,
}

struct YearRange {
    min_year: i32,
    /// `None` means "up to the current year".
    max_year: Option<i32>,
    description: &'static str,
    data: ReferenceData,
}

#[derive(Default)]
struct DistrictPattern {
    wall_material: Option<&'static str>,
    total_floors: Option<i32>,
    layout: Option<&'static str>,
    condition: Option<&'static str>,
}

fn period(
    min_year: i32,
    max_year: Option<i32>,
    description: &'static str,
    wall_material: &'static str,
    layout: &'static str,
    condition: &'static str,
    total_floors: i32,
    balcony: &'static str,
    ceiling_height: f64,
) -> YearRange {
    YearRange {
        min_year,
        max_year,
        description,
        data: ReferenceData {
            wall_material,
            layout,
            condition,
            total_floors,
            balcony,
            ceiling_height: Some(ceiling_height),
        },
    }
}

static YEAR_BUILT_REFERENCE: Lazy<Vec<YearRange>> = Lazy::new(|| {
    vec![
        period(1950, Some(1960), "Хрущевки, первые панельные дома", "п", "стар", "б/рем", 5, "блк", 2.5),
        period(1961, Some(1970), "Поздние хрущевки, улучшенные панельные дома", "п", "ул", "косм.рем", 5, "блк", 2.6),
        period(1971, Some(1980), "Брежневки, кирпичные и панельные дома", "к", "ул", "рем", 9, "блк", 2.7),
        period(1981, Some(1990), "Поздние советские дома, улучшенная планировка", "к", "ул", "рем", 9, "лдж", 2.7),
        period(1991, Some(2000), "Постсоветские дома, переходный период", "к", "нов", "рем", 5, "лдж", 2.8),
        period(2001, Some(2010), "Современные дома, улучшенные материалы", "к", "нов", "рем", 5, "лдж", 2.9),
        period(2011, Some(2020), "Новостройки, современные технологии", "монолит", "новостр", "евро", 9, "лдж", 3.0),
        period(2021, None, "Современные новостройки, высокие стандарты", "монолит", "новостр", "от застройщика", 9, "лдж", 3.0),
    ]
});

fn district_pattern(district: &str) -> DistrictPattern {
    match district {
        "Бензострой" | "Рабочий" | "Вокзал" => DistrictPattern {
            wall_material: Some("к"),
            total_floors: Some(5),
            condition: Some("рем"),
            ..Default::default()
        },
        "20 мкр" => DistrictPattern {
            wall_material: Some("п"),
            total_floors: Some(5),
            layout: Some("ул"),
            ..Default::default()
        },
        "ДСР" => DistrictPattern {
            wall_material: Some("к"),
            total_floors: Some(9),
            condition: Some("рем"),
            ..Default::default()
        },
        _ => DistrictPattern::default(),
    }
}

fn find_period(year: i32) -> Option<&'static YearRange> {
    let current_year = chrono::Utc::now().year();
    YEAR_BUILT_REFERENCE
        .iter()
        .find(|range| year >= range.min_year && year <= range.max_year.unwrap_or(current_year))
}

pub fn reference_by_year(year: i32) -> Option<ReferenceData> {
    find_period(year).map(|range| range.data.clone())
}

pub fn period_description(year: i32) -> Option<&'static str> {
    find_period(year).map(|range| range.description)
}

/// Period data with district specifics layered on top.
pub fn combined_reference(year: i32, district: Option<&str>) -> Option<ReferenceData> {
    let mut data = reference_by_year(year)?;
    if let Some(district) = district {
        let pattern = district_pattern(district);
        if let Some(wall_material) = pattern.wall_material {
            data.wall_material = wall_material;
        }
        if let Some(total_floors) = pattern.total_floors {
            data.total_floors = total_floors;
        }
        if let Some(layout) = pattern.layout {
            data.layout = layout;
        }
        if let Some(condition) = pattern.condition {
            data.condition = condition;
        }
    }
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_period_by_year() {
        let data = reference_by_year(1975).unwrap();
        assert_eq!(data.wall_material, "к");
        assert_eq!(data.total_floors, 9);
        assert_eq!(period_description(1955), Some("Хрущевки, первые панельные дома"));
    }

    #[test]
    fn unknown_years_have_no_reference() {
        assert!(reference_by_year(1900).is_none());
        assert!(reference_by_year(chrono::Utc::now().year() + 1).is_none());
    }

    #[test]
    fn current_year_is_covered() {
        assert!(reference_by_year(chrono::Utc::now().year()).is_some());
    }

    #[test]
    fn district_overrides_period() {
        let data = combined_reference(1975, Some("20 мкр")).unwrap();
        assert_eq!(data.wall_material, "п");
        assert_eq!(data.total_floors, 5);
        assert_eq!(data.layout, "ул");
        assert_eq!(data.condition, "рем");

        let unknown = combined_reference(1975, Some("Центр")).unwrap();
        assert_eq!(unknown, reference_by_year(1975).unwrap());
    }
}
