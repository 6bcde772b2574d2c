use serde::Serialize;
use shared::YearReferenceQuery;

use crate::domain::reference_data::{combined_reference, period_description, ReferenceData};
use crate::error::{AppError, Result};

#[derive(Debug, Serialize)]
pub struct YearReference {
    pub year: i32,
    pub description: &'static str,
    pub data: ReferenceData,
}

pub fn execute(query: YearReferenceQuery) -> Result<YearReference> {
    let district = query.district.as_deref().map(str::trim).filter(|d| !d.is_empty());
    let (Some(data), Some(description)) = (combined_reference(query.year, district), period_description(query.year)) else {
        return Err(AppError::NotFound(format!("No reference data for year {}", query.year)));
    };
    Ok(YearReference {
        year: query.year,
        description,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_year_with_district_override() {
        let reference = execute(YearReferenceQuery {
            year: 1965,
            district: Some("ДСР".into()),
        })
        .unwrap();
        assert_eq!(reference.data.total_floors, 9);
        assert_eq!(reference.data.wall_material, "к");
        assert_eq!(reference.data.layout, "ул");
    }

    #[test]
    fn unknown_year_is_not_found() {
        let err = execute(YearReferenceQuery {
            year: 1800,
            district: None,
        })
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
