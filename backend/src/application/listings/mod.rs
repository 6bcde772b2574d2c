// Listing use cases and the helpers they share

use shared::PhotoInput;
use uuid::Uuid;

use crate::application::ports::{BuildingRepository, DistrictRepository};
use crate::domain::PropertyPhoto;
use crate::error::{AppError, Result};

pub mod commands;

pub(crate) const PROPERTY_NOT_FOUND: &str = "Property not found";

/// Reference-data repositories a listing write validates against.
pub struct Catalog<'a, C: ?Sized, D: ?Sized, B: ?Sized> {
    pub categories: &'a C,
    pub districts: &'a D,
    pub buildings: &'a B,
}

/// Blank strings count as missing.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Photos in submitted order; the first one is the primary photo.
pub(crate) fn photo_set(property_id: Uuid, photos: &[PhotoInput], default_name: impl Fn(usize) -> String) -> Vec<PropertyPhoto> {
    photos
        .iter()
        .enumerate()
        .map(|(index, photo)| {
            let filename = photo
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| default_name(index));
            PropertyPhoto::new(property_id, photo.url.clone(), filename, photo.caption.clone(), index == 0)
        })
        .collect()
}

fn unknown_reference(what: &str) -> AppError {
    AppError::Validation(format!("Указанный {} не существует", what))
}

/// Resolves a submitted district id; unknown ids are a bad request.
pub(crate) async fn existing_district<D: DistrictRepository + ?Sized>(districts: &D, raw: &str) -> Result<Uuid> {
    let id = Uuid::parse_str(raw.trim()).map_err(|_| unknown_reference("район"))?;
    match districts.find_by_id(id).await? {
        Some(_) => Ok(id),
        None => Err(unknown_reference("район")),
    }
}

pub(crate) async fn existing_building<B: BuildingRepository + ?Sized>(buildings: &B, raw: &str) -> Result<Uuid> {
    let id = Uuid::parse_str(raw.trim()).map_err(|_| unknown_reference("адрес"))?;
    match buildings.find_by_id(id).await? {
        Some(_) => Ok(id),
        None => Err(unknown_reference("адрес")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::district_repository::MockDistrictRepository;

    #[test]
    fn first_photo_is_primary_and_names_default() {
        let inputs = vec![
            PhotoInput { url: "/uploads/a.jpg".into(), name: None, caption: None },
            PhotoInput { url: "/uploads/b.jpg".into(), name: Some("b.jpg".into()), caption: Some("кухня".into()) },
        ];
        let photos = photo_set(Uuid::new_v4(), &inputs, |i| format!("photo_{}.jpg", i + 1));
        assert!(photos[0].is_primary && !photos[1].is_primary);
        assert_eq!(photos[0].filename, "photo_1.jpg");
        assert_eq!(photos[1].filename, "b.jpg");
        assert_eq!(photos[1].caption.as_deref(), Some("кухня"));
    }

    #[test]
    fn blank_text_is_missing() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(" 5 ".into())).as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn malformed_district_id_is_a_bad_request() {
        let districts = MockDistrictRepository::new();
        let err = existing_district(&districts, "nope").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
