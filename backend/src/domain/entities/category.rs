use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Category whose listings are contact-only realtor leads.
pub const REALTOR_CATEGORY: &str = "РИЭЛТОР";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, description: Option<String>) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.filter(|d| !d.trim().is_empty()),
            is_active: true,
            created_at: Utc::now(),
        })
    }

    pub fn is_realtor(&self) -> bool {
        self.name == REALTOR_CATEGORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realtor_category_is_recognized_by_name() {
        let realtor = Category::new(REALTOR_CATEGORY.into(), None).unwrap();
        let flat = Category::new("2-комнатная".into(), None).unwrap();
        assert!(realtor.is_realtor());
        assert!(!flat.is_realtor());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(Category::new("  ".into(), None).is_err());
    }
}
