use shared::NamedEntityRequest;

use crate::application::ports::CategoryRepository;
use crate::domain::Category;
use crate::error::{AppError, Result};

pub async fn list<R: CategoryRepository + ?Sized>(repo: &R) -> Result<Vec<Category>> {
    repo.list_active().await
}

pub async fn create<R: CategoryRepository + ?Sized>(repo: &R, request: NamedEntityRequest) -> Result<Category> {
    let category = Category::new(request.name.unwrap_or_default(), request.description)
        .map_err(AppError::Validation)?;
    if repo.find_by_name(&category.name).await?.is_some() {
        return Err(AppError::Conflict("Category with this name already exists".to_string()));
    }
    repo.insert(&category).await?;
    tracing::info!(category_id = %category.id, name = %category.name, "Category created");
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::category_repository::MockCategoryRepository;

    #[tokio::test]
    async fn duplicate_name_conflicts() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_name()
            .returning(|name| Ok(Some(Category::new(name.to_string(), None).unwrap())));
        repo.expect_insert().never();
        let req = NamedEntityRequest {
            name: Some("1К".into()),
            description: None,
        };
        assert!(matches!(create(&repo, req).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let repo = MockCategoryRepository::new();
        let req = NamedEntityRequest {
            name: Some("   ".into()),
            description: None,
        };
        assert!(matches!(create(&repo, req).await, Err(AppError::Validation(_))));
    }
}
