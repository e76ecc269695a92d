use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::stores::CategoryStore;

/// Service for category operations. Single-row CRUD only; no multi-statement
/// coordination happens here.
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    /// Create a new category. The unique-name business invariant is enforced
    /// here; the schema's unique index backs it up.
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        if self.store.fetch_by_name(&dto.name).await?.is_some() {
            return Err(AppError::Conflict(
                "Category with this name already exists".to_string(),
            ));
        }

        let category = self.store.insert(&dto.name, &dto.description).await?;

        tracing::info!("Category created: id={}, name={}", category.id, category.name);

        Ok(category.into())
    }

    /// Get category by id
    pub async fn get(&self, id: i64) -> Result<CategoryResponseDto> {
        self.store
            .fetch(id)
            .await?
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    /// List categories ordered by name, plus the total row count for the
    /// response meta.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<(Vec<CategoryResponseDto>, i64)> {
        let (categories, total) = self.store.fetch_page(limit, offset).await?;
        Ok((categories.into_iter().map(|c| c.into()).collect(), total))
    }

    /// Update a category's name and description
    pub async fn update(&self, id: i64, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let existing = self
            .store
            .fetch(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        // Renaming onto another category's name is a conflict.
        if dto.name != existing.name && self.store.fetch_by_name(&dto.name).await?.is_some() {
            return Err(AppError::Conflict(
                "Category with this name already exists".to_string(),
            ));
        }

        self.store
            .update(id, &dto.name, &dto.description)
            .await?
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    /// Delete a category by id
    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.store.delete(id).await? == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        tracing::info!("Category deleted: id={}", id);

        Ok(())
    }

    /// List the categories associated with one news item, ordered by name
    pub async fn list_by_news(&self, news_id: i64) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.store.fetch_by_news(news_id).await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::stores::InMemoryCategoryStore;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(InMemoryCategoryStore::new()))
    }

    fn create_dto(name: &str) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            description: String::new(),
        }
    }

    fn update_dto(name: &str, description: &str) -> UpdateCategoryDto {
        UpdateCategoryDto {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_name_is_conflict() {
        let service = service();
        service.create(create_dto("tech")).await.unwrap();

        let err = service.create(create_dto("tech")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let service = service();

        let err = service.get(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let service = service();

        let err = service.update(42, update_dto("tech", "")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_rename_onto_existing_name_is_conflict() {
        let service = service();
        service.create(create_dto("tech")).await.unwrap();
        let sport = service.create(create_dto("sport")).await.unwrap();

        let err = service
            .update(sport.id, update_dto("tech", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_keeping_own_name_succeeds() {
        let service = service();
        let tech = service.create(create_dto("tech")).await.unwrap();

        let updated = service
            .update(tech.id, update_dto("tech", "technology news"))
            .await
            .unwrap();
        assert_eq!(updated.name, "tech");
        assert_eq!(updated.description, "technology news");
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let service = service();

        let err = service.delete(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_category() {
        let service = service();
        let tech = service.create(create_dto("tech")).await.unwrap();

        service.delete(tech.id).await.unwrap();

        let err = service.get(tech.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let (categories, total) = service.list(10, 0).await.unwrap();
        assert!(categories.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_list_is_name_ordered_with_full_total() {
        let service = service();
        service.create(create_dto("world")).await.unwrap();
        service.create(create_dto("art")).await.unwrap();
        service.create(create_dto("sport")).await.unwrap();

        let (page, total) = service.list(2, 0).await.unwrap();
        assert_eq!(total, 3);
        let names: Vec<&str> = page.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["art", "sport"]);
    }

    #[tokio::test]
    async fn test_list_by_news_returns_linked_categories() {
        let store = Arc::new(InMemoryCategoryStore::new());
        let service = CategoryService::new(Arc::clone(&store) as Arc<dyn CategoryStore>);

        let tech = service.create(create_dto("tech")).await.unwrap();
        let art = service.create(create_dto("art")).await.unwrap();
        service.create(create_dto("sport")).await.unwrap();
        store.link_news(5, &[tech.id, art.id]);

        let linked = service.list_by_news(5).await.unwrap();
        let names: Vec<&str> = linked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["art", "tech"]);

        assert!(service.list_by_news(99).await.unwrap().is_empty());
    }
}
