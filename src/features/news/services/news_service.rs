use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::news::models::{NewsItem, NewsPatch};
use crate::features::news::stores::NewsStore;

/// Service front for the news engines: argument checks happen here, the
/// transactional and query work happens in the store.
pub struct NewsService {
    store: Arc<dyn NewsStore>,
}

impl NewsService {
    pub fn new(store: Arc<dyn NewsStore>) -> Self {
        Self { store }
    }

    /// Patch scalar fields and replace the category set for one news item.
    ///
    /// A zero or negative id fails before any I/O happens. On success there
    /// is no returned entity; callers re-fetch via [`Self::get_news_list`]
    /// if they need the updated view.
    pub async fn update_news(&self, patch: NewsPatch) -> Result<()> {
        if patch.id <= 0 {
            return Err(AppError::BadRequest("Invalid news id".to_string()));
        }

        self.store.patch_news(patch).await
    }

    /// One identity-ordered page of hydrated news items. `limit`/`offset`
    /// are assumed sanitized by the transport layer.
    pub async fn get_news_list(&self, limit: i64, offset: i64) -> Result<Vec<NewsItem>> {
        self.store.list_news(limit, offset).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::news::stores::InMemoryNewsStore;

    fn seeded_service() -> (Arc<InMemoryNewsStore>, NewsService) {
        let store = Arc::new(InMemoryNewsStore::new());
        store.seed(5, "A", "B", &[1, 2]);
        let service = NewsService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_zero_id_rejected_before_store() {
        let (_, service) = seeded_service();
        let err = service
            .update_news(NewsPatch {
                id: 0,
                title: Some("T".to_string()),
                content: None,
                categories: vec![1],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_and_mutates_nothing() {
        let (_, service) = seeded_service();
        let err = service
            .update_news(NewsPatch {
                id: 999999,
                title: Some("T".to_string()),
                content: Some("C".to_string()),
                categories: vec![1],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // The existing item is untouched by the failed call.
        let items = service.get_news_list(10, 0).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "A");
        assert_eq!(items[0].categories, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_partial_patch_leaves_unsupplied_fields() {
        let (_, service) = seeded_service();
        service
            .update_news(NewsPatch {
                id: 5,
                title: None,
                content: Some("NewContent".to_string()),
                categories: vec![1],
            })
            .await
            .unwrap();

        let items = service.get_news_list(10, 0).await.unwrap();
        assert_eq!(items[0].title, "A");
        assert_eq!(items[0].content, "NewContent");
        assert_eq!(items[0].categories, vec![1]);
    }

    #[tokio::test]
    async fn test_explicit_empty_string_clears_field() {
        let (_, service) = seeded_service();
        service
            .update_news(NewsPatch {
                id: 5,
                title: Some(String::new()),
                content: None,
                categories: vec![1, 2],
            })
            .await
            .unwrap();

        let items = service.get_news_list(10, 0).await.unwrap();
        assert_eq!(items[0].title, "");
        assert_eq!(items[0].content, "B");
    }

    #[tokio::test]
    async fn test_replace_is_idempotent_and_collapses_duplicates() {
        let (_, service) = seeded_service();
        for _ in 0..2 {
            service
                .update_news(NewsPatch {
                    id: 5,
                    title: None,
                    content: None,
                    categories: vec![7, 7, 9],
                })
                .await
                .unwrap();

            let items = service.get_news_list(10, 0).await.unwrap();
            assert_eq!(items[0].categories, vec![7, 9]);
        }
    }

    #[tokio::test]
    async fn test_empty_category_set_clears_links() {
        let (_, service) = seeded_service();
        service
            .update_news(NewsPatch {
                id: 5,
                title: None,
                content: None,
                categories: vec![],
            })
            .await
            .unwrap();

        let items = service.get_news_list(10, 0).await.unwrap();
        assert!(items[0].categories.is_empty());
    }

    #[tokio::test]
    async fn test_pagination_is_deterministic_without_overlap_or_gap() {
        let store = Arc::new(InMemoryNewsStore::new());
        for id in 1..=4 {
            store.seed(id, &format!("title-{}", id), "content", &[id]);
        }
        let service = NewsService::new(store);

        let first = service.get_news_list(2, 0).await.unwrap();
        let second = service.get_news_list(2, 2).await.unwrap();
        let all = service.get_news_list(4, 0).await.unwrap();

        let paged: Vec<i64> = first.iter().chain(&second).map(|n| n.id).collect();
        let whole: Vec<i64> = all.iter().map(|n| n.id).collect();
        assert_eq!(paged, whole);
        assert_eq!(whole, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_empty_result_set_is_success() {
        let store = Arc::new(InMemoryNewsStore::new());
        let service = NewsService::new(store);
        let items = service.get_news_list(10, 0).await.unwrap();
        assert!(items.is_empty());
    }
}
