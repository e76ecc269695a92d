use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::news::dtos::{EditNewsDto, NewsResponseDto};
use crate::features::news::services::NewsService;
use crate::shared::types::{ApiResponse, PageQuery};

/// List news items with their category ids
///
/// Returns one deterministic page ordered by news id ascending. Each item
/// carries its full category id set (empty array when uncategorized).
#[utoipa::path(
    get,
    path = "/api/news",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of news items", body = ApiResponse<Vec<NewsResponseDto>>),
    ),
    tag = "news"
)]
pub async fn list_news(
    State(service): State<Arc<NewsService>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<NewsResponseDto>>>> {
    let items = service
        .get_news_list(query.limit(), query.offset())
        .await?;

    let news: Vec<NewsResponseDto> = items.into_iter().map(|n| n.into()).collect();
    Ok(Json(ApiResponse::success(Some(news), None, None)))
}

/// Edit a news item
///
/// Patches the supplied scalar fields and atomically replaces the category
/// associations in one transaction. Returns a bare success envelope; clients
/// re-fetch the list if they need the updated view.
#[utoipa::path(
    patch,
    path = "/api/news/{id}",
    request_body = EditNewsDto,
    params(
        ("id" = i64, Path, description = "News item id")
    ),
    responses(
        (status = 200, description = "News item updated"),
        (status = 400, description = "Invalid id or request body"),
        (status = 404, description = "News item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "news"
)]
pub async fn edit_news(
    State(service): State<Arc<NewsService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<EditNewsDto>,
) -> Result<Json<ApiResponse<()>>> {
    service.update_news(dto.into_patch(id)).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("News updated".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::features::news::routes;
    use crate::features::news::services::NewsService;
    use crate::features::news::stores::InMemoryNewsStore;

    fn test_server() -> TestServer {
        let store = Arc::new(InMemoryNewsStore::new());
        store.seed(1, "First", "Body one", &[1, 2]);
        store.seed(2, "Second", "Body two", &[]);
        let service = Arc::new(NewsService::new(store));

        let router = routes::routes(Arc::clone(&service)).merge(routes::protected_routes(service));
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_list_news_returns_hydrated_page() {
        let server = test_server();

        let response = server.get("/api/news").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], json!(true));
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["id"], json!(1));
        assert_eq!(data[0]["categories"], json!([1, 2]));
        // No categories serializes as an empty array, never null.
        assert_eq!(data[1]["categories"], json!([]));
    }

    #[tokio::test]
    async fn test_list_news_respects_limit_and_offset() {
        let server = test_server();

        let response = server
            .get("/api/news")
            .add_query_param("limit", "1")
            .add_query_param("offset", "1")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], json!(2));
    }

    #[tokio::test]
    async fn test_edit_news_patches_fields_and_replaces_categories() {
        let server = test_server();

        let response = server
            .patch("/api/news/1")
            .json(&json!({ "content": "Updated", "categories": [7, 7, 9] }))
            .await;
        response.assert_status_ok();

        let listed: Value = server.get("/api/news").await.json();
        let data = listed["data"].as_array().unwrap();
        assert_eq!(data[0]["title"], json!("First"));
        assert_eq!(data[0]["content"], json!("Updated"));
        assert_eq!(data[0]["categories"], json!([7, 9]));
    }

    #[tokio::test]
    async fn test_edit_news_unknown_id_is_404() {
        let server = test_server();

        let response = server
            .patch("/api/news/999999")
            .json(&json!({ "title": "T", "categories": [1] }))
            .await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_edit_news_zero_id_is_400() {
        let server = test_server();

        let response = server
            .patch("/api/news/0")
            .json(&json!({ "title": "T", "categories": [] }))
            .await;
        response.assert_status_bad_request();
    }
}
