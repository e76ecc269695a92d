use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta, PageQuery};

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Category name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

/// List categories
///
/// Ordered by name; the response meta carries the total category count.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let (categories, total) = service.list(query.limit(), query.offset()).await?;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta { total }),
    )))
}

/// Get category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    request_body = UpdateCategoryDto,
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Category deleted".to_string()),
        None,
    )))
}

/// List the categories of one news item
#[utoipa::path(
    get,
    path = "/api/news/{id}/categories",
    params(
        ("id" = i64, Path, description = "News item id")
    ),
    responses(
        (status = 200, description = "Categories of the news item", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_news_categories(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list_by_news(id).await?;
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::features::categories::routes;
    use crate::features::categories::services::CategoryService;
    use crate::features::categories::stores::InMemoryCategoryStore;

    fn test_server() -> TestServer {
        let service = Arc::new(CategoryService::new(Arc::new(InMemoryCategoryStore::new())));
        let router = routes::routes(Arc::clone(&service)).merge(routes::protected_routes(service));
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_create_category_returns_created() {
        let server = test_server();

        let response = server
            .post("/api/categories")
            .json(&json!({ "name": "tech", "description": "technology news" }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["name"], json!("tech"));
    }

    #[tokio::test]
    async fn test_create_duplicate_name_is_409() {
        let server = test_server();

        server
            .post("/api/categories")
            .json(&json!({ "name": "tech" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/categories")
            .json(&json!({ "name": "tech" }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_get_unknown_category_is_404() {
        let server = test_server();

        let response = server.get("/api/categories/42").await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_update_unknown_category_is_404() {
        let server = test_server();

        let response = server
            .put("/api/categories/42")
            .json(&json!({ "name": "tech" }))
            .await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_delete_unknown_category_is_404() {
        let server = test_server();

        let response = server.delete("/api/categories/42").await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_create_blank_name_is_400() {
        let server = test_server();

        let response = server
            .post("/api/categories")
            .json(&json!({ "name": "" }))
            .await;
        response.assert_status_bad_request();
    }
}
