use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::stores::CategoryStore;

/// Postgres-backed category store. Every operation is one statement; the
/// schema's unique index on `name` backs up the service-level conflict check.
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn insert(&self, name: &str, description: &str) -> Result<Category> {
        sqlx::query_as(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn fetch(&self, id: i64) -> Result<Option<Category>> {
        sqlx::query_as(
            "SELECT id, name, description, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn fetch_by_name(&self, name: &str) -> Result<Option<Category>> {
        sqlx::query_as(
            "SELECT id, name, description, created_at, updated_at FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up category by name: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<(Vec<Category>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count categories: {:?}", e);
                AppError::Database(e)
            })?;

        let categories: Vec<Category> = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((categories, total))
    }

    async fn update(&self, id: i64, name: &str, description: &str) -> Result<Option<Category>> {
        sqlx::query_as(
            r#"
            UPDATE categories
            SET name = $1, description = $2, updated_at = now()
            WHERE id = $3
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected())
    }

    async fn fetch_by_news(&self, news_id: i64) -> Result<Vec<Category>> {
        sqlx::query_as(
            r#"
            SELECT c.id, c.name, c.description, c.created_at, c.updated_at
            FROM categories c
            INNER JOIN news_categories nc ON nc.category_id = c.id
            WHERE nc.news_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(news_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories for news {}: {:?}", news_id, e);
            AppError::Database(e)
        })
    }
}
