use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::news::models::{NewsItem, NewsListRow, NewsPatch};
use crate::features::news::stores::NewsStore;

/// Postgres-backed news store.
///
/// Holds no state of its own beyond the pool; every operation is one
/// self-contained unit of work, and serialization between concurrent calls
/// is left entirely to Postgres.
pub struct PgNewsStore {
    pool: PgPool,
}

impl PgNewsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsStore for PgNewsStore {
    async fn patch_news(&self, patch: NewsPatch) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin news patch transaction: {:?}", e);
            AppError::Database(e)
        })?;

        // Fail fast on unknown ids instead of silently replacing links for a
        // row that does not exist. Dropping the transaction on the error path
        // rolls back anything already executed.
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM news WHERE id = $1)")
            .bind(patch.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check news existence: {:?}", e);
                AppError::Database(e)
            })?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "News item {} not found",
                patch.id
            )));
        }

        if let Some(title) = &patch.title {
            sqlx::query("UPDATE news SET title = $1 WHERE id = $2")
                .bind(title)
                .bind(patch.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to update news title: {:?}", e);
                    AppError::Database(e)
                })?;
        }

        if let Some(content) = &patch.content {
            sqlx::query("UPDATE news SET content = $1 WHERE id = $2")
                .bind(content)
                .bind(patch.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to update news content: {:?}", e);
                    AppError::Database(e)
                })?;
        }

        // Replace the full link set: delete everything, then insert the
        // target set. No diffing against the previous set.
        sqlx::query("DELETE FROM news_categories WHERE news_id = $1")
            .bind(patch.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to clear news categories: {:?}", e);
                AppError::Database(e)
            })?;

        if !patch.categories.is_empty() {
            // ON CONFLICT collapses duplicates in the input set.
            sqlx::query(
                r#"
                INSERT INTO news_categories (news_id, category_id)
                SELECT $1, unnest($2::bigint[])
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(patch.id)
            .bind(&patch.categories)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert news categories: {:?}", e);
                AppError::Database(e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit news patch: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "News item {} patched, {} categories",
            patch.id,
            patch.categories.len()
        );

        Ok(())
    }

    async fn list_news(&self, limit: i64, offset: i64) -> Result<Vec<NewsItem>> {
        let rows: Vec<NewsListRow> = sqlx::query_as(
            r#"
            SELECT n.id, n.title, n.content,
                   COALESCE((ARRAY_AGG(nc.category_id ORDER BY nc.category_id)
                             FILTER (WHERE nc.category_id IS NOT NULL))::text, '{}')
                       AS categories
            FROM news n
            LEFT JOIN news_categories nc ON nc.news_id = n.id
            GROUP BY n.id
            ORDER BY n.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list news: {:?}", e);
            AppError::Database(e)
        })?;

        rows.into_iter()
            .map(|row| {
                let categories = parse_bigint_array(&row.categories).map_err(|e| {
                    AppError::Internal(format!(
                        "Malformed category aggregate for news {}: {}",
                        row.id, e
                    ))
                })?;
                Ok(NewsItem {
                    id: row.id,
                    title: row.title,
                    content: row.content,
                    categories,
                })
            })
            .collect()
    }
}

/// Decode a Postgres bigint array literal such as `{1,2,3}`.
///
/// `{}` decodes to an empty vector and `NULL` elements are skipped, so a news
/// item without categories yields zero ids rather than a one-element
/// null-ish sequence.
fn parse_bigint_array(literal: &str) -> std::result::Result<Vec<i64>, String> {
    let inner = literal
        .trim()
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| format!("not an array literal: {:?}", literal))?;

    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(str::trim)
        .filter(|token| !token.eq_ignore_ascii_case("NULL"))
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|e| format!("bad element {:?}: {}", token, e))
        })
        .collect()
}
