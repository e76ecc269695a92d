use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::models::Category;

mod memory;
mod pg;

#[cfg(test)]
pub use memory::InMemoryCategoryStore;
pub use pg::PgCategoryStore;

/// Storage capability for the category feature.
///
/// Row-level primitives only. The Conflict/NotFound decisions live in
/// [`CategoryService`](crate::features::categories::services::CategoryService),
/// above this seam, so they run the same against Postgres and the in-memory
/// test double.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn insert(&self, name: &str, description: &str) -> Result<Category>;

    async fn fetch(&self, id: i64) -> Result<Option<Category>>;

    async fn fetch_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// One name-ordered page plus the total row count.
    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<(Vec<Category>, i64)>;

    /// Returns the updated row, or `None` when the id does not exist.
    async fn update(&self, id: i64, name: &str, description: &str) -> Result<Option<Category>>;

    /// Returns the number of rows deleted.
    async fn delete(&self, id: i64) -> Result<u64>;

    /// Categories linked to one news item, ordered by name.
    async fn fetch_by_news(&self, news_id: i64) -> Result<Vec<Category>>;
}
