use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::news::models::{NewsItem, NewsPatch};

mod memory;
mod pg;

#[cfg(test)]
pub use memory::InMemoryNewsStore;
pub use pg::PgNewsStore;

/// Storage capability for the news engines.
///
/// One store-backed implementation ([`PgNewsStore`]) and one in-memory test
/// double, selected where the service is constructed. This is the only
/// substitution point; everything above it is concrete.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Apply a partial field update and atomically replace the category link
    /// set for one news item. Either every submitted change commits or none
    /// do; no intermediate state is observable by other transactions.
    async fn patch_news(&self, patch: NewsPatch) -> Result<()>;

    /// Return one identity-ordered page of news items, each hydrated with
    /// its category set. An empty page is success, not an error.
    async fn list_news(&self, limit: i64, offset: i64) -> Result<Vec<NewsItem>>;
}
