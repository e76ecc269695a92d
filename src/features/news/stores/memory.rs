//! In-memory news store used as the test double for the service and handler
//! tests. Mirrors the Postgres store's observable semantics: whole-set
//! category replacement, duplicate collapse, identity-ordered listing.

#[cfg(test)]
use std::collections::{BTreeMap, BTreeSet};
#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::features::news::models::{NewsItem, NewsPatch};
#[cfg(test)]
use crate::features::news::stores::NewsStore;

#[cfg(test)]
#[derive(Debug, Clone)]
struct StoredNews {
    title: String,
    content: String,
    categories: BTreeSet<i64>,
}

#[cfg(test)]
#[derive(Default)]
pub struct InMemoryNewsStore {
    records: Mutex<BTreeMap<i64, StoredNews>>,
}

#[cfg(test)]
impl InMemoryNewsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, id: i64, title: &str, content: &str, categories: &[i64]) {
        self.records.lock().unwrap().insert(
            id,
            StoredNews {
                title: title.to_string(),
                content: content.to_string(),
                categories: categories.iter().copied().collect(),
            },
        );
    }
}

#[cfg(test)]
#[async_trait]
impl NewsStore for InMemoryNewsStore {
    async fn patch_news(&self, patch: NewsPatch) -> Result<()> {
        let mut records = self.records.lock().unwrap();

        let record = records
            .get_mut(&patch.id)
            .ok_or_else(|| AppError::NotFound(format!("News item {} not found", patch.id)))?;

        if let Some(title) = patch.title {
            record.title = title;
        }
        if let Some(content) = patch.content {
            record.content = content;
        }
        record.categories = patch.categories.into_iter().collect();

        Ok(())
    }

    async fn list_news(&self, limit: i64, offset: i64) -> Result<Vec<NewsItem>> {
        let records = self.records.lock().unwrap();

        Ok(records
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|(id, record)| NewsItem {
                id: *id,
                title: record.title.clone(),
                content: record.content.clone(),
                categories: record.categories.iter().copied().collect(),
            })
            .collect())
    }
}
