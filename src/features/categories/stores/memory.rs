//! In-memory category store used as the test double for the service and
//! handler tests. Mirrors the Postgres store's observable semantics:
//! name-ordered listing, cascading link removal on delete.

#[cfg(test)]
use std::collections::{BTreeMap, BTreeSet};
#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use chrono::Utc;

#[cfg(test)]
use crate::core::error::Result;
#[cfg(test)]
use crate::features::categories::models::Category;
#[cfg(test)]
use crate::features::categories::stores::CategoryStore;

#[cfg(test)]
#[derive(Default)]
struct Inner {
    records: BTreeMap<i64, Category>,
    // news id -> category ids
    links: BTreeMap<i64, BTreeSet<i64>>,
    next_id: i64,
}

#[cfg(test)]
#[derive(Default)]
pub struct InMemoryCategoryStore {
    inner: Mutex<Inner>,
}

#[cfg(test)]
impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link_news(&self, news_id: i64, category_ids: &[i64]) {
        self.inner
            .lock()
            .unwrap()
            .links
            .insert(news_id, category_ids.iter().copied().collect());
    }
}

#[cfg(test)]
fn by_name(records: &BTreeMap<i64, Category>) -> Vec<Category> {
    let mut categories: Vec<Category> = records.values().cloned().collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    categories
}

#[cfg(test)]
#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn insert(&self, name: &str, description: &str) -> Result<Category> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;

        let now = Utc::now();
        let category = Category {
            id: inner.next_id,
            name: name.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.records.insert(category.id, category.clone());
        Ok(category)
    }

    async fn fetch(&self, id: i64) -> Result<Option<Category>> {
        Ok(self.inner.lock().unwrap().records.get(&id).cloned())
    }

    async fn fetch_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .records
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<(Vec<Category>, i64)> {
        let inner = self.inner.lock().unwrap();
        let total = inner.records.len() as i64;

        let page = by_name(&inner.records)
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn update(&self, id: i64, name: &str, description: &str) -> Result<Option<Category>> {
        let mut inner = self.inner.lock().unwrap();

        Ok(inner.records.get_mut(&id).map(|category| {
            category.name = name.to_string();
            category.description = description.to_string();
            category.updated_at = Utc::now();
            category.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let mut inner = self.inner.lock().unwrap();

        if inner.records.remove(&id).is_none() {
            return Ok(0);
        }
        // Links cascade, as the schema's foreign keys do.
        for linked in inner.links.values_mut() {
            linked.remove(&id);
        }
        Ok(1)
    }

    async fn fetch_by_news(&self, news_id: i64) -> Result<Vec<Category>> {
        let inner = self.inner.lock().unwrap();

        let linked = match inner.links.get(&news_id) {
            Some(linked) => linked,
            None => return Ok(Vec::new()),
        };

        let mut categories: Vec<Category> = linked
            .iter()
            .filter_map(|id| inner.records.get(id).cloned())
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}
