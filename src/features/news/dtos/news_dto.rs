use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::news::models::{NewsItem, NewsPatch};

/// Request DTO for editing a news item.
///
/// Omitted fields are left untouched; an explicit empty string clears the
/// field. The category set always replaces the existing one wholesale (an
/// omitted or empty array removes all associations).
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EditNewsDto {
    /// New title, if supplied
    pub title: Option<String>,

    /// New content, if supplied
    pub content: Option<String>,

    /// Full replacement set of category ids
    #[serde(default)]
    pub categories: Vec<i64>,
}

impl EditNewsDto {
    pub fn into_patch(self, id: i64) -> NewsPatch {
        NewsPatch {
            id,
            title: self.title,
            content: self.content,
            categories: self.categories,
        }
    }
}

/// Response DTO for a news item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewsResponseDto {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub categories: Vec<i64>,
}

impl From<NewsItem> for NewsResponseDto {
    fn from(n: NewsItem) -> Self {
        Self {
            id: n.id,
            title: n.title,
            content: n.content,
            categories: n.categories,
        }
    }
}
