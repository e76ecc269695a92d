use sqlx::FromRow;

/// A fully hydrated news item as returned by the listing engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Associated category ids. Always present, empty when the item has no
    /// categories.
    pub categories: Vec<i64>,
}

/// Partial update of a news item plus the full replacement category set.
///
/// Each scalar field is tri-state: `None` means "not supplied", `Some("")`
/// means "clear the field", `Some(v)` means "set to v". The category set is
/// always replaced wholesale; duplicates in the input collapse at the store.
#[derive(Debug, Clone)]
pub struct NewsPatch {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub categories: Vec<i64>,
}

/// Raw listing row: the category aggregate arrives as a Postgres array
/// literal and is decoded by the store.
#[derive(Debug, FromRow)]
pub struct NewsListRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub categories: String,
}
