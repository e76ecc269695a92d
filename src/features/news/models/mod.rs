mod news;

pub use news::{NewsItem, NewsListRow, NewsPatch};
