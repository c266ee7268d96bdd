use async_trait::async_trait;

use crate::raw::{RawArticle, RawSource};
use crate::types::SourceFilter;
use crate::Result;

/// Largest page NewsAPI will return for a single request.
pub const MAX_PAGE_SIZE: usize = 100;

/// What to look for on the `everything` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EverythingQuery {
    /// Comma separated keywords matched anywhere in the article.
    Keywords(String),
    /// Text matched against article titles only.
    Title(String),
    /// A source id such as `bbc-news`.
    Source(String),
}

impl EverythingQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Keywords(keywords) => vec![("q", keywords.clone())],
            Self::Title(title) => vec![("q", title.clone()), ("searchIn", "title".to_string())],
            Self::Source(id) => vec![("sources", id.clone())],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlinesQuery {
    pub country: String,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl HeadlinesQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("country", self.country.clone()),
            ("pageSize", self.page_size.to_string()),
            ("page", self.page.to_string()),
        ]
    }
}

/// The remote news aggregation service.
///
/// Implementations return the raw article/source lists of a successful
/// response and an error for anything else, including an upstream status
/// other than `ok`.
#[async_trait]
pub trait NewsApi: Send + Sync {
    /// Search every indexed article, one page of [`MAX_PAGE_SIZE`] results.
    async fn everything(&self, api_key: &str, query: &EverythingQuery) -> Result<Vec<RawArticle>>;

    /// One page of current top headlines.
    async fn top_headlines(&self, api_key: &str, query: &HeadlinesQuery) -> Result<Vec<RawArticle>>;

    /// Outlets matching the filter.
    async fn sources(&self, api_key: &str, filter: &SourceFilter) -> Result<Vec<RawSource>>;
}
