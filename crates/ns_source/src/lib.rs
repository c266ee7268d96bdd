pub mod cache;
pub mod client;
pub mod source;

pub use client::{NewsApiClient, DEFAULT_BASE_URL};
pub use source::{NewsSource, DEFAULT_HEADLINE_COUNTRY};

pub mod prelude {
    pub use super::{NewsApiClient, NewsSource};
    pub use ns_core::{Article, ArticleList, Error, Result, SourceFilter, SourceList};
}
