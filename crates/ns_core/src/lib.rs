pub mod api;
pub mod error;
pub mod raw;
pub mod types;

pub use api::{EverythingQuery, HeadlinesQuery, NewsApi, MAX_PAGE_SIZE};
pub use error::{Error, Result};
pub use types::{Article, ArticleList, Source, SourceFilter, SourceList, Status};

pub mod prelude {
    pub use crate::api::NewsApi;
    pub use crate::types::{Article, ArticleList, Source, SourceList};
    pub use crate::{Error, Result};
}
