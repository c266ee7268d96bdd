use ns_core::raw::{normalize_articles, normalize_sources};
use ns_core::{
    ArticleList, EverythingQuery, HeadlinesQuery, NewsApi, SourceFilter, SourceList, MAX_PAGE_SIZE,
};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::{HeadlineCache, SourceCache};

pub const DEFAULT_HEADLINE_COUNTRY: &str = "us";

/// Searches a [`NewsApi`] and hands back normalized results.
///
/// Every failure is reported as a `BAD` result rather than an error; the
/// cause is only logged. Top headlines and the last source listing are kept
/// in memory and reused while they still answer the request.
pub struct NewsSource {
    api: Arc<dyn NewsApi>,
    api_key: RwLock<String>,
    headline_country: String,
    headlines: Mutex<HeadlineCache>,
    sources: Mutex<SourceCache>,
}

impl fmt::Debug for NewsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsSource")
            .field("api_key", &"<redacted>")
            .field("headline_country", &self.headline_country)
            .finish_non_exhaustive()
    }
}

impl NewsSource {
    pub fn new(api: Arc<dyn NewsApi>, api_key: impl Into<String>) -> Self {
        Self {
            api,
            api_key: RwLock::new(api_key.into()),
            headline_country: DEFAULT_HEADLINE_COUNTRY.to_string(),
            headlines: Mutex::new(HeadlineCache::default()),
            sources: Mutex::new(SourceCache::default()),
        }
    }

    /// Country whose top headlines are paged through.
    pub fn with_headline_country(mut self, country: impl Into<String>) -> Self {
        self.headline_country = country.into();
        self
    }

    pub async fn api_key(&self) -> String {
        self.api_key.read().await.clone()
    }

    pub async fn set_api_key(&self, api_key: impl Into<String>) {
        *self.api_key.write().await = api_key.into();
    }

    pub async fn search_by_keywords(&self, keywords: &str) -> ArticleList {
        self.everything(EverythingQuery::Keywords(keywords.to_string())).await
    }

    pub async fn search_by_title(&self, title: &str) -> ArticleList {
        self.everything(EverythingQuery::Title(title.to_string())).await
    }

    pub async fn articles_from_source(&self, source_id: &str) -> ArticleList {
        self.everything(EverythingQuery::Source(source_id.to_string())).await
    }

    async fn everything(&self, query: EverythingQuery) -> ArticleList {
        let api_key = self.api_key().await;
        match self.api.everything(&api_key, &query).await {
            Ok(raw) => {
                let articles = normalize_articles(raw);
                info!("📰 {} articles for {:?}", articles.len(), query);
                ArticleList::good(articles)
            }
            Err(e) => {
                warn!("Search {:?} failed: {}", query, e);
                ArticleList::failed()
            }
        }
    }

    /// Outlets matching `filter`.
    ///
    /// The previous listing is returned as is when the filter matches it and
    /// `clear_cache` is false. A failed refresh keeps the previous listing.
    pub async fn sources(&self, filter: &SourceFilter, clear_cache: bool) -> SourceList {
        let mut cache = self.sources.lock().await;
        if clear_cache {
            cache.clear();
        }
        if let Some(sources) = cache.get(filter) {
            debug!("Serving {} cached sources for {:?}", sources.len(), filter);
            return SourceList::good(sources.to_vec());
        }

        let api_key = self.api_key().await;
        match self.api.sources(&api_key, filter).await {
            Ok(raw) => {
                let sources = normalize_sources(raw);
                info!("🗞️ {} sources for {:?}", sources.len(), filter);
                cache.replace(filter.clone(), sources.clone());
                SourceList::good(sources)
            }
            Err(e) => {
                warn!("Listing sources for {:?} failed: {}", filter, e);
                SourceList::failed()
            }
        }
    }

    /// The first `count` top headlines.
    ///
    /// Served from the cache when it holds at least `count` entries. Otherwise
    /// the cache is refilled page by page, stopping early at the first short
    /// page. If a page fails, whatever was fetched before it becomes the
    /// cache and is returned marked `BAD`.
    pub async fn top_headlines(&self, count: usize, recompute_cache: bool) -> ArticleList {
        let mut cache = self.headlines.lock().await;
        if recompute_cache {
            cache.clear();
        }
        if let Some(articles) = cache.prefix(count) {
            debug!("Serving {} cached headlines", articles.len());
            return ArticleList::good(articles);
        }

        let api_key = self.api_key().await;
        let pages = count.div_ceil(MAX_PAGE_SIZE);
        let mut fetched = Vec::new();

        for page in 1..=pages {
            let query = HeadlinesQuery {
                country: self.headline_country.clone(),
                page,
                page_size: MAX_PAGE_SIZE,
            };
            match self.api.top_headlines(&api_key, &query).await {
                Ok(raw) => {
                    let exhausted = raw.len() < MAX_PAGE_SIZE;
                    fetched.extend(normalize_articles(raw));
                    if exhausted {
                        debug!("Headlines exhausted at page {}/{}", page, pages);
                        break;
                    }
                }
                Err(e) => {
                    warn!(
                        "Headline page {}/{} failed after {} articles: {}",
                        page,
                        pages,
                        fetched.len(),
                        e
                    );
                    cache.replace(fetched);
                    return ArticleList::bad(cache.take(count));
                }
            }
        }

        info!("📰 Refilled headline cache with {} articles", fetched.len());
        cache.replace(fetched);
        ArticleList::good(cache.take(count))
    }
}
