use ns_core::{ArticleList, SourceFilter};
use ns_source::NewsSource;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub struct AppState {
    pub news: Arc<NewsSource>,
    /// Filters applied to `/sources` when the request leaves them out.
    pub default_sources: SourceFilter,
    results: RwLock<Option<ArticleList>>,
}

impl AppState {
    pub fn new(news: Arc<NewsSource>, default_sources: SourceFilter) -> Self {
        Self {
            news,
            default_sources,
            results: RwLock::new(None),
        }
    }

    /// Result of the latest search, shown by the results page.
    pub async fn results(&self) -> Option<ArticleList> {
        self.results.read().await.clone()
    }

    pub async fn store_results(&self, results: ArticleList) {
        *self.results.write().await = Some(results);
    }

    /// Loads the default source listing so the search page's first request is served from cache.
    pub async fn warm_sources(&self) {
        let sources = self.news.sources(&self.default_sources, false).await;
        if sources.is_good() {
            info!("🗞️ Source cache warmed with {} sources", sources.count);
        } else {
            warn!("Could not warm source cache; /sources will retry on demand");
        }
    }
}
