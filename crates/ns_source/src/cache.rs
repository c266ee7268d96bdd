use ns_core::{Article, Source, SourceFilter};

/// Most recently fetched top headlines, in upstream order.
#[derive(Debug, Default)]
pub struct HeadlineCache {
    articles: Vec<Article>,
}

impl HeadlineCache {
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// The first `count` headlines, or `None` if fewer are cached.
    pub fn prefix(&self, count: usize) -> Option<Vec<Article>> {
        self.articles.get(..count).map(<[Article]>::to_vec)
    }

    /// Up to `count` headlines from the front.
    pub fn take(&self, count: usize) -> Vec<Article> {
        self.articles.iter().take(count).cloned().collect()
    }

    pub fn replace(&mut self, articles: Vec<Article>) {
        self.articles = articles;
    }

    pub fn clear(&mut self) {
        self.articles.clear();
    }
}

/// Source list of the last successful listing, keyed by the filter that produced it.
#[derive(Debug, Default)]
pub struct SourceCache {
    entry: Option<(SourceFilter, Vec<Source>)>,
}

impl SourceCache {
    pub fn get(&self, filter: &SourceFilter) -> Option<&[Source]> {
        match &self.entry {
            Some((key, sources)) if key == filter => Some(sources),
            _ => None,
        }
    }

    pub fn replace(&mut self, filter: SourceFilter, sources: Vec<Source>) {
        self.entry = Some((filter, sources));
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
