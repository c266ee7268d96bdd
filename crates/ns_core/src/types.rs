use serde::{Deserialize, Serialize};

/// A news item in the shape served to the browser client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Display name of the outlet, e.g. "BBC News".
    pub source: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "imageurl")]
    pub image_url: Option<String>,
    /// UTC publication time as sent upstream, e.g. `2022-05-25T14:09:59Z`.
    pub published: Option<String>,
    /// First 200 characters (at most) of the article body.
    pub content: Option<String>,
}

/// A news outlet that articles can be requested from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Good,
    Bad,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleList {
    pub status: Status,
    pub count: usize,
    pub articles: Vec<Article>,
}

impl ArticleList {
    pub fn good(articles: Vec<Article>) -> Self {
        Self {
            status: Status::Good,
            count: articles.len(),
            articles,
        }
    }

    /// A failed query. `articles` holds whatever was gathered before the failure.
    pub fn bad(articles: Vec<Article>) -> Self {
        Self {
            status: Status::Bad,
            count: articles.len(),
            articles,
        }
    }

    pub fn failed() -> Self {
        Self::bad(Vec::new())
    }

    pub fn is_good(&self) -> bool {
        self.status == Status::Good
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceList {
    pub status: Status,
    pub count: usize,
    pub sources: Vec<Source>,
}

impl SourceList {
    pub fn good(sources: Vec<Source>) -> Self {
        Self {
            status: Status::Good,
            count: sources.len(),
            sources,
        }
    }

    pub fn failed() -> Self {
        Self {
            status: Status::Bad,
            count: 0,
            sources: Vec::new(),
        }
    }

    pub fn is_good(&self) -> bool {
        self.status == Status::Good
    }
}

/// Filters accepted by the source listing endpoint. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourceFilter {
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

impl SourceFilter {
    /// Builds a filter, treating empty or blank strings as no filter.
    pub fn new(
        category: Option<&str>,
        language: Option<&str>,
        country: Option<&str>,
    ) -> Self {
        fn keep(value: Option<&str>) -> Option<String> {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            category: keep(category),
            language: keep(language),
            country: keep(country),
        }
    }

    /// Query parameters for the filters that are set.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        [
            ("category", &self.category),
            ("language", &self.language),
            ("country", &self.country),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
        .collect()
    }

    /// Fills in unset filters from `defaults`.
    pub fn or(self, defaults: &SourceFilter) -> Self {
        Self {
            category: self.category.or_else(|| defaults.category.clone()),
            language: self.language.or_else(|| defaults.language.clone()),
            country: self.country.or_else(|| defaults.country.clone()),
        }
    }
}
