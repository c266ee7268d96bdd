//! Payloads as NewsAPI sends them, and their mapping onto [`Article`] and [`Source`].

use serde::Deserialize;

use crate::types::{Article, Source};
use crate::{Error, Result};

/// Outlet reference embedded in every upstream article.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub source: Option<RawArticleSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSource {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

/// Top-level body of every NewsAPI response, successful or not.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
    #[serde(default)]
    pub sources: Vec<RawSource>,
}

impl Envelope {
    /// Turns an envelope whose status is not `ok` into [`Error::Api`].
    pub fn into_ok(self) -> Result<Self> {
        if self.status == "ok" {
            return Ok(self);
        }
        Err(Error::api(
            self.code.unwrap_or(self.status),
            self.message.unwrap_or_default(),
        ))
    }
}

/// NewsAPI fills unknown fields with the literal string "null"; those become `None`.
fn scrub(value: Option<String>) -> Option<String> {
    value.filter(|v| v != "null")
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Self {
            title: scrub(raw.title),
            author: scrub(raw.author),
            source: scrub(raw.source.and_then(|s| s.name)),
            description: scrub(raw.description),
            url: scrub(raw.url),
            image_url: scrub(raw.url_to_image),
            published: scrub(raw.published_at),
            content: scrub(raw.content),
        }
    }
}

impl From<RawSource> for Source {
    fn from(raw: RawSource) -> Self {
        Self {
            id: scrub(raw.id),
            name: scrub(raw.name),
            description: scrub(raw.description),
            url: scrub(raw.url),
            category: scrub(raw.category),
            language: scrub(raw.language),
            country: scrub(raw.country),
        }
    }
}

pub fn normalize_articles(raw: Vec<RawArticle>) -> Vec<Article> {
    raw.into_iter().map(Article::from).collect()
}

pub fn normalize_sources(raw: Vec<RawSource>) -> Vec<Source> {
    raw.into_iter().map(Source::from).collect()
}
