use async_trait::async_trait;
use ns_core::raw::{Envelope, RawArticle, RawSource};
use ns_core::{Error, EverythingQuery, HeadlinesQuery, NewsApi, Result, SourceFilter, MAX_PAGE_SIZE};
use reqwest::Client;
use std::fmt;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";

const USER_AGENT: &str = concat!("ns/", env!("CARGO_PKG_VERSION"));

/// [`NewsApi`] over HTTP, talking to NewsAPI or anything that speaks its protocol.
pub struct NewsApiClient {
    client: Client,
    base_url: Url,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl NewsApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!("{}: not a base URL", base_url)));
        }
        // Endpoints are joined relative to the base, which needs a trailing slash.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, base_url: url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    async fn fetch(&self, path: &str, params: Vec<(&'static str, String)>, api_key: &str) -> Result<Envelope> {
        let url = self.endpoint(path)?;
        debug!("Requesting {} with {:?}", url, params);

        let response = self
            .client
            .get(url)
            .query(&params)
            .query(&[("apiKey", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // NewsAPI reports failures with the same envelope, but proxies may not.
            return Err(match serde_json::from_str::<Envelope>(&body) {
                Ok(envelope) => Error::api(
                    envelope.code.unwrap_or_else(|| status.as_str().to_string()),
                    envelope.message.unwrap_or_default(),
                ),
                Err(_) => Error::api(status.as_str(), body),
            });
        }

        response.json::<Envelope>().await?.into_ok()
    }
}

#[async_trait]
impl NewsApi for NewsApiClient {
    async fn everything(&self, api_key: &str, query: &EverythingQuery) -> Result<Vec<RawArticle>> {
        let mut params = query.params();
        params.push(("pageSize", MAX_PAGE_SIZE.to_string()));
        Ok(self.fetch("everything", params, api_key).await?.articles)
    }

    async fn top_headlines(&self, api_key: &str, query: &HeadlinesQuery) -> Result<Vec<RawArticle>> {
        Ok(self.fetch("top-headlines", query.params(), api_key).await?.articles)
    }

    async fn sources(&self, api_key: &str, filter: &SourceFilter) -> Result<Vec<RawSource>> {
        Ok(self.fetch("top-headlines/sources", filter.params(), api_key).await?.sources)
    }
}
