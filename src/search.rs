use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::data_models::SearchResult;
use crate::errors::ProviderError;

/// Web search backend queried once per question.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Return at most `max_results` results, most relevant first.
    async fn search(&self, query: &str, max_results: usize)
    -> Result<Vec<SearchResult>, ProviderError>;

    fn name(&self) -> &'static str;
}

/// Client for the Tavily search API.
pub struct TavilySearch {
    api_key: String,
    base_url: String,
    timeout: Duration,
    client: Client,
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: String,
    url: String,
    #[serde(default)]
    content: String,
}

impl TavilySearch {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<TavilySearch, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Http {
                provider: "tavily",
                message: format!("failed to build http client: {e}"),
            })?;
        Ok(TavilySearch {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }
}

#[async_trait]
impl SearchProvider for TavilySearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, ProviderError> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(max_results, "sending tavily search");

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&TavilyRequest { query, max_results })
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(self.name(), self.timeout, e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: self.name(),
                status: status.as_u16(),
                body,
            });
        }

        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::from_reqwest(self.name(), self.timeout, e))?;
        let parsed: TavilyResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed {
                provider: self.name(),
                message: e.to_string(),
            })?;

        Ok(parsed
            .results
            .into_iter()
            .take(max_results)
            .map(|r| SearchResult {
                title: r.title,
                url: r.url,
                content: r.content,
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "tavily"
    }
}
