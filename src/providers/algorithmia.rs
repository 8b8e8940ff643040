use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::ArticleProvider;

/// Algorithmia client running the Wikipedia parser algorithm
#[derive(Debug)]
pub struct Algorithmia {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL
    endpoint: String,
    /// Algorithm path, e.g. `web/WikipediaParser/0.1.2`
    algorithm: String,
    /// Server-side execution timeout in seconds
    timeout_secs: u64,
}

/// Input of the Wikipedia parser algorithm
#[derive(Debug, Serialize)]
pub struct WikipediaRequest {
    #[serde(rename = "articleName")]
    pub article_name: String,
    pub lang: String,
}

/// Parsed Wikipedia article
#[derive(Debug, Deserialize)]
pub struct WikipediaArticle {
    /// Article body, with `== Section ==` heading lines
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Error payload of an algorithm call
#[derive(Debug, Deserialize)]
pub struct AlgorithmError {
    pub message: String,
    #[serde(default)]
    pub error_type: Option<String>,
}

/// Envelope of every algorithm response
#[derive(Debug, Deserialize)]
pub struct AlgorithmResponse<T> {
    pub result: Option<T>,
    pub error: Option<AlgorithmError>,
}

impl Algorithmia {
    /// Create a new Algorithmia client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        algorithm: impl Into<String>,
        timeout_secs: u64,
        request_timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(request_timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            algorithm: algorithm.into(),
            timeout_secs,
        }
    }

    /// URL of the algorithm, including the server-side timeout
    pub fn algorithm_url(&self) -> Result<Url, ProviderError> {
        let base = format!(
            "{}/v1/algo/{}",
            self.endpoint.trim_end_matches('/'),
            self.algorithm.trim_matches('/')
        );
        let mut url = Url::parse(&base).map_err(|e| ProviderError::RequestFailed(format!("Invalid Algorithmia URL {}: {}", base, e)))?;
        url.query_pairs_mut().append_pair("timeout", &self.timeout_secs.to_string());
        Ok(url)
    }

    /// Run the Wikipedia parser for one article
    pub async fn parse_article(&self, request: &WikipediaRequest) -> Result<WikipediaArticle, ProviderError> {
        let url = self.algorithm_url()?;
        debug!("Calling {} for '{}' ({})", self.algorithm, request.article_name, request.lang);

        let response = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, format!("Simple {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Algorithmia API error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        let body = response
            .json::<AlgorithmResponse<WikipediaArticle>>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Algorithmia response: {}", e)))?;

        Self::into_result(body)
    }

    /// Unwrap the response envelope
    pub fn into_result<T>(body: AlgorithmResponse<T>) -> Result<T, ProviderError> {
        if let Some(err) = body.error {
            return Err(ProviderError::ApiError {
                status_code: 200,
                message: match err.error_type {
                    Some(kind) => format!("{}: {}", kind, err.message),
                    None => err.message,
                },
            });
        }
        body.result
            .ok_or_else(|| ProviderError::ParseError("Algorithmia response has neither result nor error".to_string()))
    }
}

#[async_trait]
impl ArticleProvider for Algorithmia {
    async fn fetch_article(&self, search_term: &str, lang: &str) -> Result<String, ProviderError> {
        let request = WikipediaRequest {
            article_name: search_term.to_string(),
            lang: lang.to_string(),
        };
        let article = self.parse_article(&request).await?;
        Ok(article.content)
    }
}
